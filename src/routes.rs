use serde::{Deserialize, Serialize};

use crate::errors::RoutePlannerError;
use crate::graph::RouteGraph;


/// One route as supplied by the data layer: endpoints plus the raw
/// attributes the weight policy consumes. `distance_km` is static;
/// `delay_minutes` and `frequency_per_day` are mutable on the caller's
/// side - after a change, re-derive the weight and re-insert the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    pub source: String,
    pub target: String,
    pub distance_km: f64,
    #[serde(default)]
    pub delay_minutes: f64,
    #[serde(default = "default_frequency")]
    pub frequency_per_day: u32,
}

fn default_frequency() -> u32 {
    1
}


/// Converts a route's distance, delay and service frequency into the
/// single scalar weight the searches consume.
///
/// The constants are tuned for demonstration rather than derived from a
/// principled cost model: low-frequency delays are punished with a 2000x
/// multiplier and high-frequency routes get a flat -5000 bonus, so the
/// selection is strongly biased toward frequent, punctual routes. They
/// are kept as fields so a caller can soften them, but the defaults
/// reproduce the original behavior exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightPolicy {
    /// Cruise speed used to turn distance into flight minutes
    pub avg_speed_kmh: f64,
    /// A route is high-frequency when `frequency_per_day` exceeds this
    pub high_frequency_threshold: u32,
    /// Per-minute delay multiplier for low-frequency routes
    pub low_frequency_delay_multiplier: f64,
    /// Flat additive bonus for high-frequency routes (negative)
    pub high_frequency_bonus: f64,
    /// Multiplicative discount per daily departure
    pub discount_per_departure: f64,
    /// Cap on the total multiplicative discount
    pub max_discount: f64,
    /// Weights never go below this, preserving non-negativity
    pub min_weight: f64,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            avg_speed_kmh: 800.0,
            high_frequency_threshold: 2,
            low_frequency_delay_multiplier: 2000.0,
            high_frequency_bonus: -5000.0,
            discount_per_departure: 0.2,
            max_discount: 0.75,
            min_weight: 1.0,
        }
    }
}

impl WeightPolicy {

    /// Effective weight of a route.
    ///
    /// Pure function of its arguments:
    /// 1. `time = distance_km / avg_speed_kmh * 60` (flight minutes)
    /// 2. high-frequency iff `frequency_per_day > high_frequency_threshold`
    /// 3. delay penalty: `delay_minutes * 1` if high-frequency, else
    ///    `delay_minutes * low_frequency_delay_multiplier`
    /// 4. high-frequency routes additionally get `high_frequency_bonus`
    /// 5. a discount of `min(frequency_per_day * discount_per_departure,
    ///    max_discount)` is applied multiplicatively
    /// 6. the result is clamped to `min_weight`
    ///
    /// Expects `distance_km >= 0`, `delay_minutes >= 0` and
    /// `frequency_per_day` in `1..=10`; the clamp keeps the output finite
    /// and positive for any such input.
    pub fn weight(&self, distance_km: f64, delay_minutes: f64, frequency_per_day: u32) -> f64 {
        let time = distance_km / self.avg_speed_kmh * 60.0;

        let high_frequency = frequency_per_day > self.high_frequency_threshold;
        let delay_penalty = if high_frequency {
            delay_minutes
        } else {
            delay_minutes * self.low_frequency_delay_multiplier
        };
        let frequency_bonus = if high_frequency {
            self.high_frequency_bonus
        } else {
            0.0
        };

        let effective = time + delay_penalty + frequency_bonus;

        let discount =
            (frequency_per_day as f64 * self.discount_per_departure).min(self.max_discount);

        (effective * (1.0 - discount)).max(self.min_weight)
    }

    /// Weight of a route record, ignoring its endpoints
    pub fn record_weight(&self, record: &RouteRecord) -> f64 {
        self.weight(
            record.distance_km,
            record.delay_minutes,
            record.frequency_per_day,
        )
    }
}


/// Build a graph from airport ids and route records, deriving each edge's
/// weight through `policy`.
///
/// `airports` may list airports that no route touches yet (they become
/// isolated nodes); endpoints named only by a record are auto-inserted.
pub fn build_route_graph(
    airports: &[&str],
    routes: &[RouteRecord],
    policy: &WeightPolicy,
) -> Result<RouteGraph, RoutePlannerError> {
    let mut graph = RouteGraph::new();

    for id in airports {
        graph.add_node(id)?;
    }
    for record in routes {
        let weight = policy.record_weight(record);
        graph.add_edge(&record.source, &record.target, weight)?;
    }

    tracing::debug!(
        nodes = graph.node_count(),
        routes = routes.len(),
        "route graph built"
    );

    Ok(graph)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_frequency_delayed_route() {
        // distance 800km at 800km/h = 60 minutes of flight time;
        // frequency 1 is low, so the 30 minute delay costs 30 * 2000
        let policy = WeightPolicy::default();
        let weight = policy.weight(800.0, 30.0, 1);

        // effective = 60 + 60000 = 60060, discount = 0.2
        assert!((weight - 48048.0).abs() < 1e-6, "got {weight}");
    }

    #[test]
    fn test_high_frequency_route_clamps_to_minimum() {
        // Same route at frequency 5: delay penalty is just 30, the -5000
        // bonus drives the effective weight negative, and the clamp kicks in
        let policy = WeightPolicy::default();
        let weight = policy.weight(800.0, 30.0, 5);

        // effective = 60 + 30 - 5000 = -4910, discount capped at 0.75,
        // -4910 * 0.25 = -1227.5 -> clamped to 1
        assert_eq!(weight, 1.0);
    }

    #[test]
    fn test_no_delay_no_penalty() {
        let policy = WeightPolicy::default();

        // 1600km = 120 minutes, frequency 1: discount 0.2
        let weight = policy.weight(1600.0, 0.0, 1);
        assert!((weight - 96.0).abs() < 1e-9, "got {weight}");
    }

    #[test]
    fn test_delay_increase_raises_low_frequency_weight() {
        let policy = WeightPolicy::default();

        let mut previous = policy.weight(1000.0, 0.0, 2);
        for delay in [5.0, 10.0, 60.0, 240.0] {
            let weight = policy.weight(1000.0, delay, 2);
            assert!(
                weight > previous,
                "weight should strictly increase with delay: {weight} vs {previous}"
            );
            previous = weight;
        }
    }

    #[test]
    fn test_crossing_frequency_threshold_lowers_weight() {
        let policy = WeightPolicy::default();

        let low = policy.weight(4000.0, 10.0, 2);
        let high = policy.weight(4000.0, 10.0, 3);
        assert!(
            high < low,
            "crossing the high-frequency threshold should cut the weight: {high} vs {low}"
        );
    }

    #[test]
    fn test_weight_never_below_minimum() {
        let policy = WeightPolicy::default();

        // Tiny distances and large bonuses still clamp to min_weight
        assert_eq!(policy.weight(0.0, 0.0, 10), 1.0);
        assert!(policy.weight(100.0, 0.0, 3) >= 1.0);
    }

    #[test]
    fn test_build_route_graph_applies_policy() {
        let routes = vec![RouteRecord {
            source: "JFK".to_string(),
            target: "ORD".to_string(),
            distance_km: 800.0,
            delay_minutes: 30.0,
            frequency_per_day: 1,
        }];

        let graph = build_route_graph(&["JFK", "ORD", "DFW"], &routes, &WeightPolicy::default())
            .unwrap();

        assert_eq!(graph.node_count(), 3);
        let weight = graph.edge_weight("JFK", "ORD").unwrap();
        assert!((weight - 48048.0).abs() < 1e-6, "got {weight}");
        assert_eq!(graph.neighbors("DFW").count(), 0);
    }

    #[test]
    fn test_route_record_defaults_from_json() {
        let record: RouteRecord =
            serde_json::from_str(r#"{"source":"JFK","target":"ORD","distance_km":800}"#).unwrap();

        assert_eq!(record.delay_minutes, 0.0);
        assert_eq!(record.frequency_per_day, 1);
    }
}
