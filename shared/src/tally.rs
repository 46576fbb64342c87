//! Order aggregation and pizza projection
//!
//! Pure functions over an order snapshot the caller has already fetched.
//! Nothing here touches shared state, so any number of request handlers can
//! tally concurrently.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{SLICES_PER_PIZZA, TallyConfig};
use crate::types::{Order, PizzaType};

/// Per-type quantity, iterated in menu order
pub type SliceCounts = BTreeMap<PizzaType, u64>;

/// Raw demand across a set of orders
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub slices: SliceCounts,
    pub juice_boxes: u64,
    /// Orders left out because their slice data was not a name-to-count mapping
    pub skipped_orders: usize,
}

/// Sum slices per pizza type and juice boxes across `orders`
///
/// Every type in `pizza_types` appears in the result, zero if nobody asked
/// for it. An order whose `pizza_slices` is malformed contributes nothing,
/// juice boxes included, and is counted in `skipped_orders`.
pub fn compute_totals<'a, I>(orders: I, pizza_types: &[PizzaType]) -> OrderTotals
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut totals = OrderTotals {
        slices: pizza_types.iter().map(|pizza| (*pizza, 0)).collect(),
        ..OrderTotals::default()
    };

    for order in orders {
        if order.pizza_slices.is_malformed() {
            totals.skipped_orders += 1;
            continue;
        }

        for pizza in pizza_types {
            let count = order.pizza_slices.count_for(*pizza).unwrap_or(0);
            *totals.slices.entry(*pizza).or_insert(0) += u64::from(count);
        }
        totals.juice_boxes += u64::from(order.juice_boxes);
    }

    totals
}

/// Whole pizzas to order for one type
///
/// The buffered demand is truncated to whole slices first, then rounded up
/// to whole pizzas: `ceil(trunc(slices * (1 + buffer)) / slices_per_pizza)`.
pub fn pizzas_for_slices(slices: u64, buffer_fraction: f64, slices_per_pizza: u32) -> u64 {
    let buffered = (slices as f64 * (1.0 + buffer_fraction)).trunc() as u64;
    buffered.div_ceil(u64::from(slices_per_pizza.max(1)))
}

/// Project whole pizzas per type from slice totals, ten slices a pizza
pub fn compute_pizzas_needed(slice_totals: &SliceCounts, buffer_fraction: f64) -> SliceCounts {
    project_pizzas(slice_totals, buffer_fraction, SLICES_PER_PIZZA)
}

fn project_pizzas(slice_totals: &SliceCounts, buffer_fraction: f64, slices_per_pizza: u32) -> SliceCounts {
    slice_totals
        .iter()
        .map(|(pizza, slices)| (*pizza, pizzas_for_slices(*slices, buffer_fraction, slices_per_pizza)))
        .collect()
}

/// Everything the order dashboard shows for one date
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TallySummary {
    pub total_slices: SliceCounts,
    pub pizzas_needed: SliceCounts,
    pub total_juice_boxes: u64,
    #[serde(skip)]
    pub skipped_orders: usize,
}

/// Aggregation engine bound to a tally configuration
#[derive(Clone, Debug, Default)]
pub struct TallyEngine {
    config: TallyConfig,
}

impl TallyEngine {
    pub fn new(config: TallyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    pub fn summarize<'a, I>(&self, orders: I) -> TallySummary
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let totals = compute_totals(orders, &self.config.pizza_types);
        let pizzas_needed = project_pizzas(
            &totals.slices,
            self.config.buffer_fraction,
            self.config.slices_per_pizza,
        );

        TallySummary {
            total_slices: totals.slices,
            pizzas_needed,
            total_juice_boxes: totals.juice_boxes,
            skipped_orders: totals.skipped_orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BUFFER_FRACTION;
    use crate::types::{OrderDate, OrderDraft, OrderId, PizzaSlices};

    fn order(slices: &[(PizzaType, u32)], juice_boxes: u32) -> Order {
        OrderDraft::new("user", OrderDate::parse("2024-05-01").unwrap())
            .with_slices(PizzaSlices::from_counts(slices.iter().copied()))
            .with_juice_boxes(juice_boxes)
            .into_order(OrderId::new())
    }

    fn malformed_order(raw: serde_json::Value, juice_boxes: u32) -> Order {
        OrderDraft::new("user", OrderDate::parse("2024-05-01").unwrap())
            .with_slices(PizzaSlices::Malformed(raw))
            .with_juice_boxes(juice_boxes)
            .into_order(OrderId::new())
    }

    fn counts(entries: &[(PizzaType, u64)]) -> SliceCounts {
        let mut map: SliceCounts = PizzaType::ALL.iter().map(|pizza| (*pizza, 0)).collect();
        map.extend(entries.iter().copied());
        map
    }

    #[test]
    fn test_empty_orders_give_zero_totals() {
        let totals = compute_totals(&Vec::<Order>::new(), &PizzaType::ALL);

        assert_eq!(totals.slices, counts(&[]));
        assert_eq!(totals.juice_boxes, 0);
        assert_eq!(totals.skipped_orders, 0);
    }

    #[test]
    fn test_three_order_scenario() {
        let orders = vec![
            order(&[(PizzaType::Cheese, 4)], 1),
            order(&[(PizzaType::Cheese, 3), (PizzaType::Veggie, 2)], 0),
            order(&[(PizzaType::Salami, 1)], 2),
        ];

        let totals = compute_totals(&orders, &PizzaType::ALL);
        assert_eq!(
            totals.slices,
            counts(&[(PizzaType::Cheese, 7), (PizzaType::Salami, 1), (PizzaType::Veggie, 2)])
        );
        assert_eq!(totals.juice_boxes, 3);

        let pizzas = compute_pizzas_needed(&totals.slices, DEFAULT_BUFFER_FRACTION);
        assert_eq!(
            pizzas,
            counts(&[(PizzaType::Cheese, 1), (PizzaType::Salami, 1), (PizzaType::Veggie, 1)])
        );
    }

    #[test]
    fn test_slice_total_equals_sum_of_order_slices() {
        let orders: Vec<Order> = (0..25u32)
            .map(|i| {
                order(
                    &[
                        (PizzaType::Cheese, i % 4),
                        (PizzaType::Donair, (i * 7) % 5),
                        (PizzaType::Zaatar, i % 2),
                    ],
                    i % 3,
                )
            })
            .collect();

        let expected: u64 = orders
            .iter()
            .flat_map(|o| PizzaType::ALL.map(|p| u64::from(o.pizza_slices.count_for(p).unwrap())))
            .sum();
        let totals = compute_totals(&orders, &PizzaType::ALL);

        assert_eq!(totals.slices.values().sum::<u64>(), expected);
        assert_eq!(
            totals.juice_boxes,
            orders.iter().map(|o| u64::from(o.juice_boxes)).sum::<u64>()
        );
    }

    /// Malformed slice data is dropped without an error. This hides bad
    /// stored data from the tally, which is why intake rejects it up front.
    #[test]
    fn test_malformed_orders_are_skipped_silently() {
        let orders = vec![
            order(&[(PizzaType::Cheese, 4)], 1),
            malformed_order(serde_json::json!("four cheese"), 5),
            malformed_order(serde_json::json!([1, 2, 3]), 0),
            order(&[(PizzaType::Salami, 2)], 1),
        ];

        let totals = compute_totals(&orders, &PizzaType::ALL);

        assert_eq!(totals.slices, counts(&[(PizzaType::Cheese, 4), (PizzaType::Salami, 2)]));
        assert_eq!(totals.juice_boxes, 2);
        assert_eq!(totals.skipped_orders, 2);
    }

    #[test]
    fn test_unknown_pizza_keys_ignored() {
        let raw: PizzaSlices =
            serde_json::from_value(serde_json::json!({"Cheese": 2, "Pepperoni": 9})).unwrap();
        let orders = vec![
            OrderDraft::new("user", OrderDate::parse("2024-05-01").unwrap())
                .with_slices(raw)
                .into_order(OrderId::new()),
        ];

        let totals = compute_totals(&orders, &PizzaType::ALL);
        assert_eq!(totals.slices, counts(&[(PizzaType::Cheese, 2)]));
    }

    #[test]
    fn test_only_configured_types_are_tallied() {
        let orders = vec![order(&[(PizzaType::Cheese, 2), (PizzaType::Veggie, 3)], 0)];

        let totals = compute_totals(&orders, &[PizzaType::Veggie]);

        assert_eq!(totals.slices.len(), 1);
        assert_eq!(totals.slices[&PizzaType::Veggie], 3);
    }

    #[test]
    fn test_pizza_boundaries() {
        let cases = [(0, 0), (1, 1), (9, 1), (10, 2), (11, 2), (18, 2), (19, 2), (20, 3), (90, 10), (100, 11)];
        for (slices, pizzas) in cases {
            assert_eq!(
                pizzas_for_slices(slices, DEFAULT_BUFFER_FRACTION, SLICES_PER_PIZZA),
                pizzas,
                "{slices} slices"
            );
        }
    }

    #[test]
    fn test_buffer_override() {
        assert_eq!(pizzas_for_slices(10, 0.0, 10), 1);
        assert_eq!(pizzas_for_slices(11, 0.0, 10), 2);
        assert_eq!(pizzas_for_slices(6, 0.5, 10), 1);
        assert_eq!(pizzas_for_slices(10, 0.5, 10), 2);
        assert_eq!(pizzas_for_slices(8, 0.0, 8), 1);
    }

    #[test]
    fn test_pizzas_needed_is_monotonic() {
        for buffer in [0.0, DEFAULT_BUFFER_FRACTION, 0.25] {
            let mut previous = 0;
            for slices in 0..2_000u64 {
                let pizzas = pizzas_for_slices(slices, buffer, SLICES_PER_PIZZA);
                assert!(pizzas >= previous, "{slices} slices at buffer {buffer}");
                previous = pizzas;
            }
        }
    }

    #[test]
    fn test_engine_summary_uses_config() {
        let orders = vec![order(&[(PizzaType::Cheese, 10)], 2)];

        let default_summary = TallyEngine::default().summarize(&orders);
        assert_eq!(default_summary.pizzas_needed[&PizzaType::Cheese], 2);
        assert_eq!(default_summary.total_juice_boxes, 2);

        let unbuffered = TallyEngine::new(TallyConfig::default().with_buffer_fraction(0.0));
        assert_eq!(unbuffered.summarize(&orders).pizzas_needed[&PizzaType::Cheese], 1);
    }

    #[test]
    fn test_summary_serializes_by_pizza_name() {
        let orders = vec![order(&[(PizzaType::Zaatar, 3)], 0)];
        let summary = TallyEngine::default().summarize(&orders);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total_slices"]["Zaatar"], 3);
        assert_eq!(value["pizzas_needed"]["Zaatar"], 1);
        assert_eq!(value["total_juice_boxes"], 0);
        assert!(value.get("skipped_orders").is_none());
    }
}
