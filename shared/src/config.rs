//! Tally configuration

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::PizzaType;

/// Safety margin added to slice demand before rounding to whole pizzas
pub const DEFAULT_BUFFER_FRACTION: f64 = 0.10;

/// Slices cut from one pizza
pub const SLICES_PER_PIZZA: u32 = 10;

/// Settings the aggregation engine reads on every tally
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TallyConfig {
    pub pizza_types: Vec<PizzaType>,
    pub buffer_fraction: f64,
    pub slices_per_pizza: u32,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            pizza_types: PizzaType::ALL.to_vec(),
            buffer_fraction: DEFAULT_BUFFER_FRACTION,
            slices_per_pizza: SLICES_PER_PIZZA,
        }
    }
}

impl TallyConfig {
    pub fn with_pizza_types(mut self, pizza_types: Vec<PizzaType>) -> Self {
        self.pizza_types = pizza_types;
        self
    }

    pub fn with_buffer_fraction(mut self, buffer_fraction: f64) -> Self {
        self.buffer_fraction = buffer_fraction;
        self
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.pizza_types.is_empty() {
            return Err(SharedError::invalid_config("pizza_types", "[]"));
        }

        let mut seen = Vec::with_capacity(self.pizza_types.len());
        for pizza in &self.pizza_types {
            if seen.contains(pizza) {
                return Err(SharedError::invalid_config("pizza_types", format!("duplicate {pizza}")));
            }
            seen.push(*pizza);
        }

        if !self.buffer_fraction.is_finite() || self.buffer_fraction < 0.0 {
            return Err(SharedError::invalid_config("buffer_fraction", self.buffer_fraction));
        }

        if self.slices_per_pizza == 0 {
            return Err(SharedError::invalid_config("slices_per_pizza", 0));
        }

        Ok(())
    }
}
