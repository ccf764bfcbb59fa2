//! Traffic light registry
//!
//! Lights only change when asked to. There is no timer behind them.

use log::debug;
use std::collections::HashMap;

use super::types::{IntersectionId, LightState};

/// Per-intersection light colors, defaulting to Green
#[derive(Debug, Default)]
pub struct TrafficLightRegistry {
    lights: HashMap<IntersectionId, LightState>,
}

impl TrafficLightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current color at an intersection; Green if it was never set
    pub fn status_of(&self, intersection: &str) -> LightState {
        self.lights.get(intersection).copied().unwrap_or_default()
    }

    /// Step the light one position along its cycle and return the new color
    pub fn advance(&mut self, intersection: &str) -> LightState {
        let next = self.status_of(intersection).next();
        self.set(intersection, next);
        next
    }

    /// Force a color, bypassing the cycle
    pub fn set(&mut self, intersection: &str, state: LightState) {
        match self.lights.get_mut(intersection) {
            Some(current) => *current = state,
            None => {
                self.lights.insert(IntersectionId::from(intersection), state);
            }
        }
        debug!("Light at {} set to {}", intersection, state);
    }
}
