use crate::api::types::Impact;

/// Impacts reported by the combat layer, waiting for the next fixed step.
///
/// The combat layer may push at any point of a frame; the runner drains the
/// queue between physics steps so bodies are never created or destroyed
/// while the solver is running.
pub struct ImpactQueue {
    impacts: Vec<Impact>,
}

impl ImpactQueue {
    pub fn new() -> Self {
        Self {
            impacts: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, impact: Impact) {
        self.impacts.push(impact);
    }

    /// Drain all pending impacts in push order.
    pub fn drain(&mut self) -> Vec<Impact> {
        std::mem::take(&mut self.impacts)
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.impacts.len()
    }
}

impl Default for ImpactQueue {
    fn default() -> Self {
        Self::new()
    }
}
