//! Confidence Gate - last-valid sample persistence
//!
//! When a joint's landmarks drop below the confidence threshold, the last
//! good sample is reused for a short window instead of dropping the joint.
//! This bridges brief detector dropouts (motion blur at impact).

/// Last valid sample for one joint, with the time it was measured
pub struct ConfidenceGate<T> {
    last_valid: Option<(T, f64)>,
}

impl<T: Clone> ConfidenceGate<T> {
    pub fn new() -> Self {
        Self { last_valid: None }
    }

    /// Good data - remember it
    pub fn store(&mut self, sample: T, timestamp: f64) {
        self.last_valid = Some((sample, timestamp));
    }

    /// Bad data - reuse the stored sample if it is younger than `window_ms`
    pub fn recall(&self, timestamp: f64, window_ms: f64) -> Option<T> {
        match &self.last_valid {
            Some((sample, stored)) if timestamp - stored < window_ms => Some(sample.clone()),
            _ => None,
        }
    }
}

impl<T: Clone> Default for ConfidenceGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gate_recalls_nothing() {
        let gate: ConfidenceGate<f32> = ConfidenceGate::new();
        assert_eq!(gate.recall(0.0, 500.0), None);
    }

    #[test]
    fn test_window_is_exclusive() {
        let mut gate = ConfidenceGate::new();
        gate.store(42.0_f32, 1000.0);
        assert_eq!(gate.recall(1499.0, 500.0), Some(42.0));
        assert_eq!(gate.recall(1500.0, 500.0), None);
        assert_eq!(gate.recall(1501.0, 500.0), None);
        // Finish window
        assert_eq!(gate.recall(1999.0, 1000.0), Some(42.0));
    }

    #[test]
    fn test_store_replaces_previous_sample() {
        let mut gate = ConfidenceGate::new();
        gate.store(1.0_f32, 0.0);
        gate.store(2.0_f32, 100.0);
        assert_eq!(gate.recall(150.0, 500.0), Some(2.0));
        // Window counts from the newer sample
        assert_eq!(gate.recall(550.0, 500.0), Some(2.0));
        assert_eq!(gate.recall(600.0, 500.0), None);
    }
}
