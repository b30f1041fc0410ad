//! Timer bank - independent elapsed-time counters
//!
//! The selection automaton and the smoother key every hysteresis decision
//! off one of these counters. All of them advance together once per tick;
//! each is reset independently when its guard fires.

/// Elapsed-seconds counters used as debounce / hysteresis guards.
///
/// INVARIANT: counters only move forward between their own resets.
#[derive(Debug, Clone, Default)]
pub struct TimerBank {
    /// Since the last framing-mode change (the global swap lock).
    global: f32,
    /// Since the last gesture evaluation (throttles gesture checks).
    gesture: f32,
    /// Since the last per-action event (side swaps, neutral framing).
    action: f32,
    /// Since a manual override was requested.
    manual: f32,
}

impl TimerBank {
    pub fn new() -> Self {
        TimerBank::default()
    }

    /// Advance every counter by one frame delta.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.global += dt;
        self.gesture += dt;
        self.action += dt;
        self.manual += dt;
    }

    pub fn global(&self) -> f32 {
        self.global
    }

    pub fn gesture(&self) -> f32 {
        self.gesture
    }

    pub fn action(&self) -> f32 {
        self.action
    }

    pub fn manual(&self) -> f32 {
        self.manual
    }

    pub fn reset_global(&mut self) {
        self.global = 0.0;
    }

    pub fn reset_gesture(&mut self) {
        self.gesture = 0.0;
    }

    pub fn reset_action(&mut self) {
        self.action = 0.0;
    }

    pub fn reset_manual(&mut self) {
        self.manual = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_advance_together() {
        let mut bank = TimerBank::new();
        bank.advance(0.5);
        bank.advance(0.25);
        assert!((bank.global() - 0.75).abs() < 1e-6);
        assert!((bank.action() - 0.75).abs() < 1e-6);
        assert!((bank.manual() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn resets_are_independent() {
        let mut bank = TimerBank::new();
        bank.advance(1.0);
        bank.reset_action();
        assert_eq!(bank.action(), 0.0);
        assert!((bank.global() - 1.0).abs() < 1e-6);
        assert!((bank.gesture() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut bank = TimerBank::new();
        bank.advance(1.0);
        bank.advance(-5.0);
        assert!((bank.global() - 1.0).abs() < 1e-6);
    }
}
