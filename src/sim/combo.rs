//! Combo streak and score multiplier

use serde::{Deserialize, Serialize};

/// Multiplier for a streak: one step per `per_step` hits, capped at `cap`
#[inline]
pub fn combo_multiplier(streak: u32, per_step: u32, cap: u32) -> u32 {
    (1 + streak / per_step.max(1)).min(cap)
}

/// Consecutive qualifying hits within a decay window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub streak: u32,
    /// Seconds left before the streak lapses
    pub timer: f32,
}

impl Combo {
    /// Count a qualifying hit, refresh the window and return the multiplier
    /// that applies to this hit
    pub fn register_hit(&mut self, window: f32, per_step: u32, cap: u32) -> u32 {
        self.streak += 1;
        self.timer = window;
        combo_multiplier(self.streak, per_step, cap)
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }

    /// Run the decay timer. Returns true if the streak lapsed this call.
    pub fn decay(&mut self, dt: f32) -> bool {
        if self.timer > 0.0 {
            self.timer -= dt;
            if self.timer <= 0.0 {
                let lapsed = self.streak > 0;
                self.streak = 0;
                return lapsed;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(combo_multiplier(0, 5, 5), 1);
        assert_eq!(combo_multiplier(4, 5, 5), 1);
        assert_eq!(combo_multiplier(5, 5, 5), 2);
        assert_eq!(combo_multiplier(9, 5, 5), 2);
        assert_eq!(combo_multiplier(10, 5, 5), 3);
        assert_eq!(combo_multiplier(19, 5, 5), 4);
        assert_eq!(combo_multiplier(20, 5, 5), 5);
        assert_eq!(combo_multiplier(1000, 5, 5), 5);
    }

    #[test]
    fn test_fifth_hit_doubles() {
        let mut combo = Combo::default();
        let mults: Vec<u32> = (0..5).map(|_| combo.register_hit(2.5, 5, 5)).collect();
        assert_eq!(mults, vec![1, 1, 1, 1, 2]);
        assert_eq!(combo.streak, 5);
    }

    #[test]
    fn test_decay_lapses_streak() {
        let mut combo = Combo::default();
        combo.register_hit(2.5, 5, 5);
        assert!(!combo.decay(2.0));
        assert_eq!(combo.streak, 1);
        assert!(combo.decay(0.6));
        assert_eq!(combo.streak, 0);
        // Idle timer does nothing
        assert!(!combo.decay(10.0));
    }

    proptest! {
        #[test]
        fn prop_multiplier_is_step_function(streak in 0u32..10_000) {
            let expected = (1 + streak / 5).min(5);
            prop_assert_eq!(combo_multiplier(streak, 5, 5), expected);
        }

        #[test]
        fn prop_multiplier_monotonic(streak in 0u32..10_000) {
            prop_assert!(combo_multiplier(streak + 1, 5, 5) >= combo_multiplier(streak, 5, 5));
        }
    }
}
