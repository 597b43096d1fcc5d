//! Arithmetic liveness challenge for dismissing the alarm.
//!
//! Dismissing from [`Stage::Approaching`](super::Stage::Approaching) should
//! require a moment of wakefulness, so a half-asleep commuter cannot swat
//! the alarm away. The tracker itself does not enforce this; the
//! presentation layer generates a challenge and only calls `stop()` once
//! [`DismissChallenge::check`] passes.

use rand::Rng;

/// Operands for the addition problem.
const OPERAND_RANGE: std::ops::RangeInclusive<u32> = 5..=19;

/// A small addition problem the user must solve to dismiss the alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissChallenge {
    a: u32,
    b: u32,
}

impl DismissChallenge {
    /// Generate a challenge with random operands.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            a: rng.gen_range(OPERAND_RANGE),
            b: rng.gen_range(OPERAND_RANGE),
        }
    }

    /// Build a challenge with fixed operands.
    pub fn with_operands(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// The problem to show the user, e.g. `"7 + 12 = ?"`.
    pub fn prompt(&self) -> String {
        format!("{} + {} = ?", self.a, self.b)
    }

    /// True when `answer` solves the challenge.
    pub fn check(&self, answer: u32) -> bool {
        answer == self.a + self.b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accepts_exactly_the_sum() {
        let challenge = DismissChallenge::with_operands(7, 12);
        assert!(challenge.check(19));
        assert!(!challenge.check(18));
        assert!(!challenge.check(20));
        assert!(!challenge.check(0));
    }

    #[test]
    fn test_prompt_format() {
        let challenge = DismissChallenge::with_operands(5, 9);
        assert_eq!(challenge.prompt(), "5 + 9 = ?");
    }

    #[test]
    fn test_generate_stays_in_range() {
        for _ in 0..100 {
            let challenge = DismissChallenge::generate();
            assert!(OPERAND_RANGE.contains(&challenge.a));
            assert!(OPERAND_RANGE.contains(&challenge.b));
        }
    }
}
