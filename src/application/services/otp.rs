//! One-time code generation

use rand::Rng;

/// Source of one-time codes. Behind a trait so tests can pin the code.
pub trait OtpGenerator: Send + Sync {
    /// Produce a 6-digit code
    fn generate(&self) -> String;
}

/// Uniform random 6-digit codes
pub struct RandomOtpGenerator;

impl OtpGenerator for RandomOtpGenerator {
    fn generate(&self) -> String {
        format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Hands out codes from a fixed list, repeating the last one.
    pub struct FixedOtpGenerator {
        codes: Mutex<Vec<String>>,
    }

    impl FixedOtpGenerator {
        pub fn new(codes: &[&str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().rev().map(|c| c.to_string()).collect()),
            }
        }
    }

    impl OtpGenerator for FixedOtpGenerator {
        fn generate(&self) -> String {
            let mut codes = self.codes.lock().unwrap();
            if codes.len() > 1 {
                codes.pop().unwrap()
            } else {
                codes.last().cloned().unwrap_or_else(|| "000000".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_codes_are_six_digits() {
        let gen = RandomOtpGenerator;
        for _ in 0..50 {
            let code = gen.generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn fixed_generator_replays_in_order_then_repeats() {
        let gen = testing::FixedOtpGenerator::new(&["111111", "222222"]);
        assert_eq!(gen.generate(), "111111");
        assert_eq!(gen.generate(), "222222");
        assert_eq!(gen.generate(), "222222");
    }
}
