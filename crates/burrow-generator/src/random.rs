use crate::Generator;
use burrow_core::shortcode::ALPHABET;
use burrow_core::ShortCode;
use rand::Rng;

/// Default number of characters in a generated code.
pub const CODE_LENGTH: usize = 6;

/// Draws fixed-length codes uniformly from the 62-character alphabet.
///
/// Every character is sampled independently from the thread-local RNG,
/// giving `62^length` possible codes.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of [`CODE_LENGTH`] characters.
    pub fn new() -> Self {
        Self::with_length(CODE_LENGTH)
    }

    /// Creates a generator producing codes of `length` characters.
    ///
    /// `length` is clamped to `1..=32`, the range a [`ShortCode`] accepts.
    pub fn with_length(length: usize) -> Self {
        Self {
            length: length.clamp(1, 32),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> ShortCode {
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        self.draw(&mut rand::rng())
    }
}
