pub mod random;

pub use random::{RandomGenerator, CODE_LENGTH};

use burrow_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is not part of the contract: the registry checks the drawn
/// code against its live records and asks again on a collision.
pub trait Generator: Send + Sync + 'static {
    /// Draws the next candidate short code.
    fn generate(&self) -> ShortCode;
}
