//! Question generators, one module per puzzle family.
//!
//! Every public function follows the same signature:
//!
//! ```ignore
//! pub fn generate_<name><R: Rng>(
//!     rng: &mut R,
//!     tier: Tier,
//!     config: &QuizConfig,
//! ) -> Result<Question>
//! ```
//!
//! The generator dispatches to these via `generator.rs`.

/// Caesar encode (CE-) and decode (CD-)
pub mod cipher;
/// Definition to word (WG-)
pub mod word_guess;
