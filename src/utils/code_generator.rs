//! Short code generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 7;

/// Generates a random short code.
///
/// Codes are [`CODE_LENGTH`] characters drawn uniformly from `[A-Za-z0-9]`,
/// giving 62^7 possible values. Uniqueness is enforced by the caller.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}
