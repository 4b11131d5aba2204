//! Validation errors shared by every address type.
//!
//! Both variants carry the offending input rendered as text, so the caller
//! can report exactly what was rejected.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Raised at construction or parse time; there is no repair path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Malformed address text, out-of-range value or prefix length,
    /// arithmetic past the address space, or a range with `first > last`.
    #[error("invalid IP address: {0}")]
    Ip(String),
    /// Malformed mask text, out-of-range value, non-contiguous bits, or a
    /// `/prefix` given together with an explicit netmask.
    #[error("invalid mask: {0}")]
    Mask(String),
}

impl ValidationError {
    pub(crate) fn ip(input: impl ToString) -> Self {
        let input = input.to_string();
        log::debug!("rejecting address {input:?}");
        ValidationError::Ip(input)
    }

    pub(crate) fn mask(input: impl ToString) -> Self {
        let input = input.to_string();
        log::debug!("rejecting mask {input:?}");
        ValidationError::Mask(input)
    }

    /// The input that failed validation.
    pub fn input(&self) -> &str {
        match self {
            ValidationError::Ip(input) | ValidationError::Mask(input) => input,
        }
    }
}
