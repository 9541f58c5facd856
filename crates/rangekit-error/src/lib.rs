//! Error types for the rangekit data structures.
//!
//! Every fallible operation across the rangekit crates reports one of the
//! variants below. Arguments are validated eagerly at the call boundary;
//! nothing is clamped or silently corrected.

use std::fmt;

/// Argument error reported by a rangekit tree operation.
///
/// Each variant carries the offending arguments so callers can log or
/// correct them without re-deriving context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeError {
    /// Construction size cannot be represented by the backing storage.
    InvalidSize { requested: usize },
    /// Seed sequence length does not match the declared tree size.
    LengthMismatch { expected: usize, actual: usize },
    /// Point operation index outside the valid index range.
    IndexOutOfRange { index: usize, len: usize },
    /// Range operation with `left > right` or a bound past the end.
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::InvalidSize { requested } => {
                write!(f, "invalid size: {} elements cannot be stored", requested)
            }
            RangeError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "length mismatch: expected {} elements, got {}",
                    expected, actual
                )
            }
            RangeError::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "index out of range: the len is {} but the index is {}",
                    len, index
                )
            }
            RangeError::InvalidRange { left, right, len } => {
                write!(
                    f,
                    "invalid range: [{}, {}) with len {}",
                    left, right, len
                )
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Result type alias for rangekit errors.
pub type Result<T> = std::result::Result<T, RangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_size() {
        let err = RangeError::InvalidSize {
            requested: usize::MAX,
        };
        assert!(format!("{}", err).starts_with("invalid size"));
    }

    #[test]
    fn test_display_length_mismatch() {
        let err = RangeError::LengthMismatch {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            format!("{}", err),
            "length mismatch: expected 5 elements, got 3"
        );
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = RangeError::IndexOutOfRange { index: 7, len: 5 };
        assert_eq!(
            format!("{}", err),
            "index out of range: the len is 5 but the index is 7"
        );
    }

    #[test]
    fn test_display_invalid_range() {
        let err = RangeError::InvalidRange {
            left: 4,
            right: 2,
            len: 8,
        };
        assert_eq!(format!("{}", err), "invalid range: [4, 2) with len 8");
    }

    #[test]
    fn test_anyhow_interop() -> anyhow::Result<()> {
        fn fails() -> Result<()> {
            Err(RangeError::IndexOutOfRange { index: 1, len: 0 })
        }
        let err = anyhow::Error::from(fails().unwrap_err());
        assert!(err.downcast_ref::<RangeError>().is_some());
        Ok(())
    }
}
