use std::ffi::NulError;

use thiserror::Error;
use z3_sys::ErrorCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Any failure reported by the native library.
    #[error("native error ({code:?}): {message}")]
    Native { code: ErrorCode, message: String },

    #[error("UNSAT")]
    Unsat,

    #[error("UNKNOWN: {reason}")]
    Unknown { reason: String },

    /// The term could not be evaluated under the model.
    #[error("cannot evaluate `{term}` under the model")]
    Eval { term: String },

    /// The evaluated term does not have the requested host type.
    #[error("`{value}` is not a {expected} value")]
    Value { value: String, expected: &'static str },

    #[error("invalid symbol name: {0}")]
    Name(#[from] NulError),

    #[error("failed to create native context")]
    Context,
}

impl Error {
    pub fn is_unsat(&self) -> bool {
        matches!(self, Error::Unsat)
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Error::Native { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsat_message() {
        assert_eq!(Error::Unsat.to_string(), "UNSAT");
        assert!(Error::Unsat.is_unsat());
        assert!(!Error::Unsat.is_native());
    }

    #[test]
    fn test_native_message() {
        let err = Error::Native {
            code: ErrorCode::SortError,
            message: "sort mismatch".to_string(),
        };
        assert!(err.is_native());
        assert_eq!(err.to_string(), "native error (SortError): sort mismatch");
    }

    #[test]
    fn test_name_from_nul() {
        let nul = std::ffi::CString::new("a\0b").unwrap_err();
        let err: Error = nul.into();
        assert!(matches!(err, Error::Name(_)));
    }
}
