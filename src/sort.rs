use std::fmt;

use z3_sys::SortKind;

/// Classification of a term's sort, as far as the operator layer cares.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sort {
    Bool,
    Int,
    Real,
    /// IEEE floating point with the given exponent and significand widths.
    Float { ebits: u32, sbits: u32 },
    RoundingMode,
    Other,
}

impl Sort {
    pub const FLOAT64: Sort = Sort::Float { ebits: 11, sbits: 53 };

    pub(crate) fn from_kind(kind: SortKind, float_bits: impl FnOnce() -> (u32, u32)) -> Self {
        match kind {
            SortKind::Bool => Sort::Bool,
            SortKind::Int => Sort::Int,
            SortKind::Real => Sort::Real,
            SortKind::FloatingPoint => {
                let (ebits, sbits) = float_bits();
                Sort::Float { ebits, sbits }
            }
            SortKind::RoundingMode => Sort::RoundingMode,
            _ => Sort::Other,
        }
    }

    pub fn is_bool(self) -> bool {
        self == Sort::Bool
    }

    pub fn is_float(self) -> bool {
        matches!(self, Sort::Float { .. })
    }

    /// Int or Real.
    pub fn is_arith(self) -> bool {
        matches!(self, Sort::Int | Sort::Real)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Int => write!(f, "Int"),
            Sort::Real => write!(f, "Real"),
            Sort::Float { ebits, sbits } => write!(f, "(_ FloatingPoint {} {})", ebits, sbits),
            Sort::RoundingMode => write!(f, "RoundingMode"),
            Sort::Other => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kind() {
        let no_bits = || -> (u32, u32) { unreachable!() };
        assert_eq!(Sort::from_kind(SortKind::Bool, no_bits), Sort::Bool);
        assert_eq!(Sort::from_kind(SortKind::Int, no_bits), Sort::Int);
        assert_eq!(Sort::from_kind(SortKind::Real, no_bits), Sort::Real);
        assert_eq!(Sort::from_kind(SortKind::BV, no_bits), Sort::Other);
        assert_eq!(Sort::from_kind(SortKind::FloatingPoint, || (11, 53)), Sort::FLOAT64);
    }

    #[test]
    fn test_predicates() {
        assert!(Sort::Int.is_arith());
        assert!(Sort::Real.is_arith());
        assert!(!Sort::FLOAT64.is_arith());
        assert!(Sort::FLOAT64.is_float());
        assert!(Sort::Bool.is_bool());
    }

    #[test]
    fn test_display() {
        assert_eq!(Sort::FLOAT64.to_string(), "(_ FloatingPoint 11 53)");
        assert_eq!(Sort::Int.to_string(), "Int");
    }
}
