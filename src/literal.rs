//! Host literals as solver terms.
//!
//! An [`Operand`] is either an existing [`Term`] or a Rust literal that still
//! has to be converted. Conversion happens as late as possible, when the
//! operator it feeds into is known, so that a literal can follow the sort of
//! the term on the other side:
//!
//! | literal | peer sort | resulting term |
//! |---|---|---|
//! | `bool` | any | `true` / `false` |
//! | integer | none, Int, Bool | Int numeral |
//! | integer | Real | Real numeral |
//! | integer | Float | floating point numeral of the peer's precision |
//! | float | Float | floating point numeral of the peer's precision |
//! | float | anything else | 64-bit floating point numeral |
//!
//! No range checks are done: integers are passed as `i64`.

use std::ptr;

use log::trace;
use z3_sys::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::sort::Sort;
use crate::term::Term;

#[derive(Debug, Copy, Clone)]
pub enum Operand<'ctx> {
    Term(Term<'ctx>),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl<'ctx> Operand<'ctx> {
    pub fn is_literal(&self) -> bool {
        !matches!(self, Operand::Term(_))
    }

    pub fn as_term(&self) -> Option<Term<'ctx>> {
        match self {
            Operand::Term(t) => Some(*t),
            _ => None,
        }
    }
}

impl<'ctx> From<Term<'ctx>> for Operand<'ctx> {
    fn from(t: Term<'ctx>) -> Self {
        Operand::Term(t)
    }
}

impl From<bool> for Operand<'_> {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<i32> for Operand<'_> {
    fn from(v: i32) -> Self {
        Operand::Int(v as i64)
    }
}

impl From<i64> for Operand<'_> {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<u32> for Operand<'_> {
    fn from(v: u32) -> Self {
        Operand::Int(v as i64)
    }
}

impl From<f32> for Operand<'_> {
    fn from(v: f32) -> Self {
        Operand::Float(v as f64)
    }
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Float(v)
    }
}

impl Context {
    /// Converts a literal to a term at its default sort.
    pub fn lit<'a>(&'a self, value: impl Into<Operand<'a>>) -> Result<Term<'a>> {
        self.to_term(value.into(), None)
    }

    /// Converts an operand to a term, following the sort of `peer` for numeric literals.
    pub(crate) fn to_term<'a>(
        &'a self,
        operand: Operand<'a>,
        peer: Option<Term<'a>>,
    ) -> Result<Term<'a>> {
        let peer = match peer {
            Some(t) if operand.is_literal() => Some((t.raw_sort()?, t.sort()?)),
            _ => None,
        };

        match operand {
            Operand::Term(t) => {
                if !ptr::eq(t.context(), self) {
                    return Err(Error::Native {
                        code: ErrorCode::InvalidArg,
                        message: "term belongs to another context".to_string(),
                    });
                }
                Ok(t)
            }
            Operand::Bool(b) => {
                trace!("lit(bool = {})", b);
                if b {
                    self.mk_term(|z3| unsafe { Z3_mk_true(z3) })
                } else {
                    self.mk_term(|z3| unsafe { Z3_mk_false(z3) })
                }
            }
            Operand::Int(v) => {
                trace!("lit(int = {})", v);
                match peer {
                    Some((sort, Sort::Real)) => {
                        self.mk_term(|z3| unsafe { Z3_mk_int64(z3, v, sort) })
                    }
                    Some((sort, Sort::Float { .. })) => {
                        self.mk_term(|z3| unsafe { Z3_mk_fpa_numeral_double(z3, v as f64, sort) })
                    }
                    _ => {
                        let sort = self.checked(|z3| unsafe { Z3_mk_int_sort(z3) })?;
                        self.mk_term(|z3| unsafe { Z3_mk_int64(z3, v, sort) })
                    }
                }
            }
            Operand::Float(v) => {
                trace!("lit(float = {})", v);
                let sort = match peer {
                    Some((sort, Sort::Float { .. })) => sort,
                    _ => self.checked(|z3| unsafe { Z3_mk_fpa_sort_double(z3) })?,
                };
                self.mk_term(|z3| unsafe { Z3_mk_fpa_numeral_double(z3, v, sort) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_default_sorts() {
        let ctx = Context::new().unwrap();
        assert_eq!(ctx.lit(true).unwrap().sort().unwrap(), Sort::Bool);
        assert_eq!(ctx.lit(42).unwrap().sort().unwrap(), Sort::Int);
        assert_eq!(ctx.lit(42i64).unwrap().sort().unwrap(), Sort::Int);
        assert_eq!(ctx.lit(1.5).unwrap().sort().unwrap(), Sort::FLOAT64);
        assert_eq!(ctx.lit(1.5f32).unwrap().sort().unwrap(), Sort::FLOAT64);
    }

    #[test]
    fn test_render() {
        let ctx = Context::new().unwrap();
        assert_eq!(ctx.lit(true).unwrap().to_string(), "true");
        assert_eq!(ctx.lit(false).unwrap().to_string(), "false");
        assert_eq!(ctx.lit(7).unwrap().to_string(), "7");
    }

    #[test]
    fn test_peer_sort() {
        let ctx = Context::new().unwrap();

        let r = ctx.real_const("r").unwrap();
        let t = ctx.to_term(Operand::Int(2), Some(r)).unwrap();
        assert_eq!(t.sort().unwrap(), Sort::Real);

        let f = ctx.float_const("f").unwrap();
        let t = ctx.to_term(Operand::Int(2), Some(f)).unwrap();
        assert_eq!(t.sort().unwrap(), Sort::FLOAT64);

        let x = ctx.int_const("x").unwrap();
        let t = ctx.to_term(Operand::Int(2), Some(x)).unwrap();
        assert_eq!(t.sort().unwrap(), Sort::Int);
        let t = ctx.to_term(Operand::Float(2.0), Some(x)).unwrap();
        assert_eq!(t.sort().unwrap(), Sort::FLOAT64);
    }

    #[test]
    fn test_term_passthrough() {
        let ctx = Context::new().unwrap();
        let x = ctx.int_const("x").unwrap();
        let t = ctx.to_term(Operand::from(x), None).unwrap();
        assert!(t.same(&x));
        assert!(!Operand::from(x).is_literal());
        assert!(Operand::from(1).is_literal());
        assert!(Operand::from(x).as_term().is_some());
    }

    #[test]
    fn test_foreign_context() {
        let ctx1 = Context::new().unwrap();
        let ctx2 = Context::new().unwrap();
        let x = ctx1.int_const("x").unwrap();
        let res = ctx2.to_term(Operand::from(x), None);
        assert!(matches!(res, Err(Error::Native { .. })));
    }
}
