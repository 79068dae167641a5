//! Operator dispatch.
//!
//! Every operator has a single entry point taking [`Operand`]s on each side.
//! Literal operands are converted first (see [`literal`][crate::literal]),
//! then the operator is delegated to the native constructor matching the
//! operands' sort:
//!
//! - associative operators (`+`, `-`, `*`, `and`, `or`, `distinct`) go through
//!   the native n-ary constructors with a 2-element buffer;
//! - floating point `+ - * /` receive the context's shared rounding mode as
//!   their first argument;
//! - floating point comparisons use the IEEE comparison constructors,
//!   including equality: `==` is `fp.eq` and `!=` is its negation, so
//!   `-0.0 == 0.0` holds and `NaN == NaN` does not.

use std::os::raw::c_uint;

use log::trace;
use z3_sys::*;

use crate::context::Context;
use crate::error::Result;
use crate::literal::Operand;
use crate::sort::Sort;
use crate::term::Term;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Eq,
    Distinct,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Rem,
    And,
    Or,
    Xor,
    Implies,
    Iff,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NaryOp {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Distinct,
}

type NaryFn = unsafe extern "C" fn(Z3_context, c_uint, *const Z3_ast) -> Z3_ast;
type BinaryFn = unsafe extern "C" fn(Z3_context, Z3_ast, Z3_ast) -> Z3_ast;
type RoundedFn = unsafe extern "C" fn(Z3_context, Z3_ast, Z3_ast, Z3_ast) -> Z3_ast;

/// Native constructor shape of a non-IEEE operator.
enum Native {
    Nary(NaryFn),
    Binary(BinaryFn),
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Distinct => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "mod",
            BinaryOp::Rem => "rem",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Implies => "=>",
            BinaryOp::Iff => "<=>",
        }
    }

    fn native(self) -> Native {
        match self {
            BinaryOp::Distinct => Native::Nary(Z3_mk_distinct),
            BinaryOp::Add => Native::Nary(Z3_mk_add),
            BinaryOp::Sub => Native::Nary(Z3_mk_sub),
            BinaryOp::Mul => Native::Nary(Z3_mk_mul),
            BinaryOp::And => Native::Nary(Z3_mk_and),
            BinaryOp::Or => Native::Nary(Z3_mk_or),
            BinaryOp::Eq => Native::Binary(Z3_mk_eq),
            BinaryOp::Lt => Native::Binary(Z3_mk_lt),
            BinaryOp::Le => Native::Binary(Z3_mk_le),
            BinaryOp::Gt => Native::Binary(Z3_mk_gt),
            BinaryOp::Ge => Native::Binary(Z3_mk_ge),
            BinaryOp::Div => Native::Binary(Z3_mk_div),
            BinaryOp::Mod => Native::Binary(Z3_mk_mod),
            BinaryOp::Rem => Native::Binary(Z3_mk_rem),
            BinaryOp::Xor => Native::Binary(Z3_mk_xor),
            BinaryOp::Implies => Native::Binary(Z3_mk_implies),
            BinaryOp::Iff => Native::Binary(Z3_mk_iff),
        }
    }

    fn float_rounded(self) -> Option<RoundedFn> {
        match self {
            BinaryOp::Add => Some(Z3_mk_fpa_add as RoundedFn),
            BinaryOp::Sub => Some(Z3_mk_fpa_sub as RoundedFn),
            BinaryOp::Mul => Some(Z3_mk_fpa_mul as RoundedFn),
            BinaryOp::Div => Some(Z3_mk_fpa_div as RoundedFn),
            _ => None,
        }
    }

    fn float_binary(self) -> Option<BinaryFn> {
        match self {
            BinaryOp::Eq => Some(Z3_mk_fpa_eq as BinaryFn),
            BinaryOp::Lt => Some(Z3_mk_fpa_lt as BinaryFn),
            BinaryOp::Le => Some(Z3_mk_fpa_leq as BinaryFn),
            BinaryOp::Gt => Some(Z3_mk_fpa_gt as BinaryFn),
            BinaryOp::Ge => Some(Z3_mk_fpa_geq as BinaryFn),
            BinaryOp::Mod | BinaryOp::Rem => Some(Z3_mk_fpa_rem as BinaryFn),
            _ => None,
        }
    }
}

impl NaryOp {
    fn native(self) -> NaryFn {
        match self {
            NaryOp::And => Z3_mk_and as NaryFn,
            NaryOp::Or => Z3_mk_or,
            NaryOp::Add => Z3_mk_add,
            NaryOp::Sub => Z3_mk_sub,
            NaryOp::Mul => Z3_mk_mul,
            NaryOp::Distinct => Z3_mk_distinct,
        }
    }

    fn as_binary(self) -> BinaryOp {
        match self {
            NaryOp::And => BinaryOp::And,
            NaryOp::Or => BinaryOp::Or,
            NaryOp::Add => BinaryOp::Add,
            NaryOp::Sub => BinaryOp::Sub,
            NaryOp::Mul => BinaryOp::Mul,
            NaryOp::Distinct => BinaryOp::Distinct,
        }
    }
}

impl Context {
    /// Converts both operands and applies a binary operator.
    ///
    /// When both operands are literals, each is converted at its default sort.
    pub fn apply<'a>(
        &'a self,
        op: BinaryOp,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Term<'a>> {
        let (lhs_op, rhs_op) = (lhs.into(), rhs.into());
        let lhs = self.to_term(lhs_op, rhs_op.as_term())?;
        let rhs = self.to_term(rhs_op, lhs_op.as_term())?;
        trace!("apply({} {} {})", lhs, op.symbol(), rhs);

        let float = lhs.sort()?.is_float() || rhs.sort()?.is_float();
        if float {
            if let Some(f) = op.float_rounded() {
                let rm = self.rounding_mode().as_raw();
                return self.mk_term(|z3| unsafe { f(z3, rm, lhs.as_raw(), rhs.as_raw()) });
            }
            if let Some(f) = op.float_binary() {
                return self.mk_term(|z3| unsafe { f(z3, lhs.as_raw(), rhs.as_raw()) });
            }
            if op == BinaryOp::Distinct {
                let eq = self.apply(BinaryOp::Eq, lhs, rhs)?;
                return self.apply_unary(UnaryOp::Not, eq);
            }
        }

        match op.native() {
            Native::Nary(f) => {
                let args = [lhs.as_raw(), rhs.as_raw()];
                self.mk_term(|z3| unsafe { f(z3, 2, args.as_ptr()) })
            }
            Native::Binary(f) => self.mk_term(|z3| unsafe { f(z3, lhs.as_raw(), rhs.as_raw()) }),
        }
    }

    pub fn apply_unary<'a>(&'a self, op: UnaryOp, arg: impl Into<Operand<'a>>) -> Result<Term<'a>> {
        let arg = self.to_term(arg.into(), None)?;
        trace!("apply({:?} {})", op, arg);
        match op {
            UnaryOp::Not => self.mk_term(|z3| unsafe { Z3_mk_not(z3, arg.as_raw()) }),
            UnaryOp::Neg => {
                if arg.sort()?.is_float() {
                    self.mk_term(|z3| unsafe { Z3_mk_fpa_neg(z3, arg.as_raw()) })
                } else {
                    self.mk_term(|z3| unsafe { Z3_mk_unary_minus(z3, arg.as_raw()) })
                }
            }
        }
    }

    /// Applies an associative operator to any number of operands.
    ///
    /// Literals follow the sort of the first term operand. Floating point
    /// arithmetic is folded left through [`Context::apply`], since the native
    /// IEEE constructors are binary. Floating point `Distinct` is the
    /// conjunction of pairwise IEEE disequalities.
    pub fn apply_nary<'a, I>(&'a self, op: NaryOp, args: I) -> Result<Term<'a>>
    where
        I: IntoIterator,
        I::Item: Into<Operand<'a>>,
    {
        let args: Vec<Operand<'a>> = args.into_iter().map(Into::into).collect();
        let peer = args.iter().find_map(|a| a.as_term());
        let terms = args
            .into_iter()
            .map(|a| self.to_term(a, peer))
            .collect::<Result<Vec<_>>>()?;

        let float = peer_is_float(peer)?;
        match terms.as_slice() {
            [] => match op {
                NaryOp::And | NaryOp::Distinct => self.lit(true),
                NaryOp::Or => self.lit(false),
                NaryOp::Add | NaryOp::Sub => self.lit(0),
                NaryOp::Mul => self.lit(1),
            },
            [single] if op != NaryOp::Distinct => Ok(*single),
            [first, rest @ ..] if float && op != NaryOp::Distinct => {
                rest.iter()
                    .try_fold(*first, |acc, t| self.apply(op.as_binary(), acc, *t))
            }
            [_, ..] if float => {
                let mut pairs = Vec::new();
                for (i, a) in terms.iter().enumerate() {
                    for b in &terms[i + 1..] {
                        pairs.push(self.apply(BinaryOp::Distinct, *a, *b)?);
                    }
                }
                self.apply_nary(NaryOp::And, pairs)
            }
            _ => {
                let raw: Vec<Z3_ast> = terms.iter().map(|t| t.as_raw()).collect();
                let f = op.native();
                self.mk_term(|z3| unsafe { f(z3, raw.len() as c_uint, raw.as_ptr()) })
            }
        }
    }

    /// If-then-else.
    pub fn ite<'a>(
        &'a self,
        cond: impl Into<Operand<'a>>,
        then: impl Into<Operand<'a>>,
        other: impl Into<Operand<'a>>,
    ) -> Result<Term<'a>> {
        let cond = self.to_term(cond.into(), None)?;
        let (then_op, other_op) = (then.into(), other.into());
        let then = self.to_term(then_op, other_op.as_term())?;
        let other = self.to_term(other_op, then_op.as_term())?;
        self.mk_term(|z3| unsafe { Z3_mk_ite(z3, cond.as_raw(), then.as_raw(), other.as_raw()) })
    }
}

fn peer_is_float(peer: Option<Term<'_>>) -> Result<bool> {
    match peer {
        Some(t) => Ok(t.sort()?.is_float()),
        None => Ok(false),
    }
}
