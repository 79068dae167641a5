//! Operator overloading.
//!
//! Applying a Rust operator to a [`Term`] does not call into the solver right
//! away. It builds an [`Expr`], which is lowered by [`Context::build`] (or by
//! any facade method taking `impl Into<Expr>`). This keeps native failures,
//! such as sort mismatches, in a `Result` instead of a panic inside `Add::add`.
//!
//! ```no_run
//! use z3_rs::context::Context;
//!
//! let ctx = Context::new()?;
//! let x = ctx.int_const("x")?;
//! let y = ctx.int_const("y")?;
//!
//! // Terms and literals mix freely, on either side.
//! let e = (3 * x + y - 1)._eq(2 * y);
//! let t = ctx.build(e)?;
//! println!("{}", t);
//! # Ok::<(), z3_rs::error::Error>(())
//! ```
//!
//! | operator | meaning |
//! |---|---|
//! | `+ - * /` | arithmetic (IEEE with the shared rounding mode on floats) |
//! | `%` | `mod` on integers, IEEE remainder on floats |
//! | `-x` | negation |
//! | `!p` | logical not |
//! | `& \| ^` | logical and, or, xor |
//! | `_eq ne lt le gt ge` | comparisons |
//! | `implies iff ite` | other connectives |

use std::fmt::{Display, Formatter};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

use crate::context::Context;
use crate::error::Result;
use crate::literal::Operand;
use crate::ops::{BinaryOp, UnaryOp};
use crate::term::Term;

#[derive(Debug, Clone)]
pub enum Expr<'ctx> {
    Leaf(Operand<'ctx>),
    Unary(UnaryOp, Box<Expr<'ctx>>),
    Binary(BinaryOp, Box<Expr<'ctx>>, Box<Expr<'ctx>>),
    Ite(Box<Expr<'ctx>>, Box<Expr<'ctx>>, Box<Expr<'ctx>>),
}

impl<'ctx> Expr<'ctx> {
    pub fn unary(op: UnaryOp, arg: impl Into<Expr<'ctx>>) -> Self {
        Expr::Unary(op, Box::new(arg.into()))
    }

    pub fn binary(op: BinaryOp, lhs: impl Into<Expr<'ctx>>, rhs: impl Into<Expr<'ctx>>) -> Self {
        Expr::Binary(op, Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Number of operator nodes.
    pub fn size(&self) -> usize {
        match self {
            Expr::Leaf(_) => 0,
            Expr::Unary(_, arg) => 1 + arg.size(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
            Expr::Ite(c, t, e) => 1 + c.size() + t.size() + e.size(),
        }
    }
}

impl<'ctx> From<Operand<'ctx>> for Expr<'ctx> {
    fn from(operand: Operand<'ctx>) -> Self {
        Expr::Leaf(operand)
    }
}

impl<'ctx> From<Term<'ctx>> for Expr<'ctx> {
    fn from(term: Term<'ctx>) -> Self {
        Expr::Leaf(Operand::Term(term))
    }
}

macro_rules! leaf_from {
    ($($T:ty),*) => {
        $(
            impl<'ctx> From<$T> for Expr<'ctx> {
                fn from(value: $T) -> Self {
                    Expr::Leaf(Operand::from(value))
                }
            }
        )*
    };
}

leaf_from!(bool, i32, i64, u32, f32, f64);

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Leaf(Operand::Term(t)) => write!(f, "{}", t),
            Expr::Leaf(Operand::Bool(b)) => write!(f, "{}", b),
            Expr::Leaf(Operand::Int(v)) => write!(f, "{}", v),
            Expr::Leaf(Operand::Float(v)) => write!(f, "{:?}", v),
            Expr::Unary(UnaryOp::Not, arg) => write!(f, "!{}", arg),
            Expr::Unary(UnaryOp::Neg, arg) => write!(f, "-{}", arg),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Ite(c, t, e) => write!(f, "(if {} then {} else {})", c, t, e),
        }
    }
}

impl Context {
    /// Lowers an expression to a term through the operator dispatch.
    pub fn build<'a>(&'a self, expr: impl Into<Expr<'a>>) -> Result<Term<'a>> {
        let operand = self.lower(expr.into())?;
        self.to_term(operand, None)
    }

    // Literal leaves stay literals so that the dispatch can pick their sort from the peer.
    fn lower<'a>(&'a self, expr: Expr<'a>) -> Result<Operand<'a>> {
        let term = match expr {
            Expr::Leaf(operand) => return Ok(operand),
            Expr::Unary(op, arg) => {
                let arg = self.lower(*arg)?;
                self.apply_unary(op, arg)?
            }
            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.lower(*lhs)?;
                let rhs = self.lower(*rhs)?;
                self.apply(op, lhs, rhs)?
            }
            Expr::Ite(c, t, e) => {
                let c = self.lower(*c)?;
                let t = self.lower(*t)?;
                let e = self.lower(*e)?;
                self.ite(c, t, e)?
            }
        };
        Ok(Operand::Term(term))
    }
}

macro_rules! connectives {
    ($Ty:ident) => {
        impl<'ctx> $Ty<'ctx> {
            pub fn _eq(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Eq, self, rhs)
            }
            pub fn ne(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Distinct, self, rhs)
            }
            pub fn lt(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Lt, self, rhs)
            }
            pub fn le(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Le, self, rhs)
            }
            pub fn gt(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Gt, self, rhs)
            }
            pub fn ge(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Ge, self, rhs)
            }
            pub fn implies(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Implies, self, rhs)
            }
            pub fn iff(self, rhs: impl Into<Expr<'ctx>>) -> Expr<'ctx> {
                Expr::binary(BinaryOp::Iff, self, rhs)
            }
            /// `if self then then_ else else_`.
            pub fn ite(
                self,
                then_: impl Into<Expr<'ctx>>,
                else_: impl Into<Expr<'ctx>>,
            ) -> Expr<'ctx> {
                Expr::Ite(Box::new(self.into()), Box::new(then_.into()), Box::new(else_.into()))
            }
        }
    };
}

connectives!(Term);
connectives!(Expr);

macro_rules! binary_operator {
    ($Trait:ident, $method:ident, $op:expr, [$($Lit:ty),*]) => {
        impl<'ctx, R: Into<Expr<'ctx>>> $Trait<R> for Term<'ctx> {
            type Output = Expr<'ctx>;

            fn $method(self, rhs: R) -> Self::Output {
                Expr::binary($op, self, rhs)
            }
        }

        impl<'ctx, R: Into<Expr<'ctx>>> $Trait<R> for Expr<'ctx> {
            type Output = Expr<'ctx>;

            fn $method(self, rhs: R) -> Self::Output {
                Expr::binary($op, self, rhs)
            }
        }

        $(
            impl<'ctx> $Trait<Term<'ctx>> for $Lit {
                type Output = Expr<'ctx>;

                fn $method(self, rhs: Term<'ctx>) -> Self::Output {
                    Expr::binary($op, self, rhs)
                }
            }

            impl<'ctx> $Trait<Expr<'ctx>> for $Lit {
                type Output = Expr<'ctx>;

                fn $method(self, rhs: Expr<'ctx>) -> Self::Output {
                    Expr::binary($op, self, rhs)
                }
            }
        )*
    };
}

binary_operator!(Add, add, BinaryOp::Add, [i32, i64, f32, f64]);
binary_operator!(Sub, sub, BinaryOp::Sub, [i32, i64, f32, f64]);
binary_operator!(Mul, mul, BinaryOp::Mul, [i32, i64, f32, f64]);
binary_operator!(Div, div, BinaryOp::Div, [i32, i64, f32, f64]);
binary_operator!(Rem, rem, BinaryOp::Mod, [i32, i64, f32, f64]);
binary_operator!(BitAnd, bitand, BinaryOp::And, [bool]);
binary_operator!(BitOr, bitor, BinaryOp::Or, [bool]);
binary_operator!(BitXor, bitxor, BinaryOp::Xor, [bool]);

macro_rules! unary_operator {
    ($Trait:ident, $method:ident, $op:expr) => {
        impl<'ctx> $Trait for Term<'ctx> {
            type Output = Expr<'ctx>;

            fn $method(self) -> Self::Output {
                Expr::unary($op, self)
            }
        }

        impl<'ctx> $Trait for Expr<'ctx> {
            type Output = Expr<'ctx>;

            fn $method(self) -> Self::Output {
                Expr::unary($op, self)
            }
        }
    };
}

unary_operator!(Neg, neg, UnaryOp::Neg);
unary_operator!(Not, not, UnaryOp::Not);
