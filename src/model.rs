//! Models and evaluation.
//!
//! All evaluation helpers share one failure convention: a term that cannot be
//! evaluated gives [`Error::Eval`], and a value that does not fit the requested
//! host type gives [`Error::Value`].

use std::fmt::{Debug, Display, Formatter};
use std::ptr;

use log::{trace, warn};
use num_bigint::BigInt;
use z3_sys::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::term::Term;

pub struct Model<'ctx> {
    ctx: &'ctx Context,
    z3: Z3_model,
}

impl<'ctx> Model<'ctx> {
    pub(crate) fn from_raw(ctx: &'ctx Context, z3: Z3_model) -> Result<Self> {
        if z3.is_null() {
            return Err(Error::Native {
                code: ErrorCode::InvalidUsage,
                message: "no model available".to_string(),
            });
        }
        ctx.checked(|c| unsafe { Z3_model_inc_ref(c, z3) })?;
        Ok(Self { ctx, z3 })
    }

    pub fn as_raw(&self) -> Z3_model {
        self.z3
    }

    /// Evaluates a term under the model, completing the model for unconstrained constants.
    pub fn eval(&self, expr: impl Into<Expr<'ctx>>) -> Result<Term<'ctx>> {
        let term = self.ctx.build(expr)?;
        let mut value: Z3_ast = ptr::null_mut();
        let ok = self
            .ctx
            .checked(|c| unsafe { Z3_model_eval(c, self.z3, term.as_raw(), true, &mut value) })?;
        if !ok || value.is_null() {
            return Err(Error::Eval {
                term: term.to_string(),
            });
        }
        let value = Term::new(self.ctx, value);
        trace!("eval({}) = {}", term, value);
        Ok(value)
    }

    pub fn eval_bool(&self, expr: impl Into<Expr<'ctx>>) -> Result<bool> {
        let value = self.eval(expr)?;
        match self.ctx.checked(|c| unsafe { Z3_get_bool_value(c, value.as_raw()) })? {
            Z3_L_TRUE => Ok(true),
            Z3_L_FALSE => Ok(false),
            _ => Err(Error::Value {
                value: value.to_string(),
                expected: "boolean",
            }),
        }
    }

    pub fn eval_i64(&self, expr: impl Into<Expr<'ctx>>) -> Result<i64> {
        let value = self.numeral(expr, "integer")?;
        let mut n: i64 = 0;
        // Not `checked`: a numeral that does not fit also sets the error code.
        let ok = unsafe { Z3_get_numeral_int64(self.ctx.as_raw(), value.as_raw(), &mut n) };
        if !ok {
            return Err(Error::Value {
                value: value.to_string(),
                expected: "64-bit integer",
            });
        }
        Ok(n)
    }

    /// Evaluates an integer term without any width limit.
    pub fn eval_bigint(&self, expr: impl Into<Expr<'ctx>>) -> Result<BigInt> {
        let value = self.numeral(expr, "integer")?;
        let text = self
            .ctx
            .mk_string(|c| unsafe { Z3_get_numeral_string(c, value.as_raw()) })?;
        text.parse::<BigInt>().map_err(|_| Error::Value {
            value: text,
            expected: "integer",
        })
    }

    pub fn eval_f64(&self, expr: impl Into<Expr<'ctx>>) -> Result<f64> {
        let value = self.numeral(expr, "floating point")?;
        self.ctx.checked(|c| unsafe { Z3_get_numeral_double(c, value.as_raw()) })
    }

    /// Evaluates a term and renders the resulting value.
    pub fn eval_string(&self, expr: impl Into<Expr<'ctx>>) -> Result<String> {
        self.eval(expr)?.render()
    }

    fn numeral(&self, expr: impl Into<Expr<'ctx>>, expected: &'static str) -> Result<Term<'ctx>> {
        let value = self.eval(expr)?;
        let is_numeral = self
            .ctx
            .checked(|c| unsafe { Z3_is_numeral_ast(c, value.as_raw()) })?;
        if !is_numeral {
            return Err(Error::Value {
                value: value.to_string(),
                expected,
            });
        }
        Ok(value)
    }

    /// Interpretations of all constants in the model, by name.
    pub fn assignments(&self) -> Result<Vec<(String, Term<'ctx>)>> {
        let ctx = self.ctx;
        let n = ctx.checked(|c| unsafe { Z3_model_get_num_consts(c, self.z3) })?;
        let mut res = Vec::with_capacity(n as usize);
        for i in 0..n {
            let decl = ctx.checked(|c| unsafe { Z3_model_get_const_decl(c, self.z3, i) })?;
            let symbol = ctx.checked(|c| unsafe { Z3_get_decl_name(c, decl) })?;
            let name = ctx.mk_string(|c| unsafe { Z3_get_symbol_string(c, symbol) })?;
            let value = ctx.mk_term(|c| unsafe { Z3_model_get_const_interp(c, self.z3, decl) })?;
            res.push((name, value));
        }
        Ok(res)
    }

    pub fn render(&self) -> Result<String> {
        self.ctx.mk_string(|c| unsafe { Z3_model_to_string(c, self.z3) })
    }
}

impl Drop for Model<'_> {
    fn drop(&mut self) {
        unsafe { Z3_model_dec_ref(self.ctx.as_raw(), self.z3) };
    }
}

impl Display for Model<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Ok(s) => write!(f, "{}", s),
            Err(e) => {
                warn!("failed to render model: {}", e);
                write!(f, "<model>")
            }
        }
    }
}

impl Debug for Model<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").field("z3", &self.z3).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::solver::{SatResult, Solver};

    fn trivial_model(ctx: &Context) -> Model<'_> {
        let solver = Solver::new(ctx).unwrap();
        assert_eq!(solver.check().unwrap(), SatResult::Sat);
        solver.get_model().unwrap()
    }

    #[test]
    fn test_literal_round_trip() {
        let ctx = Context::new().unwrap();
        let model = trivial_model(&ctx);

        assert_eq!(model.eval_bool(true).unwrap(), true);
        assert_eq!(model.eval_bool(false).unwrap(), false);
        for v in [0i64, 1, -1, 42, i64::MAX, i64::MIN] {
            assert_eq!(model.eval_i64(v).unwrap(), v);
        }
        for v in [0.0, 1.5, -2.25, 1e10] {
            assert_eq!(model.eval_f64(v).unwrap(), v);
        }
    }

    #[test]
    fn test_eval_expression() {
        let ctx = Context::new().unwrap();
        let model = trivial_model(&ctx);
        assert_eq!(model.eval_i64(ctx.lit(2).unwrap() * 21).unwrap(), 42);
        assert_eq!(model.eval_string(ctx.lit(40).unwrap() + 2).unwrap(), "42");
    }

    #[test]
    fn test_model_completion() {
        let ctx = Context::new().unwrap();
        let x = ctx.int_const("x").unwrap();
        let model = trivial_model(&ctx);
        // `x` is unconstrained, completion assigns it some value.
        assert!(model.eval_i64(x).is_ok());
    }

    #[test]
    fn test_bigint() {
        let ctx = Context::new().unwrap();
        let x = ctx.int_const("x").unwrap();
        let solver = Solver::new(&ctx).unwrap();
        solver.assert(x._eq(ctx.lit(i64::MAX).unwrap() * 4)).unwrap();
        let model = solver.check_model().unwrap();

        let expected = BigInt::from(i64::MAX) * 4;
        assert_eq!(model.eval_bigint(x).unwrap(), expected);
        assert!(matches!(model.eval_i64(x), Err(Error::Value { .. })));
    }

    #[test]
    fn test_wrong_type() {
        let ctx = Context::new().unwrap();
        let model = trivial_model(&ctx);
        assert!(matches!(model.eval_bool(5), Err(Error::Value { .. })));

        let p = ctx.bool_const("p").unwrap();
        assert!(matches!(model.eval_i64(p), Err(Error::Value { .. })));
    }

    #[test]
    fn test_assignments() {
        let ctx = Context::new().unwrap();
        let x = ctx.int_const("x").unwrap();
        let solver = Solver::new(&ctx).unwrap();
        solver.assert(x._eq(7)).unwrap();
        let model = solver.check_model().unwrap();

        let assignments = model.assignments().unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].0, "x");
        assert_eq!(assignments[0].1.to_string(), "7");
        assert!(model.to_string().contains("x"));
    }
}
