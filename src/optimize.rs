use std::fmt::{Debug, Display, Formatter};
use std::ptr;

use log::{debug, warn};
use z3_sys::*;

use crate::context::Context;
use crate::error::Result;
use crate::expr::Expr;
use crate::model::Model;
use crate::scope::{scoped, Scope, Scoped};
use crate::solver::{expect_sat, SatResult};
use crate::term::Term;

/// Index of an objective registered with [`Optimizer::minimize`] or [`Optimizer::maximize`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Objective(u32);

impl Objective {
    pub fn index(self) -> u32 {
        self.0
    }
}

pub struct Optimizer<'ctx> {
    ctx: &'ctx Context,
    z3: Z3_optimize,
}

impl<'ctx> Optimizer<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Result<Self> {
        let z3 = ctx.checked(|c| unsafe { Z3_mk_optimize(c) })?;
        ctx.checked(|c| unsafe { Z3_optimize_inc_ref(c, z3) })?;
        Ok(Self { ctx, z3 })
    }

    pub fn as_raw(&self) -> Z3_optimize {
        self.z3
    }

    pub fn assert(&self, expr: impl Into<Expr<'ctx>>) -> Result<()> {
        let term = self.ctx.build(expr)?;
        self.ctx.checked(|c| unsafe { Z3_optimize_assert(c, self.z3, term.as_raw()) })
    }

    pub fn minimize(&self, expr: impl Into<Expr<'ctx>>) -> Result<Objective> {
        let term = self.ctx.build(expr)?;
        let index = self
            .ctx
            .checked(|c| unsafe { Z3_optimize_minimize(c, self.z3, term.as_raw()) })?;
        debug!("minimize({}) -> #{}", term, index);
        Ok(Objective(index))
    }

    pub fn maximize(&self, expr: impl Into<Expr<'ctx>>) -> Result<Objective> {
        let term = self.ctx.build(expr)?;
        let index = self
            .ctx
            .checked(|c| unsafe { Z3_optimize_maximize(c, self.z3, term.as_raw()) })?;
        debug!("maximize({}) -> #{}", term, index);
        Ok(Objective(index))
    }

    pub fn check(&self) -> Result<SatResult> {
        let res = self
            .ctx
            .checked(|c| unsafe { Z3_optimize_check(c, self.z3, 0, ptr::null()) })?;
        let res = SatResult::from_lbool(res);
        debug!("check() = {}", res);
        Ok(res)
    }

    pub fn get_model(&self) -> Result<Model<'ctx>> {
        let model = self
            .ctx
            .checked(|c| unsafe { Z3_optimize_get_model(c, self.z3) })?;
        Model::from_raw(self.ctx, model)
    }

    /// Checks and returns the optimal model, or fails with `Unsat` / `Unknown`.
    pub fn check_model(&self) -> Result<Model<'ctx>> {
        let res = self.check()?;
        expect_sat(res, || self.reason_unknown())?;
        self.get_model()
    }

    pub fn reason_unknown(&self) -> Result<String> {
        self.ctx.mk_string(|c| unsafe { Z3_optimize_get_reason_unknown(c, self.z3) })
    }

    /// Lower bound of an objective after the last check.
    pub fn lower(&self, objective: Objective) -> Result<Term<'ctx>> {
        self.ctx.mk_term(|c| unsafe { Z3_optimize_get_lower(c, self.z3, objective.0) })
    }

    /// Upper bound of an objective after the last check.
    pub fn upper(&self, objective: Objective) -> Result<Term<'ctx>> {
        self.ctx.mk_term(|c| unsafe { Z3_optimize_get_upper(c, self.z3, objective.0) })
    }

    pub fn push(&self) -> Result<()> {
        debug!("push()");
        self.ctx.checked(|c| unsafe { Z3_optimize_push(c, self.z3) })
    }

    /// Pops exactly one checkpoint.
    pub fn pop(&self) -> Result<()> {
        debug!("pop()");
        self.ctx.checked(|c| unsafe { Z3_optimize_pop(c, self.z3) })
    }

    pub fn push_scope(&self) -> Result<Scope<'_, Self>> {
        Scope::enter(self)
    }

    pub fn scope<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        scoped(self, f)
    }

    pub fn render(&self) -> Result<String> {
        self.ctx.mk_string(|c| unsafe { Z3_optimize_to_string(c, self.z3) })
    }
}

impl Scoped for Optimizer<'_> {
    fn push(&self) -> Result<()> {
        Optimizer::push(self)
    }

    fn pop(&self) -> Result<()> {
        Optimizer::pop(self)
    }
}

impl Drop for Optimizer<'_> {
    fn drop(&mut self) {
        unsafe { Z3_optimize_dec_ref(self.ctx.as_raw(), self.z3) };
    }
}

impl Display for Optimizer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Ok(s) => write!(f, "{}", s),
            Err(e) => {
                warn!("failed to render optimizer: {}", e);
                write!(f, "<optimizer>")
            }
        }
    }
}

impl Debug for Optimizer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optimizer").field("z3", &self.z3).finish()
    }
}
