use std::fmt::{Debug, Display, Formatter};

use log::{debug, warn};
use z3_sys::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::model::Model;
use crate::scope::{scoped, Scope, Scoped};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SatResult {
    Sat,
    Unsat,
    Unknown,
}

impl SatResult {
    pub(crate) fn from_lbool(value: Z3_lbool) -> Self {
        match value {
            Z3_L_TRUE => SatResult::Sat,
            Z3_L_FALSE => SatResult::Unsat,
            _ => SatResult::Unknown,
        }
    }

    pub fn is_sat(self) -> bool {
        self == SatResult::Sat
    }
}

impl Display for SatResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SatResult::Sat => write!(f, "sat"),
            SatResult::Unsat => write!(f, "unsat"),
            SatResult::Unknown => write!(f, "unknown"),
        }
    }
}

/// Turns a non-sat answer into the matching error.
pub(crate) fn expect_sat(result: SatResult, reason: impl FnOnce() -> Result<String>) -> Result<()> {
    match result {
        SatResult::Sat => Ok(()),
        SatResult::Unsat => Err(Error::Unsat),
        SatResult::Unknown => Err(Error::Unknown { reason: reason()? }),
    }
}

pub struct Solver<'ctx> {
    ctx: &'ctx Context,
    z3: Z3_solver,
}

impl<'ctx> Solver<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Result<Self> {
        let z3 = ctx.checked(|c| unsafe { Z3_mk_solver(c) })?;
        ctx.checked(|c| unsafe { Z3_solver_inc_ref(c, z3) })?;
        Ok(Self { ctx, z3 })
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    pub fn as_raw(&self) -> Z3_solver {
        self.z3
    }

    pub fn assert(&self, expr: impl Into<Expr<'ctx>>) -> Result<()> {
        let term = self.ctx.build(expr)?;
        self.ctx.checked(|c| unsafe { Z3_solver_assert(c, self.z3, term.as_raw()) })
    }

    pub fn check(&self) -> Result<SatResult> {
        let res = self.ctx.checked(|c| unsafe { Z3_solver_check(c, self.z3) })?;
        let res = SatResult::from_lbool(res);
        debug!("check() = {}", res);
        Ok(res)
    }

    /// The model of the last satisfiable check.
    pub fn get_model(&self) -> Result<Model<'ctx>> {
        let model = self.ctx.checked(|c| unsafe { Z3_solver_get_model(c, self.z3) })?;
        Model::from_raw(self.ctx, model)
    }

    /// Checks and returns the model, or fails with [`Error::Unsat`] / [`Error::Unknown`].
    pub fn check_model(&self) -> Result<Model<'ctx>> {
        let res = self.check()?;
        expect_sat(res, || self.reason_unknown())?;
        self.get_model()
    }

    pub fn reason_unknown(&self) -> Result<String> {
        self.ctx.mk_string(|c| unsafe { Z3_solver_get_reason_unknown(c, self.z3) })
    }

    pub fn push(&self) -> Result<()> {
        debug!("push()");
        self.ctx.checked(|c| unsafe { Z3_solver_push(c, self.z3) })
    }

    /// Pops exactly one checkpoint.
    pub fn pop(&self) -> Result<()> {
        debug!("pop()");
        self.ctx.checked(|c| unsafe { Z3_solver_pop(c, self.z3, 1) })
    }

    pub fn push_scope(&self) -> Result<Scope<'_, Self>> {
        Scope::enter(self)
    }

    /// Runs `f` inside a fresh checkpoint which is popped afterwards.
    pub fn scope<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        scoped(self, f)
    }

    pub fn num_scopes(&self) -> Result<u32> {
        self.ctx.checked(|c| unsafe { Z3_solver_get_num_scopes(c, self.z3) })
    }

    pub fn num_assertions(&self) -> Result<u32> {
        let ctx = self.ctx;
        let v = ctx.checked(|c| unsafe { Z3_solver_get_assertions(c, self.z3) })?;
        ctx.checked(|c| unsafe { Z3_ast_vector_inc_ref(c, v) })?;
        let n = ctx.checked(|c| unsafe { Z3_ast_vector_size(c, v) });
        unsafe { Z3_ast_vector_dec_ref(ctx.as_raw(), v) };
        n
    }

    /// Removes all assertions and checkpoints.
    pub fn reset(&self) -> Result<()> {
        self.ctx.checked(|c| unsafe { Z3_solver_reset(c, self.z3) })
    }

    pub fn render(&self) -> Result<String> {
        self.ctx.mk_string(|c| unsafe { Z3_solver_to_string(c, self.z3) })
    }
}

impl Scoped for Solver<'_> {
    fn push(&self) -> Result<()> {
        Solver::push(self)
    }

    fn pop(&self) -> Result<()> {
        Solver::pop(self)
    }
}

impl Drop for Solver<'_> {
    fn drop(&mut self) {
        unsafe { Z3_solver_dec_ref(self.ctx.as_raw(), self.z3) };
    }
}

impl Display for Solver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Ok(s) => write!(f, "{}", s),
            Err(e) => {
                warn!("failed to render solver: {}", e);
                write!(f, "<solver>")
            }
        }
    }
}

impl Debug for Solver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver").field("z3", &self.z3).finish()
    }
}
