use std::ffi::CString;
use std::fmt::{Debug, Display, Formatter};

use log::{trace, warn};
use z3_sys::*;

use crate::context::Context;
use crate::error::Result;
use crate::sort::Sort;

/// Handle to an immutable native term.
///
/// Terms are owned by their [`Context`] and are never released individually,
/// so the handle is `Copy`.
#[derive(Copy, Clone)]
pub struct Term<'ctx> {
    ctx: &'ctx Context,
    ast: Z3_ast,
}

impl<'ctx> Term<'ctx> {
    pub(crate) fn new(ctx: &'ctx Context, ast: Z3_ast) -> Self {
        Self { ctx, ast }
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    pub fn as_raw(&self) -> Z3_ast {
        self.ast
    }

    pub(crate) fn raw_sort(&self) -> Result<Z3_sort> {
        self.ctx.checked(|z3| unsafe { Z3_get_sort(z3, self.ast) })
    }

    pub fn sort(&self) -> Result<Sort> {
        let sort = self.raw_sort()?;
        let kind = self.ctx.checked(|z3| unsafe { Z3_get_sort_kind(z3, sort) })?;
        let bits = || unsafe {
            (
                Z3_fpa_get_ebits(self.ctx.as_raw(), sort),
                Z3_fpa_get_sbits(self.ctx.as_raw(), sort),
            )
        };
        Ok(Sort::from_kind(kind, bits))
    }

    /// Whether both handles point to the same native term.
    pub fn same(&self, other: &Term<'_>) -> bool {
        self.ast == other.ast
    }

    /// Rewrites the term with the native simplifier.
    pub fn simplify(&self) -> Result<Term<'ctx>> {
        self.ctx.mk_term(|z3| unsafe { Z3_simplify(z3, self.ast) })
    }

    /// Renders the term as SMT-LIB text.
    pub fn render(&self) -> Result<String> {
        self.ctx.mk_string(|z3| unsafe { Z3_ast_to_string(z3, self.ast) })
    }
}

impl Display for Term<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Ok(s) => write!(f, "{}", s),
            Err(e) => {
                warn!("failed to render term: {}", e);
                write!(f, "<term@{:?}>", self.ast)
            }
        }
    }
}

impl Debug for Term<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Term({})", self)
    }
}

// Constants
impl Context {
    fn mk_const(&self, name: &str, sort: Z3_sort) -> Result<Term<'_>> {
        trace!("mk_const(name = {})", name);
        let name = CString::new(name)?;
        let symbol = self.checked(|z3| unsafe { Z3_mk_string_symbol(z3, name.as_ptr()) })?;
        self.mk_term(|z3| unsafe { Z3_mk_const(z3, symbol, sort) })
    }

    pub fn bool_const(&self, name: &str) -> Result<Term<'_>> {
        let sort = self.checked(|z3| unsafe { Z3_mk_bool_sort(z3) })?;
        self.mk_const(name, sort)
    }

    pub fn int_const(&self, name: &str) -> Result<Term<'_>> {
        let sort = self.checked(|z3| unsafe { Z3_mk_int_sort(z3) })?;
        self.mk_const(name, sort)
    }

    pub fn real_const(&self, name: &str) -> Result<Term<'_>> {
        let sort = self.checked(|z3| unsafe { Z3_mk_real_sort(z3) })?;
        self.mk_const(name, sort)
    }

    /// Declares a 64-bit IEEE floating point constant.
    pub fn float_const(&self, name: &str) -> Result<Term<'_>> {
        let sort = self.checked(|z3| unsafe { Z3_mk_fpa_sort_double(z3) })?;
        self.mk_const(name, sort)
    }
}
