//! The native context and its lifecycle.
//!
//! A [`Context`] owns exactly one native context. Every other handle in this
//! crate ([`Term`][crate::term::Term], [`Solver`][crate::solver::Solver],
//! [`Model`][crate::model::Model], ...) borrows it, so nothing can be used after
//! the context is gone.
//!
//! Native failures are not raised from the error callback. The installed
//! handler only logs, and every wrapped call reads the context's error code
//! right after the native call returns (see [`Context::checked`]).
//!
//! The context is neither `Send` nor `Sync`: one context, one thread.

use std::ffi::{CStr, CString};
use std::fmt::Debug;
use std::os::raw::c_char;
use std::ptr;

use log::{debug, trace};
use z3_sys::*;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::term::Term;

pub struct Context {
    z3: Z3_context,
    rounding_mode: Z3_ast,
}

unsafe extern "C" fn on_native_error(_ctx: Z3_context, code: ErrorCode) {
    debug!("native error handler: {:?}", code);
}

impl Context {
    /// Creates a context with the default configuration (`model = true`).
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        let params = config
            .params()
            .map(|(key, value)| Ok((CString::new(key)?, CString::new(value)?)))
            .collect::<Result<Vec<_>>>()?;

        let z3 = unsafe {
            let cfg = Z3_mk_config();
            for (key, value) in &params {
                Z3_set_param_value(cfg, key.as_ptr(), value.as_ptr());
            }
            let z3 = Z3_mk_context(cfg);
            // The configuration is only needed to create the context.
            Z3_del_config(cfg);
            z3
        };
        if z3.is_null() {
            return Err(Error::Context);
        }
        unsafe { Z3_set_error_handler(z3, Some(on_native_error)) };
        debug!("created context with {:?}", config);

        let mut ctx = Context {
            z3,
            rounding_mode: ptr::null_mut(),
        };
        ctx.rounding_mode = ctx.checked(|z3| unsafe { Z3_mk_fpa_round_nearest_ties_to_even(z3) })?;
        Ok(ctx)
    }

    /// Returns the raw native handle.
    pub fn as_raw(&self) -> Z3_context {
        self.z3
    }

    /// The shared round-nearest-ties-to-even rounding mode used by all floating point arithmetic.
    pub fn rounding_mode(&self) -> Term<'_> {
        Term::new(self, self.rounding_mode)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        debug!("deleting context");
        unsafe { Z3_del_context(self.z3) };
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("z3", &self.z3).finish()
    }
}

/// Runs `f` with a fresh default context, which is deleted when `f` returns.
///
/// ```no_run
/// use z3_rs::context::with_context;
/// use z3_rs::solver::{SatResult, Solver};
///
/// let res = with_context(|ctx| {
///     let x = ctx.int_const("x")?;
///     let solver = Solver::new(ctx)?;
///     solver.assert((x + 1)._eq(3))?;
///     solver.check()
/// })?;
/// assert_eq!(res, SatResult::Sat);
/// # Ok::<(), z3_rs::error::Error>(())
/// ```
pub fn with_context<T, E>(f: impl FnOnce(&Context) -> Result<T, E>) -> Result<T, E>
where
    E: From<Error>,
{
    let ctx = Context::new()?;
    f(&ctx)
}

// Native call plumbing.
impl Context {
    /// Converts the error code left by the last native call into a `Result`.
    pub(crate) fn check_error(&self) -> Result<()> {
        let code = unsafe { Z3_get_error_code(self.z3) };
        if matches!(code, ErrorCode::OK) {
            return Ok(());
        }
        let message = unsafe { from_c_str(Z3_get_error_msg(self.z3, code)) };
        Err(Error::Native { code, message })
    }

    /// Performs a native call and checks the error code right after it.
    pub(crate) fn checked<T>(&self, f: impl FnOnce(Z3_context) -> T) -> Result<T> {
        let value = f(self.z3);
        self.check_error()?;
        Ok(value)
    }

    /// Performs a native call producing an AST.
    pub(crate) fn mk_term(&self, f: impl FnOnce(Z3_context) -> Z3_ast) -> Result<Term<'_>> {
        let ast = self.checked(f)?;
        if ast.is_null() {
            return Err(Error::Native {
                code: ErrorCode::Exception,
                message: "native constructor returned null".to_string(),
            });
        }
        trace!("mk_term -> {:?}", ast);
        Ok(Term::new(self, ast))
    }

    /// Performs a native call producing a string owned by the context.
    pub(crate) fn mk_string(&self, f: impl FnOnce(Z3_context) -> Z3_string) -> Result<String> {
        let s = self.checked(f)?;
        Ok(unsafe { from_c_str(s) })
    }
}

/// Copies a native string. The pointer is only valid until the next native call.
unsafe fn from_c_str(s: *const c_char) -> String {
    if s.is_null() {
        return String::new();
    }
    CStr::from_ptr(s).to_string_lossy().into_owned()
}
