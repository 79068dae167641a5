//! # z3-rs: ergonomic bindings to the Z3 SMT solver
//!
//! **`z3-rs`** is a thin layer over the native Z3 C API (via [`z3_sys`]).
//! It adds no solving logic of its own. What it does add:
//!
//! - **Explicit context**: every handle borrows its [`Context`][crate::context::Context],
//!   so nothing can outlive it.
//! - **Operators that mix terms and literals**: `3 * x + y`, `x._eq(1)`, `p & !q`.
//!   Rust `bool`, integer and float literals are converted to solver terms on the fly,
//!   following the sort of the term they are combined with.
//! - **Errors as values**: native failures are read back after each native call
//!   and surface as [`Error`][crate::error::Error], never as a panic or an abort.
//! - **Balanced scopes**: `solver.scope(|s| ...)` always pops what it pushed.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use z3_rs::context::Context;
//! use z3_rs::solver::{SatResult, Solver};
//!
//! // 1. Create the context (models enabled by default)
//! let ctx = Context::new()?;
//!
//! // 2. Declare constants
//! let x = ctx.int_const("x")?;
//! let y = ctx.int_const("y")?;
//!
//! // 3. Assert constraints
//! let solver = Solver::new(&ctx)?;
//! solver.assert((x + y)._eq(10))?;
//! solver.assert((x - y)._eq(2))?;
//!
//! // 4. Check and read the model
//! assert_eq!(solver.check()?, SatResult::Sat);
//! let model = solver.get_model()?;
//! assert_eq!(model.eval_i64(x)?, 6);
//! assert_eq!(model.eval_i64(y)?, 4);
//! # Ok::<(), z3_rs::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`context`]**: context lifecycle and native error capture.
//! - **[`literal`]**, **[`ops`]**, **[`expr`]**: literal conversion, operator dispatch
//!   and overloading.
//! - **[`solver`]**, **[`optimize`]**, **[`scope`]**: the solver facade.
//! - **[`model`]**: evaluation of terms under a model.
//!
//! A context and everything derived from it must stay on one thread;
//! the types are neither `Send` nor `Sync`.

pub mod config;
pub mod context;
pub mod error;
pub mod expr;
pub mod literal;
pub mod model;
pub mod ops;
pub mod optimize;
pub mod scope;
pub mod solver;
pub mod sort;
pub mod term;
