//! End-to-end scenarios against the native solver.

use z3_rs::context::{with_context, Context};
use z3_rs::error::{Error, Result};
use z3_rs::expr::Expr;
use z3_rs::solver::{SatResult, Solver};

// ─── Linear systems ────────────────────────────────────────────────────────────

#[test]
fn linear_system_over_reals() -> Result<()> {
    let ctx = Context::new()?;
    let x = ctx.real_const("x")?;
    let y = ctx.real_const("y")?;
    let z = ctx.real_const("z")?;

    let lhs: [Expr; 3] = [3 * x + 2 * y - z, 2 * x - 2 * y + 4 * z, x - y / 2 - z];
    let rhs = [1, -2, 0];

    let solver = Solver::new(&ctx)?;
    for (l, r) in lhs.iter().zip(rhs) {
        solver.assert(l.clone()._eq(r))?;
    }
    assert_eq!(solver.check()?, SatResult::Sat);

    let model = solver.get_model()?;
    for (l, r) in lhs.into_iter().zip(rhs) {
        assert!(model.eval_bool(l.clone()._eq(r))?);
        assert_eq!(model.eval_i64(l)?, r as i64);
    }
    Ok(())
}

#[test]
fn linear_system_over_integers_is_unsat() -> Result<()> {
    // The same system has no integer solution once `y / 2` is integer division.
    let ctx = Context::new()?;
    let x = ctx.int_const("x")?;
    let y = ctx.int_const("y")?;
    let z = ctx.int_const("z")?;

    let solver = Solver::new(&ctx)?;
    solver.assert((3 * x + 2 * y - z)._eq(1))?;
    solver.assert((2 * x - 2 * y + 4 * z)._eq(-2))?;
    solver.assert((x - y / 2 - z)._eq(0))?;
    assert_eq!(solver.check()?, SatResult::Unsat);
    Ok(())
}

#[test]
fn integer_system() -> Result<()> {
    let ctx = Context::new()?;
    let x = ctx.int_const("x")?;
    let y = ctx.int_const("y")?;
    let z = ctx.int_const("z")?;

    let solver = Solver::new(&ctx)?;
    solver.assert((x + y + z)._eq(6))?;
    solver.assert((2 * x - y)._eq(0))?;
    solver.assert((z - x)._eq(2))?;

    let model = solver.check_model()?;
    assert_eq!(model.eval_i64(x)?, 1);
    assert_eq!(model.eval_i64(y)?, 2);
    assert_eq!(model.eval_i64(z)?, 3);
    Ok(())
}

// ─── Unsat ─────────────────────────────────────────────────────────────────────

#[test]
fn contradicting_equalities() -> Result<()> {
    let ctx = Context::new()?;
    let x = ctx.int_const("x")?;

    let solver = Solver::new(&ctx)?;
    solver.assert(x._eq(1))?;
    solver.assert(x._eq(2))?;

    assert_eq!(solver.check()?, SatResult::Unsat);
    let err = solver.check_model().unwrap_err();
    assert!(matches!(err, Error::Unsat));
    assert_eq!(err.to_string(), "UNSAT");
    Ok(())
}

// ─── Operand shapes ────────────────────────────────────────────────────────────

#[test]
fn operand_shapes_are_equivalent() -> Result<()> {
    let ctx = Context::new()?;
    let x = ctx.int_const("x")?;
    let five = ctx.lit(5)?;

    let shapes: Vec<Expr> = vec![x + five, x + 5, 5 + x];
    for shape in shapes {
        let solver = Solver::new(&ctx)?;
        solver.assert(shape.clone()._eq(7))?;
        let model = solver.check_model()?;
        assert_eq!(model.eval_i64(x)?, 2);

        solver.assert(x.ne(2))?;
        assert_eq!(solver.check()?, SatResult::Unsat);
    }
    Ok(())
}

#[test]
fn comparison_shapes_are_equivalent() -> Result<()> {
    let ctx = Context::new()?;
    let x = ctx.int_const("x")?;
    let three = ctx.lit(3)?;

    for shape in [x.lt(three), x.lt(3), three.gt(x)] {
        let solver = Solver::new(&ctx)?;
        solver.assert(shape)?;
        solver.assert(x.ge(3))?;
        assert_eq!(solver.check()?, SatResult::Unsat);
    }
    Ok(())
}

#[test]
fn float_arithmetic() -> Result<()> {
    let ctx = Context::new()?;
    let f = ctx.float_const("f")?;

    let solver = Solver::new(&ctx)?;
    solver.assert((f * 2.0 + 1.0)._eq(6.0))?;
    let model = solver.check_model()?;
    assert_eq!(model.eval_f64(f)?, 2.5);
    Ok(())
}

#[test]
fn float_equality_follows_ieee() -> Result<()> {
    let ctx = Context::new()?;
    let f = ctx.float_const("f")?;

    // Only -0.0 lies between 0.0 and 0.0 without being structurally 0.0.
    let solver = Solver::new(&ctx)?;
    solver.assert(f.le(0.0) & f.ge(0.0) & f.ne(0.0))?;
    assert_eq!(solver.check()?, SatResult::Unsat);

    let solver = Solver::new(&ctx)?;
    solver.assert(f._eq(-0.0))?;
    solver.assert(f._eq(0.0))?;
    assert_eq!(solver.check()?, SatResult::Sat);
    Ok(())
}

// ─── Scopes ────────────────────────────────────────────────────────────────────

#[test]
fn scope_leaves_assertions_unchanged() -> Result<()> {
    let ctx = Context::new()?;
    let p = ctx.bool_const("p")?;
    let q = ctx.bool_const("q")?;

    let solver = Solver::new(&ctx)?;
    solver.assert(p | q)?;
    let before = solver.to_string();

    solver.scope(|s| {
        s.assert(!p)?;
        s.assert(!q)?;
        assert_eq!(s.check()?, SatResult::Unsat);
        Ok(())
    })?;
    assert_eq!(solver.to_string(), before);

    let res = solver.scope(|s| {
        s.assert(!p)?;
        s.assert(!q)?;
        s.check_model().map(|_| ())
    });
    assert!(res.unwrap_err().is_unsat());
    assert_eq!(solver.to_string(), before);
    assert_eq!(solver.num_scopes()?, 0);
    assert_eq!(solver.check()?, SatResult::Sat);
    Ok(())
}

// ─── Native errors ─────────────────────────────────────────────────────────────

#[test]
fn malformed_assertion_is_a_native_error() -> Result<()> {
    with_context(|ctx| {
        let x = ctx.int_const("x")?;
        let solver = Solver::new(ctx)?;
        match solver.assert(x * 2) {
            Err(Error::Native { message, .. }) => assert!(!message.is_empty()),
            other => panic!("expected native error, got {:?}", other),
        }
        // The context is still usable afterwards.
        solver.assert(x.gt(0))?;
        assert_eq!(solver.check()?, SatResult::Sat);
        Ok(())
    })
}

#[test]
fn mixed_sorts_are_a_native_error() -> Result<()> {
    with_context(|ctx| {
        let p = ctx.bool_const("p")?;
        let x = ctx.int_const("x")?;
        assert!(matches!(ctx.build(p + x), Err(Error::Native { .. })));
        Ok(())
    })
}
