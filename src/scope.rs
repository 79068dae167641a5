//! Balanced push/pop.
//!
//! A [`Scope`] is returned by `push_scope()` on a [`Solver`][crate::solver::Solver]
//! or [`Optimizer`][crate::optimize::Optimizer]. It pops exactly one checkpoint
//! when dropped, whether the enclosing block returns normally, returns early
//! with an error, or unwinds.

use std::ops::Deref;

use log::warn;

use crate::error::Result;

/// Anything with a native assertion stack.
pub trait Scoped {
    fn push(&self) -> Result<()>;
    fn pop(&self) -> Result<()>;
}

#[must_use = "the scope is popped as soon as the guard is dropped"]
pub struct Scope<'a, S: Scoped> {
    inner: &'a S,
}

impl<'a, S: Scoped> Scope<'a, S> {
    pub fn enter(inner: &'a S) -> Result<Self> {
        inner.push()?;
        Ok(Self { inner })
    }
}

impl<S: Scoped> Deref for Scope<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.inner
    }
}

impl<S: Scoped> Drop for Scope<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.pop() {
            warn!("failed to pop scope: {}", e);
        }
    }
}

/// Runs `f` between a push and its matching pop.
pub fn scoped<S: Scoped, T>(inner: &S, f: impl FnOnce(&S) -> Result<T>) -> Result<T> {
    let scope = Scope::enter(inner)?;
    f(&*scope)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use test_log::test;

    use crate::error::Error;

    #[derive(Default)]
    struct Counter {
        depth: Cell<u32>,
        pops: Cell<u32>,
    }

    impl Scoped for Counter {
        fn push(&self) -> Result<()> {
            self.depth.set(self.depth.get() + 1);
            Ok(())
        }

        fn pop(&self) -> Result<()> {
            self.depth.set(self.depth.get() - 1);
            self.pops.set(self.pops.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_guard_pops_once() {
        let c = Counter::default();
        {
            let scope = Scope::enter(&c).unwrap();
            assert_eq!(scope.depth.get(), 1);
        }
        assert_eq!(c.depth.get(), 0);
        assert_eq!(c.pops.get(), 1);
    }

    #[test]
    fn test_scoped_on_error() {
        let c = Counter::default();
        let res: Result<()> = scoped(&c, |c| {
            assert_eq!(c.depth.get(), 1);
            Err(Error::Unsat)
        });
        assert!(res.unwrap_err().is_unsat());
        assert_eq!(c.depth.get(), 0);
        assert_eq!(c.pops.get(), 1);
    }

    #[test]
    fn test_nested() {
        let c = Counter::default();
        let res = scoped(&c, |c| scoped(c, |c| Ok(c.depth.get())));
        assert_eq!(res.unwrap(), 2);
        assert_eq!(c.depth.get(), 0);
        assert_eq!(c.pops.get(), 2);
    }

    #[test]
    fn test_pop_on_panic() {
        let c = Counter::default();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = Scope::enter(&c).unwrap();
            panic!("boom");
        }));
        assert!(res.is_err());
        assert_eq!(c.depth.get(), 0);
    }
}
