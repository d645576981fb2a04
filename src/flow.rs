//! Run asynchronous steps one after another.
//!
//! A step borrows a shared context while it runs instead of capturing it, so a list of steps
//! can all act on the same pin without fighting the borrow checker. Steps never overlap: each
//! one is awaited to completion before the next starts.

/// One unit of work in a sequence.
#[allow(async_fn_in_trait)]
pub trait Step<C> {
    type Error;

    async fn run(&mut self, ctx: &mut C) -> Result<(), Self::Error>;
}

/// Run `steps` in order, stopping at the first error.
pub async fn series<C, S: Step<C>>(ctx: &mut C, steps: &mut [S]) -> Result<(), S::Error> {
    for step in steps.iter_mut() {
        step.run(ctx).await?;
    }
    Ok(())
}

/// Run `step` over and over. Only returns once a run fails, with that error.
pub async fn forever<C, S: Step<C>>(ctx: &mut C, step: &mut S) -> S::Error {
    let mut runs: u32 = 0;
    loop {
        if let Err(e) = step.run(ctx).await {
            log::debug!("forever: stopped after {} runs", runs);
            return e;
        }
        runs = runs.wrapping_add(1);
    }
}

/// Run `step` `n` times, stopping at the first error.
pub async fn times<C, S: Step<C>>(ctx: &mut C, n: usize, step: &mut S) -> Result<(), S::Error> {
    for _ in 0..n {
        step.run(ctx).await?;
    }
    Ok(())
}

/// An array of steps is a step that runs them as a [`series`].
impl<C, S: Step<C>, const N: usize> Step<C> for [S; N] {
    type Error = S::Error;

    async fn run(&mut self, ctx: &mut C) -> Result<(), Self::Error> {
        series(ctx, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[derive(Default)]
    struct Trace {
        seen: Vec<&'static str>,
    }

    #[derive(Debug, PartialEq)]
    struct Boom(&'static str);

    enum Op {
        Push(&'static str),
        Fail(&'static str),
        /// Fail once the trace holds this many entries.
        FailAt(usize),
    }

    impl Step<Trace> for Op {
        type Error = Boom;

        async fn run(&mut self, ctx: &mut Trace) -> Result<(), Boom> {
            match self {
                Op::Push(s) => {
                    ctx.seen.push(*s);
                    Ok(())
                }
                Op::Fail(s) => Err(Boom(*s)),
                Op::FailAt(n) if ctx.seen.len() >= *n => Err(Boom("limit")),
                Op::FailAt(_) => Ok(()),
            }
        }
    }

    #[test]
    fn series_runs_in_order() {
        let mut t = Trace::default();
        let mut steps = [Op::Push("a"), Op::Push("b"), Op::Push("c")];
        assert_eq!(block_on(series(&mut t, &mut steps)), Ok(()));
        assert_eq!(t.seen, ["a", "b", "c"]);
    }

    #[test]
    fn series_stops_at_first_error() {
        let mut t = Trace::default();
        let mut steps = [Op::Push("a"), Op::Fail("x"), Op::Push("b"), Op::Fail("y")];
        assert_eq!(block_on(series(&mut t, &mut steps)), Err(Boom("x")));
        assert_eq!(t.seen, ["a"]);
    }

    #[test]
    fn empty_series_succeeds() {
        let mut t = Trace::default();
        let mut steps: [Op; 0] = [];
        assert_eq!(block_on(series(&mut t, &mut steps)), Ok(()));
        assert!(t.seen.is_empty());
    }

    #[test]
    fn forever_returns_the_error() {
        let mut t = Trace::default();
        let mut body = [Op::FailAt(6), Op::Push("on"), Op::Push("off")];
        assert_eq!(block_on(forever(&mut t, &mut body)), Boom("limit"));
        assert_eq!(t.seen, ["on", "off", "on", "off", "on", "off"]);
    }

    #[test]
    fn times_counts_runs() {
        let mut t = Trace::default();
        assert_eq!(block_on(times(&mut t, 3, &mut Op::Push("x"))), Ok(()));
        assert_eq!(t.seen.len(), 3);

        let mut t = Trace::default();
        assert_eq!(block_on(times(&mut t, 0, &mut Op::Fail("never"))), Ok(()));

        let mut body = [Op::Push("y"), Op::FailAt(2)];
        assert_eq!(block_on(times(&mut t, 5, &mut body)), Err(Boom("limit")));
        assert_eq!(t.seen, ["y", "y"]);
    }

    #[test]
    fn nested_series() {
        let mut t = Trace::default();
        let mut steps = [[Op::Push("a"), Op::Push("b")], [Op::Push("c"), Op::Fail("d")]];
        assert_eq!(block_on(series(&mut t, &mut steps)), Err(Boom("d")));
        assert_eq!(t.seen, ["a", "b", "c"]);
    }
}
