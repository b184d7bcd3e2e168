//! Channel-connected stages running on scoped threads.
//!
//! A [`Stage`] turns a stream of inputs into a stream of outputs on its own
//! thread and closes its output once its input is exhausted. Stages compose
//! sequentially with [`pipe`] and in parallel with [`merge`], which duplicates
//! every input into two stages and combines both complete outputs once.
//!
//! Items travel as `Result<T, E>`. A stage that fails forwards the error and
//! stops reading; dropping its receiver makes upstream sends fail, so the rest
//! of the pipeline winds down on its own and [`run`] reports the first error.

use std::marker::PhantomData;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::Scope;

/// The receiving end of a stage's output.
pub type Stream<T, E> = Receiver<Result<T, E>>;

/// Handle a stage body uses to send its outputs downstream.
pub struct Emitter<T, E> {
    tx: Sender<Result<T, E>>,
}

impl<T, E> Emitter<T, E> {
    /// Sends one output item.
    pub fn emit(&self, item: T) {
        // A closed channel means downstream already failed; that error wins.
        let _ = self.tx.send(Ok(item));
    }

    fn fail(&self, error: E) {
        let _ = self.tx.send(Err(error));
    }
}

/// A unit of the pipeline.
pub trait Stage<In, Out, E>: Send + Sized {
    /// Starts the stage on `scope`, reading from `input`.
    fn spawn<'scope, 'env>(
        self,
        scope: &'scope Scope<'scope, 'env>,
        input: Stream<In, E>,
    ) -> Stream<Out, E>
    where
        Self: 'scope,
        In: Send + 'scope,
        Out: Send + 'scope,
        E: Send + 'scope;
}

/// Stage built from a function called once per input item.
pub struct FnStage<F, In> {
    body: F,
    _input: PhantomData<fn(In)>,
}

/// Wraps `body` as a stage. The body may emit any number of outputs per input.
pub fn stage<In, Out, E, F>(body: F) -> FnStage<F, In>
where
    F: FnMut(In, &Emitter<Out, E>) -> Result<(), E> + Send,
{
    FnStage {
        body,
        _input: PhantomData,
    }
}

impl<In, Out, E, F> Stage<In, Out, E> for FnStage<F, In>
where
    F: FnMut(In, &Emitter<Out, E>) -> Result<(), E> + Send,
{
    fn spawn<'scope, 'env>(
        mut self,
        scope: &'scope Scope<'scope, 'env>,
        input: Stream<In, E>,
    ) -> Stream<Out, E>
    where
        Self: 'scope,
        In: Send + 'scope,
        Out: Send + 'scope,
        E: Send + 'scope,
    {
        let (tx, rx) = mpsc::channel();
        scope.spawn(move || {
            let out = Emitter { tx };
            for item in input {
                let result = item.and_then(|value| (self.body)(value, &out));
                if let Err(error) = result {
                    out.fail(error);
                    return;
                }
            }
        });
        rx
    }
}

/// Two stages run back to back.
pub struct Pipe<A, B, Mid> {
    first: A,
    second: B,
    _mid: PhantomData<Mid>,
}

/// Feeds the output of `first` into `second`.
pub const fn pipe<A, B, Mid>(first: A, second: B) -> Pipe<A, B, Mid> {
    Pipe {
        first,
        second,
        _mid: PhantomData,
    }
}

impl<In, Mid, Out, E, A, B> Stage<In, Out, E> for Pipe<A, B, Mid>
where
    A: Stage<In, Mid, E>,
    B: Stage<Mid, Out, E>,
    Mid: Send,
{
    fn spawn<'scope, 'env>(
        self,
        scope: &'scope Scope<'scope, 'env>,
        input: Stream<In, E>,
    ) -> Stream<Out, E>
    where
        Self: 'scope,
        In: Send + 'scope,
        Out: Send + 'scope,
        E: Send + 'scope,
    {
        let mid = self.first.spawn(scope, input);
        self.second.spawn(scope, mid)
    }
}

/// Fan-out/fan-in barrier over two stages.
pub struct Merge<L, R, F, LOut, ROut> {
    left: L,
    right: R,
    combine: F,
    _outputs: PhantomData<(LOut, ROut)>,
}

/// Duplicates every input into `left` and `right`, waits for both to finish,
/// then emits `combine(left_outputs, right_outputs)` exactly once.
///
/// Both output vectors keep emission order. Nothing downstream runs before
/// both sides are drained.
pub const fn merge<L, R, F, LOut, ROut>(left: L, right: R, combine: F) -> Merge<L, R, F, LOut, ROut> {
    Merge {
        left,
        right,
        combine,
        _outputs: PhantomData,
    }
}

impl<In, Out, E, L, R, F, LOut, ROut> Stage<In, Out, E> for Merge<L, R, F, LOut, ROut>
where
    In: Clone,
    L: Stage<In, LOut, E>,
    R: Stage<In, ROut, E>,
    F: FnOnce(Vec<LOut>, Vec<ROut>) -> Out + Send,
    LOut: Send,
    ROut: Send,
{
    fn spawn<'scope, 'env>(
        self,
        scope: &'scope Scope<'scope, 'env>,
        input: Stream<In, E>,
    ) -> Stream<Out, E>
    where
        Self: 'scope,
        In: Send + 'scope,
        Out: Send + 'scope,
        E: Send + 'scope,
    {
        let (left_tx, left_rx) = mpsc::channel();
        let (right_tx, right_rx) = mpsc::channel();
        scope.spawn(move || {
            for item in input {
                match item {
                    Ok(value) => {
                        let left_open = left_tx.send(Ok(value.clone())).is_ok();
                        let right_open = right_tx.send(Ok(value)).is_ok();
                        if !left_open && !right_open {
                            return;
                        }
                    }
                    Err(error) => {
                        // Closing the right side lets it finish; the left
                        // side carries the error to the barrier.
                        let _ = left_tx.send(Err(error));
                        return;
                    }
                }
            }
        });

        let left_out = self.left.spawn(scope, left_rx);
        let right_out = self.right.spawn(scope, right_rx);
        let combine = self.combine;

        let (tx, rx) = mpsc::channel();
        scope.spawn(move || {
            let left: Result<Vec<LOut>, E> = left_out.iter().collect();
            let right: Result<Vec<ROut>, E> = right_out.iter().collect();
            let combined = left.and_then(|l| right.map(|r| combine(l, r)));
            let _ = tx.send(combined);
        });
        rx
    }
}

/// Emits every element of `items` in order on a fresh thread.
pub fn iterate<'scope, T, E>(scope: &'scope Scope<'scope, '_>, items: Vec<T>) -> Stream<T, E>
where
    T: Send + 'scope,
    E: Send + 'scope,
{
    let (tx, rx) = mpsc::channel();
    scope.spawn(move || {
        for item in items {
            if tx.send(Ok(item)).is_err() {
                return;
            }
        }
    });
    rx
}

/// Runs `stage` over `items` and collects its outputs in emission order.
///
/// Returns the first error any stage reported.
pub fn run<In, Out, E, S>(stage: S, items: Vec<In>) -> Result<Vec<Out>, E>
where
    S: Stage<In, Out, E>,
    In: Send,
    Out: Send,
    E: Send,
{
    std::thread::scope(|scope| {
        let input = iterate(scope, items);
        let output = stage.spawn(scope, input);
        output.iter().collect()
    })
}
