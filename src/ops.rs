//! Operators and their composition.
//!
//! Every operator is a transducer: [`Operator::wrap`] turns a downstream
//! observer of `Out` into an upstream observer of `In`, independent of any
//! source or sink. Applying an operator to a source ([`Transform::apply`])
//! yields a new [`Observable`]; the same operator value can also decorate the
//! observers registered on a [`Subject`](crate::subject::Subject).

use crate::{
  observable::Observable,
  observer::{Fold, Observer},
};

/// Implements [`Transform`] for operators whose observable form is just
/// "wrap the downstream observer, then drive the source".
macro_rules! transform_by_wrap {
  ($op:ident<$($g:ident),*>) => {
    impl<Source, $($g),*> $crate::ops::Transform<Source> for $op<$($g),*>
    where
      Source: $crate::observable::Observable,
      Self: $crate::ops::Operator<Source::Item>,
    {
      type Output = $crate::ops::Transformed<Source, Self>;

      #[inline]
      fn apply(self, source: Source) -> Self::Output { $crate::ops::Transformed::new(source, self) }
    }
  };
}

pub mod filter;
pub mod flat_map;
pub mod map;
pub mod memoize;
pub mod scan;

pub use filter::{filter, Filter, FilterObserver};
pub use flat_map::{flat_map, flatten, FlatMap, FlatMapObserver};
pub use map::{map, Map, MapObserver};
pub use memoize::{memoize, Memoize};
pub use scan::{scan, Scan, ScanObserver};

pub use crate::{__compose as compose, __pipe as pipe};

// ============================================================================
// Operator / Transform traits
// ============================================================================

/// Observer-level form of an operator (a transducer from `In` to `Out`).
pub trait Operator<In> {
  type Out;

  /// The upstream observer produced by [`Operator::wrap`].
  type Adapter<O>: Observer<In>
  where
    O: Observer<Self::Out>;

  /// Wrap a downstream observer. Any per-stream state the operator keeps
  /// (for example the `scan` accumulator) is created fresh here.
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>;

  /// Recover the downstream observer state from a driven adapter.
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>;

  /// Pull-model entry point: fold `reducer` over `source` as seen through
  /// this operator.
  fn transduce<Source, Acc, R>(&self, source: &Source, reducer: R, seed: Acc) -> Acc
  where
    Source: Observable<Item = In>,
    R: FnMut(Acc, Self::Out) -> Acc,
  {
    let adapter = source.drive(self.wrap(Fold::new(reducer, seed)));
    Self::into_downstream::<Fold<Acc, R>>(adapter).into_acc()
  }
}

/// Observable-level form of an operator.
pub trait Transform<Source> {
  type Output: Observable;

  fn apply(self, source: Source) -> Self::Output;
}

/// A source with an operator applied to it.
#[derive(Clone)]
pub struct Transformed<S, Op> {
  source: S,
  op: Op,
}

impl<S, Op> Transformed<S, Op> {
  pub fn new(source: S, op: Op) -> Self { Self { source, op } }
}

impl<S, Op> Observable for Transformed<S, Op>
where
  S: Observable,
  Op: Operator<S::Item>,
{
  type Item = Op::Out;

  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    let adapter = self.source.drive(self.op.wrap(observer));
    Op::into_downstream::<O>(adapter)
  }
}

// ============================================================================
// Identity
// ============================================================================

/// The operator that changes nothing. Default operator of subjects and the
/// empty [`pipe!`](macro@crate::ops::pipe).
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<In> Operator<In> for Identity {
  type Out = In;
  type Adapter<O>
    = O
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> O
  where
    O: Observer<Self::Out>,
  {
    downstream
  }

  #[inline]
  fn into_downstream<O>(adapter: O) -> O
  where
    O: Observer<Self::Out>,
  {
    adapter
  }
}

impl<Source: Observable> Transform<Source> for Identity {
  type Output = Source;

  #[inline]
  fn apply(self, source: Source) -> Source { source }
}

// ============================================================================
// Pipe
// ============================================================================

/// `first` followed by `second`, in data-flow order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pipe<A, B>(A, B);

/// Compose two operators left to right: items pass through `first`, then
/// `second`.
pub fn pipe<A, B>(first: A, second: B) -> Pipe<A, B> { Pipe(first, second) }

/// Compose two operators right to left: items pass through `inner`, then
/// `outer`.
pub fn compose<A, B>(outer: A, inner: B) -> Pipe<B, A> { Pipe(inner, outer) }

impl<In, A, B> Operator<In> for Pipe<A, B>
where
  A: Operator<In>,
  B: Operator<A::Out>,
{
  type Out = B::Out;
  type Adapter<O>
    = A::Adapter<B::Adapter<O>>
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>,
  {
    self.0.wrap(self.1.wrap(downstream))
  }

  #[inline]
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>,
  {
    B::into_downstream::<O>(A::into_downstream::<B::Adapter<O>>(adapter))
  }
}

impl<Source, A, B> Transform<Source> for Pipe<A, B>
where
  A: Transform<Source>,
  B: Transform<A::Output>,
{
  type Output = B::Output;

  #[inline]
  fn apply(self, source: Source) -> Self::Output { self.1.apply(self.0.apply(source)) }
}

/// Left-to-right composition of any number of operators.
///
/// `pipe!()` is [`Identity`], `pipe!(a)` is `a`, and
/// `pipe!(a, b, c)` feeds items through `a`, then `b`, then `c`.
///
/// ```
/// use rxfold::prelude::*;
///
/// let op = pipe!(map(|v: i32| v + 1), filter(|v: &i32| v % 2 == 0), map(|v: i32| v * 10));
/// assert_eq!(from_vec(vec![7, 8, 9]).pipe(op).to_vec(), vec![80, 100]);
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! __pipe {
  () => {
    $crate::ops::Identity
  };
  ($op:expr $(,)?) => {
    $op
  };
  ($op:expr, $($rest:expr),+ $(,)?) => {
    $crate::ops::pipe($op, $crate::__pipe!($($rest),+))
  };
}

/// Right-to-left composition: `compose!(f, g, h)` is `pipe!(h, g, f)`.
#[doc(hidden)]
#[macro_export]
macro_rules! __compose {
  () => {
    $crate::ops::Identity
  };
  ($op:expr $(,)?) => {
    $op
  };
  ($op:expr, $($rest:expr),+ $(,)?) => {
    $crate::ops::compose($op, $crate::__compose!($($rest),+))
  };
}
