//! Method-chaining front ends over the operator functions.
//!
//! - [`fluent`] wraps an observable; every method applies one operator and
//!   returns a new wrapper.
//! - [`chain`] builds an operator chain with no source attached, to be
//!   applied later or handed to a subject.
//! - [`hot_fluent`] / [`cold_fluent`] build a chain of subjects, one per
//!   stage, where each stage can be subscribed to on its own.

use std::marker::PhantomData;

use tracing::trace;

use crate::{
  error::SubjectError,
  observable::{FromVec, Observable},
  observer::Observer,
  ops::{
    filter, flat_map, flatten, map, memoize, pipe, scan, Filter, FlatMap, Identity, Map, Memoize,
    Operator, Pipe, Scan, Transform, Transformed,
  },
  subject::{Subject, SubjectConfig, SubscriptionId},
};

// ============================================================================
// fluent
// ============================================================================

/// Wraps `source` for method chaining.
///
/// ```
/// use rxfold::prelude::*;
///
/// let out = fluent(from_vec(vec![7, 8, 9]))
///   .map(|x| x + 1)
///   .filter(|x| x % 2 == 0)
///   .flat_map(|x| from_vec(vec![x, x + 1, x * 2]))
///   .scan(|memo: i32, x| memo + x, -74)
///   .to_vec();
/// assert_eq!(out, vec![-66, -57, -41, -31, -20, 0]);
/// ```
pub fn fluent<S: Observable>(source: S) -> Fluent<S> { Fluent(source) }

/// An observable with chaining methods. It is itself an [`Observable`].
#[derive(Clone)]
pub struct Fluent<S>(S);

impl<S: Observable> Fluent<S> {
  pub fn map<B, F>(self, f: F) -> Fluent<Transformed<S, Map<F>>>
  where
    F: Fn(S::Item) -> B,
  {
    Fluent(Transformed::new(self.0, map(f)))
  }

  pub fn filter<F>(self, predicate: F) -> Fluent<Transformed<S, Filter<F>>>
  where
    F: Fn(&S::Item) -> bool,
  {
    Fluent(Transformed::new(self.0, filter(predicate)))
  }

  pub fn flat_map<Inner, F>(self, f: F) -> Fluent<Transformed<S, FlatMap<F>>>
  where
    F: Fn(S::Item) -> Inner,
    Inner: Observable,
  {
    Fluent(Transformed::new(self.0, flat_map(f)))
  }

  pub fn flatten(self) -> Fluent<Transformed<S, FlatMap<fn(S::Item) -> S::Item>>>
  where
    S::Item: Observable,
  {
    Fluent(Transformed::new(self.0, flatten()))
  }

  pub fn scan<Acc, R>(self, reducer: R, seed: Acc) -> Fluent<Transformed<S, Scan<R, Acc>>>
  where
    R: Fn(Acc, S::Item) -> Acc,
    Acc: Clone,
  {
    Fluent(Transformed::new(self.0, scan(reducer, seed)))
  }

  /// Drives the source now and keeps the recorded items.
  pub fn memoize(self) -> Fluent<FromVec<S::Item>>
  where
    S::Item: Clone,
  {
    Fluent(memoize().apply(self.0))
  }

  /// Apply any operator, including a [`pipe!`](macro@crate::ops::pipe) chain.
  pub fn pipe<Op: Transform<S>>(self, op: Op) -> Fluent<Op::Output> { Fluent(op.apply(self.0)) }

  pub fn observable(&self) -> &S { &self.0 }

  pub fn into_observable(self) -> S { self.0 }
}

impl<S: Observable> Observable for Fluent<S> {
  type Item = S::Item;

  #[inline]
  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    self.0.drive(observer)
  }
}

// ============================================================================
// chain
// ============================================================================

/// Starts an operator chain over items of type `In`.
///
/// The result is itself an operator, so it can be applied to observables
/// or used to decorate a subject.
///
/// ```
/// use rxfold::prelude::*;
///
/// let op = chain::<i32>().map(|x| x + 1).filter(|x| x % 2 == 0);
/// assert_eq!(from_vec(vec![7, 8, 9]).pipe(op.clone()).to_vec(), vec![8, 10]);
/// assert_eq!(op.apply(from_vec(vec![1])).to_vec(), vec![2]);
/// ```
pub fn chain<In>() -> Chain<In, Identity> { Chain { op: Identity, _in: PhantomData } }

pub struct Chain<In, Op> {
  op: Op,
  _in: PhantomData<fn(In)>,
}

impl<In, Op: Clone> Clone for Chain<In, Op> {
  fn clone(&self) -> Self { Chain { op: self.op.clone(), _in: PhantomData } }
}

impl<In, Op: Operator<In>> Chain<In, Op> {
  fn then<Next>(self, next: Next) -> Chain<In, Pipe<Op, Next>> {
    Chain { op: pipe(self.op, next), _in: PhantomData }
  }

  pub fn map<B, F>(self, f: F) -> Chain<In, Pipe<Op, Map<F>>>
  where
    F: Fn(Op::Out) -> B,
  {
    self.then(map(f))
  }

  pub fn filter<F>(self, predicate: F) -> Chain<In, Pipe<Op, Filter<F>>>
  where
    F: Fn(&Op::Out) -> bool,
  {
    self.then(filter(predicate))
  }

  pub fn flat_map<Inner, F>(self, f: F) -> Chain<In, Pipe<Op, FlatMap<F>>>
  where
    F: Fn(Op::Out) -> Inner,
    Inner: Observable,
  {
    self.then(flat_map(f))
  }

  pub fn flatten(self) -> Chain<In, Pipe<Op, FlatMap<fn(Op::Out) -> Op::Out>>>
  where
    Op::Out: Observable,
  {
    self.then(flatten())
  }

  pub fn scan<Acc, R>(self, reducer: R, seed: Acc) -> Chain<In, Pipe<Op, Scan<R, Acc>>>
  where
    R: Fn(Acc, Op::Out) -> Acc,
    Acc: Clone,
  {
    self.then(scan(reducer, seed))
  }

  pub fn memoize(self) -> Chain<In, Pipe<Op, Memoize>> { self.then(memoize()) }

  pub fn pipe<Next>(self, next: Next) -> Chain<In, Pipe<Op, Next>>
  where
    Next: Operator<Op::Out>,
  {
    self.then(next)
  }

  pub fn operator(&self) -> &Op { &self.op }

  pub fn into_operator(self) -> Op { self.op }

  /// Apply the chain to `source`.
  pub fn apply<S>(self, source: S) -> Op::Output
  where
    Op: Transform<S>,
  {
    self.op.apply(source)
  }
}

impl<In, Op: Operator<In>> Operator<In> for Chain<In, Op> {
  type Out = Op::Out;
  type Adapter<O>
    = Op::Adapter<O>
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>,
  {
    self.op.wrap(downstream)
  }

  #[inline]
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>,
  {
    Op::into_downstream::<O>(adapter)
  }
}

impl<In, Op, Source> Transform<Source> for Chain<In, Op>
where
  Op: Transform<Source>,
{
  type Output = Op::Output;

  #[inline]
  fn apply(self, source: Source) -> Self::Output { self.op.apply(source) }
}

// ============================================================================
// stateful fluent
// ============================================================================

/// Starts a chain of hot subjects.
pub fn hot_fluent<'a, Item: Clone + 'a>() -> StatefulFluent<'a, Item, Identity> {
  stateful_fluent(SubjectConfig::hot())
}

/// Starts a chain of cold subjects.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rxfold::prelude::*;
///
/// let last = cold_fluent::<i32>()
///   .map(|x| x + 1)
///   .filter(|x| x % 2 == 0)
///   .flat_map(|x| from_vec(vec![x, x + 1, x * 2]))
///   .scan(|memo: i32, x| memo + x, -74);
/// for x in [7, 8, 9] {
///   last.publish(x).unwrap();
/// }
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let sink = seen.clone();
/// last.subscribe(FnMutObserver(move |v| sink.borrow_mut().push(v))).unwrap();
/// assert_eq!(*seen.borrow(), vec![-66, -57, -41, -31, -20, 0]);
/// ```
pub fn cold_fluent<'a, Item: Clone + 'a>() -> StatefulFluent<'a, Item, Identity> {
  stateful_fluent(SubjectConfig::cold())
}

/// Starts a chain of subjects sharing `config`.
pub fn stateful_fluent<'a, Item: Clone + 'a>(
  config: SubjectConfig,
) -> StatefulFluent<'a, Item, Identity> {
  StatefulFluent { subject: Subject::with_config(Identity, config) }
}

/// One stage of a subject chain.
///
/// Every stage owns a subject over the chain's raw input type whose
/// operator is the whole chain up to and including this stage. A stage
/// forwards each raw item it receives to the stages built from it, so an
/// item published into any stage reaches that stage and every later one,
/// passing through each operator exactly once on the way to a subscriber.
pub struct StatefulFluent<'a, Item, Op> {
  subject: Subject<'a, Item, Op>,
}

impl<'a, Item, Op> Clone for StatefulFluent<'a, Item, Op> {
  fn clone(&self) -> Self { Self { subject: self.subject.clone() } }
}

impl<'a, Item, Op> StatefulFluent<'a, Item, Op>
where
  Item: Clone + 'a,
  Op: Operator<Item> + Clone + 'a,
{
  fn then<Next>(&self, next: Next) -> StatefulFluent<'a, Item, Pipe<Op, Next>>
  where
    Next: Operator<Op::Out> + 'a,
  {
    let op = pipe(self.subject.operator().clone(), next);
    let child = Subject::with_config(op, self.subject.config());
    let id = self.subject.link(child.clone());
    trace!(link = id.index(), "stage added");
    StatefulFluent { subject: child }
  }

  pub fn map<B, F>(&self, f: F) -> StatefulFluent<'a, Item, Pipe<Op, Map<F>>>
  where
    F: Fn(Op::Out) -> B + 'a,
  {
    self.then(map(f))
  }

  pub fn filter<F>(&self, predicate: F) -> StatefulFluent<'a, Item, Pipe<Op, Filter<F>>>
  where
    F: Fn(&Op::Out) -> bool + 'a,
  {
    self.then(filter(predicate))
  }

  pub fn flat_map<Inner, F>(&self, f: F) -> StatefulFluent<'a, Item, Pipe<Op, FlatMap<F>>>
  where
    F: Fn(Op::Out) -> Inner + 'a,
    Inner: Observable,
  {
    self.then(flat_map(f))
  }

  pub fn flatten(&self) -> StatefulFluent<'a, Item, Pipe<Op, FlatMap<fn(Op::Out) -> Op::Out>>>
  where
    Op::Out: Observable,
  {
    self.then(flatten())
  }

  pub fn scan<Acc, R>(
    &self,
    reducer: R,
    seed: Acc,
  ) -> StatefulFluent<'a, Item, Pipe<Op, Scan<R, Acc>>>
  where
    R: Fn(Acc, Op::Out) -> Acc + 'a,
    Acc: Clone + 'a,
  {
    self.then(scan(reducer, seed))
  }

  pub fn memoize(&self) -> StatefulFluent<'a, Item, Pipe<Op, Memoize>> { self.then(memoize()) }

  pub fn pipe<Next>(&self, next: Next) -> StatefulFluent<'a, Item, Pipe<Op, Next>>
  where
    Next: Operator<Op::Out> + 'a,
  {
    self.then(next)
  }

  /// Publish a raw item into this stage; it is forwarded to every later
  /// stage as well.
  pub fn publish(&self, item: Item) -> Result<(), SubjectError> { self.subject.publish(item) }

  /// Subscribe to the output of this stage.
  pub fn subscribe<O>(&self, observer: O) -> Result<SubscriptionId, SubjectError>
  where
    O: Observer<Op::Out> + 'a,
    Op::Adapter<O>: 'a,
  {
    self.subject.subscribe(observer)
  }

  pub fn subject(&self) -> &Subject<'a, Item, Op> { &self.subject }
}
