//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::{Operation, SubjectError};
// Fluent front ends
pub use crate::fluent::{
  chain, cold_fluent, fluent, hot_fluent, stateful_fluent, Chain, Fluent, StatefulFluent,
};
// Sources
pub use crate::observable::{
  create, empty, from_iter, from_vec, once, repeat, Create, Emitter, Empty, FromIter, FromVec,
  Observable, Once,
};
// Observers
pub use crate::observer::{
  boxed, BoxedObserver, DynObserver, FnMutObserver, Fold, Observer, Recorder,
};
// Operators
pub use crate::ops::{
  compose, filter, flat_map, flatten, map, memoize, pipe, scan, Filter, FlatMap, Identity, Map,
  Memoize, Operator, Pipe, Scan, Transform, Transformed,
};
// Subjects
pub use crate::subject::{cold, hot, Reentrancy, Replay, Subject, SubjectConfig, SubscriptionId};
