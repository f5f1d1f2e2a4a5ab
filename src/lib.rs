//! # rxfold: functional reactive streams
//!
//! Observers are pure state machines, operators are transducers, and
//! observables are finite sources that drive an observer to its final
//! state. Everything is single-threaded and synchronous.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxfold::prelude::*;
//!
//! let evens = from_iter(0..10)
//!   .pipe(pipe!(filter(|v: &i32| v % 2 == 0), map(|v: i32| v * 2)))
//!   .to_vec();
//! assert_eq!(evens, vec![0, 4, 8, 12, 16]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observer`] | A state machine: `next(state, item) -> state` |
//! | [`Observable`] | A finite source that drives an observer |
//! | [`Operator`] | Turns a downstream observer into an upstream one |
//! | [`Subject`] | Multicast hub, hot or cold (replaying) |
//! | [`Fluent`] / [`Chain`] / [`StatefulFluent`] | Method-chaining front ends |
//!
//! ## Logging
//!
//! Subjects emit [`tracing`] events: `trace` for every publish and
//! subscribe, `debug` when a reentrant request is queued or rejected, and
//! `warn` when subscribers lost to a panic are pruned. Nothing is printed
//! unless the application installs a subscriber.
//!
//! [`Observer`]: observer::Observer
//! [`Observable`]: observable::Observable
//! [`Operator`]: ops::Operator
//! [`Subject`]: subject::Subject
//! [`Fluent`]: fluent::Fluent
//! [`Chain`]: fluent::Chain
//! [`StatefulFluent`]: fluent::StatefulFluent

pub mod error;
pub mod fluent;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod subject;

// Re-export the prelude module
pub use prelude::*;
