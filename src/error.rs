//! Errors reported by subjects.
//!
//! Stream items themselves carry no error channel; caller closures that
//! panic unwind through the publishing call. What remains are the few ways
//! a subject can refuse a request.

use std::fmt;

use thiserror::Error;

/// The subject entry point a failed request came through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
  Publish,
  Subscribe,
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Operation::Publish => f.write_str("publish"),
      Operation::Subscribe => f.write_str("subscribe"),
    }
  }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SubjectError {
  /// The subject was already running a publish or subscribe and is
  /// configured with [`Reentrancy::Reject`](crate::subject::Reentrancy).
  #[error("reentrant {0} rejected: subject is busy delivering")]
  Reentrant(Operation),
}
