/// Which published items a new subscriber receives before live ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Replay {
  /// Hot: only items published after subscribing.
  #[default]
  None,
  /// Cold: every item ever published, in publish order.
  All,
  /// The most recent `n` items, in publish order.
  Last(usize),
}

/// What a subject does with a `publish`/`subscribe` issued from inside one
/// of its own deliveries (for example an observer publishing back into the
/// subject it observes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reentrancy {
  /// Queue the request; the outermost call runs queued requests in arrival
  /// order before it returns.
  #[default]
  Queue,
  /// Refuse the request with [`SubjectError::Reentrant`](crate::SubjectError).
  Reject,
}

/// Subject configuration. The default is a hot subject that queues
/// reentrant requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubjectConfig {
  pub replay: Replay,
  pub reentrancy: Reentrancy,
}

impl SubjectConfig {
  pub fn hot() -> Self { Self::default() }

  pub fn cold() -> Self { Self { replay: Replay::All, ..Self::default() } }

  pub fn with_replay(mut self, replay: Replay) -> Self {
    self.replay = replay;
    self
  }

  pub fn with_reentrancy(mut self, reentrancy: Reentrancy) -> Self {
    self.reentrancy = reentrancy;
    self
  }
}
