use std::collections::VecDeque;

use super::Replay;

/// Ordered history of published items, bounded by a [`Replay`] policy.
pub(crate) struct ReplayBuffer<Item> {
  policy: Replay,
  items: VecDeque<Item>,
}

impl<Item: Clone> ReplayBuffer<Item> {
  pub(crate) fn new(policy: Replay) -> Self { Self { policy, items: VecDeque::new() } }

  pub(crate) fn record(&mut self, item: &Item) {
    match self.policy {
      Replay::None | Replay::Last(0) => {}
      Replay::All => self.items.push_back(item.clone()),
      Replay::Last(n) => {
        if self.items.len() == n {
          self.items.pop_front();
        }
        self.items.push_back(item.clone());
      }
    }
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = &Item> { self.items.iter() }

  pub(crate) fn len(&self) -> usize { self.items.len() }
}

#[cfg(test)]
mod test {
  use super::*;

  fn recorded(policy: Replay, items: &[i32]) -> Vec<i32> {
    let mut buffer = ReplayBuffer::new(policy);
    items.iter().for_each(|v| buffer.record(v));
    buffer.iter().copied().collect()
  }

  #[test]
  fn policies() {
    assert!(recorded(Replay::None, &[1, 2, 3]).is_empty());
    assert_eq!(recorded(Replay::All, &[1, 2, 3]), vec![1, 2, 3]);
    assert_eq!(recorded(Replay::Last(2), &[1, 2, 3]), vec![2, 3]);
    assert!(recorded(Replay::Last(0), &[1, 2, 3]).is_empty());
  }
}
