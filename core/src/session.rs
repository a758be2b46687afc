// shopcart/src/session.rs

//! The per-session list of touched item ids.

use std::collections::HashSet;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::model::ItemId;

/// Ordered item ids a browser session has added to its cart.
///
/// Appends are not deduplicated: adding the same item twice stores the id twice.
/// Rendering collapses duplicates with [`SessionCartList::distinct_ids`]; removal takes
/// out a single occurrence. The list serializes as a bare JSON array so it can sit in a
/// cookie as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCartList(Vec<ItemId>);

impl SessionCartList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, item_id: ItemId) {
    self.0.push(item_id);
  }

  /// Returns a copy of the list with `item_id` appended.
  pub fn with_added(&self, item_id: ItemId) -> Self {
    let mut next = self.clone();
    next.push(item_id);
    next
  }

  /// Removes the first occurrence of `item_id`. Returns whether anything was removed.
  pub fn remove_one(&mut self, item_id: ItemId) -> bool {
    match self.0.iter().position(|id| *id == item_id) {
      Some(idx) => {
        self.0.remove(idx);
        true
      }
      None => false,
    }
  }

  pub fn contains(&self, item_id: ItemId) -> bool {
    self.0.contains(&item_id)
  }

  pub fn occurrences(&self, item_id: ItemId) -> usize {
    self.0.iter().filter(|id| **id == item_id).count()
  }

  pub fn as_slice(&self) -> &[ItemId] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Lazily yields each id once, in order of first occurrence.
  pub fn distinct_ids(&self) -> DistinctIds<'_> {
    DistinctIds {
      inner: self.0.iter(),
      seen: HashSet::new(),
    }
  }

  pub fn into_inner(self) -> Vec<ItemId> {
    self.0
  }
}

impl From<Vec<ItemId>> for SessionCartList {
  fn from(ids: Vec<ItemId>) -> Self {
    Self(ids)
  }
}

impl FromIterator<ItemId> for SessionCartList {
  fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Iterator returned by [`SessionCartList::distinct_ids`].
#[derive(Debug)]
pub struct DistinctIds<'a> {
  inner: std::slice::Iter<'a, ItemId>,
  seen: HashSet<ItemId>,
}

impl Iterator for DistinctIds<'_> {
  type Item = ItemId;

  fn next(&mut self) -> Option<ItemId> {
    let seen = &mut self.seen;
    self.inner.by_ref().copied().find(|id| seen.insert(*id))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, self.inner.size_hint().1)
  }
}

impl FusedIterator for DistinctIds<'_> {}
