use std::collections::BTreeSet;

use crate::tracker::identity::PersonId;

/// Append-only set of identities that have been confirmed sitting.
#[derive(Debug, Clone, Default)]
pub struct UniqueCounter {
    confirmed: BTreeSet<PersonId>,
}

impl UniqueCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`; returns `true` only the first time it is seen.
    pub fn register_if_newly_confirmed(&mut self, id: PersonId) -> bool {
        self.confirmed.insert(id)
    }

    /// Number of distinct identities counted so far.
    #[inline]
    pub fn current_count(&self) -> usize {
        self.confirmed.len()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.confirmed.contains(&id)
    }

    /// Counted identities in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.confirmed.iter().copied()
    }
}
