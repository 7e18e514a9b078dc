//! Owner-tagged per-instance state
//!
//! Several quirk implementations may be linked into one build, but for a
//! given player instance at most one of them keeps extended mutable state.
//! The slot records which quirk instance claimed it; every other quirk must
//! observe the slot as foreign and back off rather than reinterpret state
//! that is not its own.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of a quirk instance
///
/// Minted from a process-wide counter at quirk construction. Used only for
/// identity comparison, never for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Mint a fresh identity
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

struct OwnedState {
    owner: OwnerId,
    state: Box<dyn Any + Send>,
}

/// Per-player slot for quirk-private state
///
/// The player owns the slot; the quirk that first claims it owns its
/// contents. Claiming is idempotent and order-independent: re-claiming with
/// the same owner returns the existing state, claiming a foreign slot
/// returns `None`.
#[derive(Default)]
pub struct StateSlot {
    inner: Option<OwnedState>,
}

impl StateSlot {
    /// Create an unclaimed slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any quirk has claimed the slot
    pub fn is_claimed(&self) -> bool {
        self.inner.is_some()
    }

    /// Identity of the claiming quirk, if any
    pub fn owner(&self) -> Option<OwnerId> {
        self.inner.as_ref().map(|owned| owned.owner)
    }

    /// Claim the slot for `owner`, or fetch the state it already claimed
    ///
    /// - Unclaimed slot: installs `init()` tagged with `owner` and returns it.
    /// - Claimed by `owner`: returns the existing state downcast to `S`
    ///   (`None` if `S` is not the installed type).
    /// - Claimed by anyone else: returns `None`; the foreign state is left
    ///   untouched.
    pub fn claim_or_get<S: Any + Send>(
        &mut self,
        owner: OwnerId,
        init: impl FnOnce() -> S,
    ) -> Option<&mut S> {
        if let Some(owned) = &self.inner {
            if owned.owner != owner {
                return None;
            }
        }

        let owned = self.inner.get_or_insert_with(|| OwnedState {
            owner,
            state: Box::new(init()),
        });
        owned.state.downcast_mut::<S>()
    }

    /// Read the state claimed by `owner`, without claiming
    pub fn get<S: Any + Send>(&self, owner: OwnerId) -> Option<&S> {
        let owned = self.inner.as_ref()?;
        if owned.owner != owner {
            return None;
        }
        owned.state.downcast_ref::<S>()
    }

    /// Drop whatever state is installed, returning the slot to unclaimed
    ///
    /// Player teardown path; owner identity is deliberately not required.
    pub fn clear(&mut self) {
        self.inner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CounterState {
        count: u32,
    }

    #[test]
    fn owner_ids_are_unique() {
        let a = OwnerId::new();
        let b = OwnerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn first_claim_installs_state() {
        let owner = OwnerId::new();
        let mut slot = StateSlot::new();
        assert!(!slot.is_claimed());

        let state = slot
            .claim_or_get(owner, || CounterState { count: 7 })
            .unwrap();
        assert_eq!(state.count, 7);
        assert!(slot.is_claimed());
        assert_eq!(slot.owner(), Some(owner));
    }

    #[test]
    fn reclaim_returns_existing_state() {
        let owner = OwnerId::new();
        let mut slot = StateSlot::new();

        slot.claim_or_get(owner, || CounterState { count: 1 })
            .unwrap()
            .count = 42;

        // init must not run again
        let state = slot
            .claim_or_get(owner, || CounterState { count: 0 })
            .unwrap();
        assert_eq!(state.count, 42);
    }

    #[test]
    fn foreign_owner_is_refused_and_state_untouched() {
        let owner_a = OwnerId::new();
        let owner_b = OwnerId::new();
        let mut slot = StateSlot::new();

        slot.claim_or_get(owner_a, || CounterState { count: 5 });

        assert!(slot
            .claim_or_get(owner_b, || CounterState { count: 99 })
            .is_none());
        assert_eq!(slot.owner(), Some(owner_a));
        assert_eq!(slot.get::<CounterState>(owner_a).unwrap().count, 5);
    }

    #[test]
    fn read_access_is_owner_guarded() {
        let owner_a = OwnerId::new();
        let owner_b = OwnerId::new();
        let mut slot = StateSlot::new();

        slot.claim_or_get(owner_a, || CounterState { count: 5 });

        assert!(slot.get::<CounterState>(owner_a).is_some());
        assert!(slot.get::<CounterState>(owner_b).is_none());
    }

    #[test]
    fn clear_returns_slot_to_unclaimed() {
        let owner = OwnerId::new();
        let mut slot = StateSlot::new();

        slot.claim_or_get(owner, || CounterState { count: 5 });
        slot.clear();

        assert!(!slot.is_claimed());
        assert!(slot.owner().is_none());

        // A different quirk may now claim it
        let other = OwnerId::new();
        assert!(slot.claim_or_get(other, || CounterState { count: 1 }).is_some());
    }
}
