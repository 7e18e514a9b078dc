//! Per-player context handed to quirk hooks

use crate::state::StateSlot;

/// Per-player-instance context for quirk hooks
///
/// The embedding player owns one of these per instance and passes it (by
/// exclusive reference) into every quirk hook. The host is expected to
/// serialize hook calls for a given instance; this type performs no locking
/// of its own. Separate player instances are fully independent.
#[derive(Default)]
pub struct PlayerContext {
    download_in_progress: bool,
    state: StateSlot,
}

impl PlayerContext {
    /// Create a fresh context with an unclaimed state slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a progressive download is currently running
    ///
    /// Download mode has its own buffering accounting, so quirks suppress
    /// correction while this is set.
    pub fn is_download_in_progress(&self) -> bool {
        self.download_in_progress
    }

    /// Update the download-in-progress signal (player fill-timer state)
    pub fn set_download_in_progress(&mut self, in_progress: bool) {
        self.download_in_progress = in_progress;
    }

    /// The quirk-private state slot
    pub fn state_slot(&self) -> &StateSlot {
        &self.state
    }

    /// Mutable access to the quirk-private state slot
    pub fn state_slot_mut(&mut self) -> &mut StateSlot {
        &mut self.state
    }

    /// Drop quirk-private state (player teardown or source change)
    pub fn clear_quirk_state(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_flag_round_trip() {
        let mut player = PlayerContext::new();
        assert!(!player.is_download_in_progress());

        player.set_download_in_progress(true);
        assert!(player.is_download_in_progress());

        player.set_download_in_progress(false);
        assert!(!player.is_download_in_progress());
    }

    #[test]
    fn fresh_context_has_unclaimed_slot() {
        let player = PlayerContext::new();
        assert!(!player.state_slot().is_claimed());
    }
}
