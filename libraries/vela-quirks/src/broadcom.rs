//! Broadcom buffering-percentage correction
//!
//! Broadcom hardware pipelines buffer large amounts of data inside
//! proprietary sink/filter elements, invisible to the generic buffering
//! queue the pipeline normally measures. This quirk fuses three byte
//! counters (buffering queue estimate, video-filter buffered bytes,
//! multi-queue per-queue bytes) into a more realistic buffer level, then
//! smooths the resulting percentage with a fixed moving-average window so
//! bursty hardware reporting does not make the UI flicker.

use crate::average::MovingAverage;
use crate::context::PlayerContext;
use crate::quirk::Quirk;
use crate::state::OwnerId;
use tracing::{debug, trace};
use vela_pipeline::{
    BufferingMode, BufferingQuery, ElementRef, ElementState, PipelineElementExt, PropertyValue,
};

/// Name fragment of the Broadcom video filter element
const VIDEO_FILTER_NAME: &str = "brcmvidfilter";

/// Name fragment of the demuxer-side multi-queue element
const MULTIQUEUE_NAME: &str = "multiqueue";

/// Name fragment of the generic buffering queue element
const BUFFERING_QUEUE_NAME: &str = "queue2";

/// Samples kept in the buffering-percentage smoothing window
const BUFFERING_HISTORY_LENGTH: usize = 10;

/// Quirk-private state, installed in the player's state slot on first use
struct BroadcomState {
    video_filter: Option<ElementRef>,
    multiqueue: Option<ElementRef>,
    buffering_queue: Option<ElementRef>,
    buffering_average: MovingAverage,
}

impl BroadcomState {
    fn new() -> Self {
        Self {
            video_filter: None,
            multiqueue: None,
            buffering_queue: None,
            buffering_average: MovingAverage::new(BUFFERING_HISTORY_LENGTH),
        }
    }
}

/// Buffering-percentage correction for Broadcom hardware pipelines
pub struct BroadcomQuirk {
    owner: OwnerId,
}

impl BroadcomQuirk {
    /// Create the quirk
    pub fn new() -> Self {
        Self {
            owner: OwnerId::new(),
        }
    }

    /// Claim (or fetch) this quirk's state on the player
    ///
    /// `None` means another quirk owns the slot; every hook treats that as
    /// "not applicable" and falls back to the neutral behavior.
    fn state<'a>(&self, player: &'a mut PlayerContext) -> Option<&'a mut BroadcomState> {
        player
            .state_slot_mut()
            .claim_or_get(self.owner, BroadcomState::new)
    }

    /// Sum the `bytes` field across every entry of the multi-queue's
    /// per-queue statistics; malformed or absent entries contribute zero
    fn multiqueue_buffered_bytes(multiqueue: &ElementRef) -> u64 {
        let Ok(stats) = multiqueue.structure_property("stats") else {
            return 0;
        };
        let Some(queues) = stats.get("queues").and_then(PropertyValue::as_array) else {
            return 0;
        };
        queues
            .iter()
            .filter_map(|entry| entry.as_structure().and_then(|queue| queue.uint("bytes")))
            .map(u64::from)
            .sum()
    }
}

impl Default for BroadcomQuirk {
    fn default() -> Self {
        Self::new()
    }
}

impl Quirk for BroadcomQuirk {
    fn identifier(&self) -> &'static str {
        "Broadcom"
    }

    fn needs_buffering_percentage_correction(&self) -> bool {
        true
    }

    fn query_buffering_percentage(
        &self,
        player: &mut PlayerContext,
        query: &mut BufferingQuery,
    ) -> Option<&'static str> {
        // Download mode has its own accounting; stay out of its way.
        if player.is_download_in_progress() {
            return None;
        }
        let buffering_queue = self.state(player)?.buffering_queue.clone()?;
        if buffering_queue.query(query) {
            Some(BUFFERING_QUEUE_NAME)
        } else {
            None
        }
    }

    fn correct_buffering_percentage(
        &self,
        player: &mut PlayerContext,
        original_percentage: u32,
        mode: BufferingMode,
    ) -> u32 {
        let Some(state) = self.state(player) else {
            return original_percentage;
        };

        // Correction only applies to hardware-accelerated in-memory stream
        // buffering with a claimed video filter.
        if mode != BufferingMode::Stream || state.video_filter.is_none() {
            return original_percentage;
        }
        let Some(buffering_queue) = state.buffering_queue.clone() else {
            return original_percentage;
        };
        let max_size_bytes = buffering_queue.uint_property("max-size-bytes").unwrap_or(0);
        if max_size_bytes == 0 {
            return original_percentage;
        }

        // A reported 0% is not trustworthy; recompute a level from
        // current-level-bytes for the log. Observability only, never fed
        // into the returned value.
        let mut diagnostic_percentage = None;
        if original_percentage == 0 {
            if let Ok(current_level) = buffering_queue.uint_property("current-level-bytes") {
                let percentage = if current_level > max_size_bytes {
                    100
                } else {
                    (u64::from(current_level) * 100 / u64::from(max_size_bytes)) as u32
                };
                diagnostic_percentage = Some(percentage);
            }
        }

        let video_filter_bytes = state
            .video_filter
            .as_ref()
            .and_then(|filter| filter.uint_property("buffered-bytes").ok())
            .map_or(0, u64::from);
        let multiqueue_bytes = state
            .multiqueue
            .as_ref()
            .map_or(0, Self::multiqueue_buffered_bytes);

        // current-level-bytes is inaccurate on these pipelines, so estimate
        // the level from the reported percentage, then add what the hardware
        // elements are holding.
        let estimated_level = u64::from(max_size_bytes) * u64::from(original_percentage) / 100
            + video_filter_bytes
            + multiqueue_bytes;
        let corrected_percentage = if estimated_level > u64::from(max_size_bytes) {
            100
        } else {
            (estimated_level * 100 / u64::from(max_size_bytes)) as u32
        };

        // Once the buffer reads full, flood the history with 100 so the next
        // slightly-lower raw sample does not drag the reported value back
        // down through a slow ramp.
        if corrected_percentage >= 100 {
            state.buffering_average.reset(100);
        }
        let averaged_percentage = state.buffering_average.accumulate(corrected_percentage);

        let fused_elements = if state.multiqueue.is_some() {
            "video filter and multiqueue"
        } else {
            "video filter"
        };
        match diagnostic_percentage {
            Some(diagnostic) => debug!(
                "buffering (stream mode): {}% (recomputed to {}% from current-level-bytes, corrected to {}% with {} content, averaged to {}%)",
                original_percentage, diagnostic, corrected_percentage, fused_elements, averaged_percentage
            ),
            None => debug!(
                "buffering (stream mode): {}% (corrected to {}% with {} content, averaged to {}%)",
                original_percentage, corrected_percentage, fused_elements, averaged_percentage
            ),
        }

        averaged_percentage
    }

    fn reset_buffering_percentage(&self, player: &mut PlayerContext, percentage: u32) {
        if let Some(state) = self.state(player) {
            state.buffering_average.reset(percentage);
        }
    }

    fn setup_buffering_percentage_correction(
        &self,
        player: &mut PlayerContext,
        previous_state: ElementState,
        new_state: ElementState,
        element: &ElementRef,
    ) {
        match (previous_state, new_state) {
            (ElementState::Null, ElementState::Ready)
                if element.name().contains(VIDEO_FILTER_NAME) =>
            {
                // The multiqueue (if any) sits upstream of the video filter
                // on its first sink pad. The reference is useless without
                // queryable stats (older runtime versions), so it is only
                // claimed when the property exists.
                let multiqueue = element.upstream_peers().into_iter().next().filter(|peer| {
                    peer.name().contains(MULTIQUEUE_NAME) && peer.has_property("stats")
                });
                if let Some(state) = self.state(player) {
                    trace!(
                        "claiming video filter '{}' (multiqueue: {})",
                        element.name(),
                        multiqueue.as_ref().map_or("none", |peer| peer.name())
                    );
                    state.video_filter = Some(element.clone());
                    if multiqueue.is_some() {
                        state.multiqueue = multiqueue;
                    }
                }
            }
            (ElementState::Null, ElementState::Ready)
                if element.name().contains(BUFFERING_QUEUE_NAME) =>
            {
                if let Some(state) = self.state(player) {
                    trace!("claiming buffering queue '{}'", element.name());
                    state.buffering_queue = Some(element.clone());
                }
            }
            (ElementState::Ready, ElementState::Null)
                if element.name().contains(VIDEO_FILTER_NAME) =>
            {
                if let Some(state) = self.state(player) {
                    trace!("releasing video filter and multiqueue");
                    state.video_filter = None;
                    state.multiqueue = None;
                }
            }
            (ElementState::Ready, ElementState::Null)
                if element.name().contains(BUFFERING_QUEUE_NAME) =>
            {
                if let Some(state) = self.state(player) {
                    trace!("releasing buffering queue");
                    state.buffering_queue = None;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_pipeline::FakeElement;

    fn ready(quirk: &BroadcomQuirk, player: &mut PlayerContext, element: &ElementRef) {
        quirk.setup_buffering_percentage_correction(
            player,
            ElementState::Null,
            ElementState::Ready,
            element,
        );
    }

    fn nulled(quirk: &BroadcomQuirk, player: &mut PlayerContext, element: &ElementRef) {
        quirk.setup_buffering_percentage_correction(
            player,
            ElementState::Ready,
            ElementState::Null,
            element,
        );
    }

    fn claimed(player: &mut PlayerContext, quirk: &BroadcomQuirk) -> (bool, bool, bool) {
        let state = quirk.state(player).unwrap();
        (
            state.video_filter.is_some(),
            state.multiqueue.is_some(),
            state.buffering_queue.is_some(),
        )
    }

    #[test]
    fn video_filter_discovery_claims_multiqueue_with_stats() {
        let quirk = BroadcomQuirk::new();
        let mut player = PlayerContext::new();

        let multiqueue = FakeElement::new("multiqueue0");
        multiqueue.set_property("stats", vela_pipeline::Structure::new("stats"));
        let filter = FakeElement::new("brcmvidfilter0");
        filter.add_upstream_peer(multiqueue);
        let filter: ElementRef = filter;

        ready(&quirk, &mut player, &filter);
        assert_eq!(claimed(&mut player, &quirk), (true, true, false));
    }

    #[test]
    fn multiqueue_without_stats_is_left_unclaimed() {
        let quirk = BroadcomQuirk::new();
        let mut player = PlayerContext::new();

        let multiqueue = FakeElement::new("multiqueue0"); // no stats property
        let filter = FakeElement::new("brcmvidfilter0");
        filter.add_upstream_peer(multiqueue);
        let filter: ElementRef = filter;

        ready(&quirk, &mut player, &filter);
        assert_eq!(claimed(&mut player, &quirk), (true, false, false));
    }

    #[test]
    fn non_multiqueue_peer_is_ignored() {
        let quirk = BroadcomQuirk::new();
        let mut player = PlayerContext::new();

        let peer = FakeElement::new("tsdemux0");
        peer.set_property("stats", vela_pipeline::Structure::new("stats"));
        let filter = FakeElement::new("brcmvidfilter0");
        filter.add_upstream_peer(peer);
        let filter: ElementRef = filter;

        ready(&quirk, &mut player, &filter);
        assert_eq!(claimed(&mut player, &quirk), (true, false, false));
    }

    #[test]
    fn filter_teardown_releases_multiqueue_too() {
        let quirk = BroadcomQuirk::new();
        let mut player = PlayerContext::new();

        let multiqueue = FakeElement::new("multiqueue0");
        multiqueue.set_property("stats", vela_pipeline::Structure::new("stats"));
        let filter = FakeElement::new("brcmvidfilter0");
        filter.add_upstream_peer(multiqueue);
        let filter: ElementRef = filter;
        let queue: ElementRef = FakeElement::new("queue2-0");

        ready(&quirk, &mut player, &filter);
        ready(&quirk, &mut player, &queue);
        assert_eq!(claimed(&mut player, &quirk), (true, true, true));

        nulled(&quirk, &mut player, &filter);
        assert_eq!(claimed(&mut player, &quirk), (false, false, true));

        nulled(&quirk, &mut player, &queue);
        assert_eq!(claimed(&mut player, &quirk), (false, false, false));
    }

    #[test]
    fn unrelated_transitions_are_ignored() {
        let quirk = BroadcomQuirk::new();
        let mut player = PlayerContext::new();
        let queue: ElementRef = FakeElement::new("queue2-0");

        quirk.setup_buffering_percentage_correction(
            &mut player,
            ElementState::Ready,
            ElementState::Paused,
            &queue,
        );
        quirk.setup_buffering_percentage_correction(
            &mut player,
            ElementState::Paused,
            ElementState::Playing,
            &queue,
        );
        assert_eq!(claimed(&mut player, &quirk), (false, false, false));
    }

    #[test]
    fn discovery_is_idempotent() {
        let quirk = BroadcomQuirk::new();
        let mut player = PlayerContext::new();
        let queue: ElementRef = FakeElement::new("queue2-0");

        ready(&quirk, &mut player, &queue);
        ready(&quirk, &mut player, &queue);
        assert_eq!(claimed(&mut player, &quirk), (false, false, true));
    }
}
