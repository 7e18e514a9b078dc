//! Hole-punch video compositing interface
//!
//! Orthogonal to [`Quirk`](crate::Quirk): platforms that composite video in
//! hardware render a transparent region in the page and place the video
//! plane behind it. Only the dispatch contract lives here; it is never
//! invoked from the buffering path and shares no state with it.

use crate::types::VideoRectangle;
use vela_pipeline::ElementRef;

/// Platform hook for hole-punched (externally composited) video
pub trait HolePunchQuirk: Send + Sync {
    /// Short stable name, used for registration logging
    fn identifier(&self) -> &'static str;

    /// Build the video sink that renders the transparent hole
    ///
    /// `is_legacy_playbin` selects between old- and new-style playback bin
    /// wiring on platforms where the sink differs.
    fn create_hole_punch_video_sink(&self, is_legacy_playbin: bool) -> Option<ElementRef> {
        let _ = is_legacy_playbin;
        None
    }

    /// Move/resize the hardware video plane behind the page
    ///
    /// Returns false when the sink does not accept placement.
    fn set_hole_punch_video_rectangle(
        &self,
        sink: &ElementRef,
        rectangle: &VideoRectangle,
    ) -> bool {
        let _ = sink;
        let _ = rectangle;
        false
    }

    /// Whether the platform sink needs pipeline clock synchronization
    fn requires_clock_synchronization(&self) -> bool {
        true
    }
}
