//! Capability interface for vendor/platform quirks
//!
//! Every operation carries a neutral default (no-op, pass-through, or "no
//! opinion"), so the pipeline may call any hook regardless of which quirks
//! are active. A concrete quirk overrides only the subset it cares about.

use crate::context::PlayerContext;
use crate::types::{ElementCharacteristics, FactoryListType};
use vela_pipeline::{BufferingMode, BufferingQuery, ElementRef, ElementState};

/// A vendor/platform-specific override of default pipeline behavior
///
/// One quirk instance serves every player instance, so implementations are
/// stateless: any mutable data lives in the player's state slot, claimed
/// through [`StateSlot::claim_or_get`].
///
/// [`StateSlot::claim_or_get`]: crate::StateSlot::claim_or_get
pub trait Quirk: Send + Sync {
    /// Short stable name, used for registration logging
    fn identifier(&self) -> &'static str;

    /// Whether this quirk applies to the running platform
    ///
    /// Unsupported quirks are skipped at manager construction.
    fn is_platform_supported(&self) -> bool {
        true
    }

    /// Build a platform-specific audio sink, if this quirk provides one
    fn create_audio_sink(&self) -> Option<ElementRef> {
        None
    }

    /// Build a platform-specific Web Audio sink, if this quirk provides one
    fn create_web_audio_sink(&self) -> Option<ElementRef> {
        None
    }

    /// Tune a freshly added element for the given stream characteristics
    fn configure_element(
        &self,
        element: &ElementRef,
        characteristics: &ElementCharacteristics,
    ) {
        let _ = element;
        let _ = characteristics;
    }

    /// Whether the named decoder factory is hardware-backed
    ///
    /// `None` means no opinion; the pipeline falls back to its own probing.
    fn is_hardware_accelerated(&self, factory_name: &str) -> Option<bool> {
        let _ = factory_name;
        None
    }

    /// Restriction on which decoder factories may be autoplugged
    fn decoder_factory_list_type(&self) -> Option<FactoryListType> {
        None
    }

    /// Decoder names Web Audio must not use on this platform
    fn disallowed_web_audio_decoders(&self) -> Vec<String> {
        Vec::new()
    }

    /// Extra flags to set on the playback bin at construction
    fn additional_playbin_flags(&self) -> u32 {
        0
    }

    /// Whether incoming real-time bitstreams need a reparse step
    fn should_parse_incoming_rtc_bitstream(&self) -> bool {
        true
    }

    /// Whether this quirk corrects reported buffering percentages
    ///
    /// Gates the four hooks below; the manager only forwards them to quirks
    /// answering `true`.
    fn needs_buffering_percentage_correction(&self) -> bool {
        false
    }

    /// Issue a buffering query against the element this quirk measures
    ///
    /// Returns the name of the answering element on success.
    fn query_buffering_percentage(
        &self,
        player: &mut PlayerContext,
        query: &mut BufferingQuery,
    ) -> Option<&'static str> {
        let _ = player;
        let _ = query;
        None
    }

    /// Correct a reported buffering percentage (0-100)
    ///
    /// The default passes the value through unchanged.
    fn correct_buffering_percentage(
        &self,
        player: &mut PlayerContext,
        original_percentage: u32,
        mode: BufferingMode,
    ) -> u32 {
        let _ = player;
        let _ = mode;
        original_percentage
    }

    /// Force the smoothing history to a uniform value
    ///
    /// Used when the pipeline wants to discard history, e.g. on seek or
    /// source change.
    fn reset_buffering_percentage(&self, player: &mut PlayerContext, percentage: u32) {
        let _ = player;
        let _ = percentage;
    }

    /// Observe an element state transition for buffering-element discovery
    fn setup_buffering_percentage_correction(
        &self,
        player: &mut PlayerContext,
        previous_state: ElementState,
        new_state: ElementState,
        element: &ElementRef,
    ) {
        let _ = player;
        let _ = previous_state;
        let _ = new_state;
        let _ = element;
    }
}
