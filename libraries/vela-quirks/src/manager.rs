//! Quirk selection and forwarding
//!
//! The manager is the single point the generic pipeline calls into. It holds
//! the active quirks (plus the orthogonal hole-punch quirk) and forwards
//! each hook; it contains no domain logic of its own. Construction is
//! explicit dependency injection: the embedder builds one manager at startup
//! and passes it to its players, and tests build their own isolated
//! instances the same way.

use crate::context::PlayerContext;
use crate::holepunch::HolePunchQuirk;
use crate::quirk::Quirk;
use crate::types::{ElementCharacteristics, FactoryListType, VideoRectangle};
use tracing::{debug, info};
use vela_pipeline::{BufferingMode, BufferingQuery, ElementRef, ElementState};

/// Builder for [`QuirksManager`]
///
/// Which quirks get registered is a build/platform decision made by the
/// embedder; quirks reporting themselves unsupported on the running platform
/// are skipped here.
#[derive(Default)]
pub struct QuirksManagerBuilder {
    quirks: Vec<Box<dyn Quirk>>,
    hole_punch: Option<Box<dyn HolePunchQuirk>>,
}

impl QuirksManagerBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quirk (skipped if unsupported on this platform)
    pub fn add_quirk(mut self, quirk: impl Quirk + 'static) -> Self {
        if quirk.is_platform_supported() {
            info!("registering pipeline quirk: {}", quirk.identifier());
            self.quirks.push(Box::new(quirk));
        } else {
            debug!(
                "skipping pipeline quirk unsupported on this platform: {}",
                quirk.identifier()
            );
        }
        self
    }

    /// Register the hole-punch quirk (at most one)
    pub fn hole_punch_quirk(mut self, quirk: impl HolePunchQuirk + 'static) -> Self {
        info!("registering hole-punch quirk: {}", quirk.identifier());
        self.hole_punch = Some(Box::new(quirk));
        self
    }

    /// Finish construction
    pub fn build(self) -> QuirksManager {
        QuirksManager {
            quirks: self.quirks,
            hole_punch: self.hole_punch,
        }
    }
}

/// Dispatch point between the generic pipeline and the active quirks
pub struct QuirksManager {
    quirks: Vec<Box<dyn Quirk>>,
    hole_punch: Option<Box<dyn HolePunchQuirk>>,
}

impl QuirksManager {
    /// Start building a manager
    pub fn builder() -> QuirksManagerBuilder {
        QuirksManagerBuilder::new()
    }

    /// Whether any quirk is active
    pub fn is_enabled(&self) -> bool {
        !self.quirks.is_empty() || self.hole_punch.is_some()
    }

    /// First platform audio sink any quirk provides
    pub fn create_audio_sink(&self) -> Option<ElementRef> {
        self.quirks.iter().find_map(|quirk| quirk.create_audio_sink())
    }

    /// First platform Web Audio sink any quirk provides
    pub fn create_web_audio_sink(&self) -> Option<ElementRef> {
        self.quirks
            .iter()
            .find_map(|quirk| quirk.create_web_audio_sink())
    }

    /// Let every quirk tune a freshly added element
    pub fn configure_element(
        &self,
        element: &ElementRef,
        characteristics: &ElementCharacteristics,
    ) {
        for quirk in &self.quirks {
            quirk.configure_element(element, characteristics);
        }
    }

    /// First opinion any quirk has on a decoder factory's acceleration
    pub fn is_hardware_accelerated(&self, factory_name: &str) -> Option<bool> {
        self.quirks
            .iter()
            .find_map(|quirk| quirk.is_hardware_accelerated(factory_name))
    }

    /// First decoder-factory restriction any quirk imposes
    pub fn decoder_factory_list_type(&self) -> Option<FactoryListType> {
        self.quirks
            .iter()
            .find_map(|quirk| quirk.decoder_factory_list_type())
    }

    /// Union of decoder names disallowed for Web Audio
    pub fn disallowed_web_audio_decoders(&self) -> Vec<String> {
        let mut decoders = Vec::new();
        for quirk in &self.quirks {
            decoders.extend(quirk.disallowed_web_audio_decoders());
        }
        decoders
    }

    /// Bitwise OR of every quirk's extra playback-bin flags
    pub fn additional_playbin_flags(&self) -> u32 {
        self.quirks
            .iter()
            .fold(0, |flags, quirk| flags | quirk.additional_playbin_flags())
    }

    /// False as soon as one quirk opts out of bitstream reparsing
    pub fn should_parse_incoming_rtc_bitstream(&self) -> bool {
        self.quirks
            .iter()
            .all(|quirk| quirk.should_parse_incoming_rtc_bitstream())
    }

    /// Whether any registered quirk corrects buffering percentages
    pub fn needs_buffering_percentage_correction(&self) -> bool {
        self.quirks
            .iter()
            .any(|quirk| quirk.needs_buffering_percentage_correction())
    }

    /// Ask the correction-capable quirks to answer a buffering query
    ///
    /// Returns the name of the element that answered, from the first quirk
    /// that succeeds.
    pub fn query_buffering_percentage(
        &self,
        player: &mut PlayerContext,
        query: &mut BufferingQuery,
    ) -> Option<&'static str> {
        self.quirks
            .iter()
            .filter(|quirk| quirk.needs_buffering_percentage_correction())
            .find_map(|quirk| quirk.query_buffering_percentage(player, query))
    }

    /// Run the reported percentage through every correction-capable quirk,
    /// in registration order
    pub fn correct_buffering_percentage(
        &self,
        player: &mut PlayerContext,
        original_percentage: u32,
        mode: BufferingMode,
    ) -> u32 {
        self.quirks
            .iter()
            .filter(|quirk| quirk.needs_buffering_percentage_correction())
            .fold(original_percentage, |percentage, quirk| {
                quirk.correct_buffering_percentage(player, percentage, mode)
            })
    }

    /// Reset every correction-capable quirk's smoothing history
    pub fn reset_buffering_percentage(&self, player: &mut PlayerContext, percentage: u32) {
        for quirk in &self.quirks {
            if quirk.needs_buffering_percentage_correction() {
                quirk.reset_buffering_percentage(player, percentage);
            }
        }
    }

    /// Forward an element state transition for buffering-element discovery
    pub fn setup_buffering_percentage_correction(
        &self,
        player: &mut PlayerContext,
        previous_state: ElementState,
        new_state: ElementState,
        element: &ElementRef,
    ) {
        for quirk in &self.quirks {
            if quirk.needs_buffering_percentage_correction() {
                quirk.setup_buffering_percentage_correction(
                    player,
                    previous_state,
                    new_state,
                    element,
                );
            }
        }
    }

    /// Whether hole-punched video rendering is available
    pub fn supports_video_hole_punch_rendering(&self) -> bool {
        self.hole_punch.is_some()
    }

    /// Build the hole-punch video sink, if a hole-punch quirk is registered
    pub fn create_hole_punch_video_sink(&self, is_legacy_playbin: bool) -> Option<ElementRef> {
        self.hole_punch
            .as_ref()
            .and_then(|quirk| quirk.create_hole_punch_video_sink(is_legacy_playbin))
    }

    /// Place the hardware video plane behind the page
    pub fn set_hole_punch_video_rectangle(
        &self,
        sink: &ElementRef,
        rectangle: &VideoRectangle,
    ) -> bool {
        self.hole_punch
            .as_ref()
            .is_some_and(|quirk| quirk.set_hole_punch_video_rectangle(sink, rectangle))
    }

    /// Whether sinks need pipeline clock synchronization
    ///
    /// True when no hole-punch quirk is active: ordinary sinks always
    /// synchronize.
    pub fn sinks_require_clock_synchronization(&self) -> bool {
        self.hole_punch
            .as_ref()
            .map_or(true, |quirk| quirk.requires_clock_synchronization())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_pipeline::FakeElement;

    struct FlagsQuirk {
        flags: u32,
        parse_rtc: bool,
    }

    impl Quirk for FlagsQuirk {
        fn identifier(&self) -> &'static str {
            "Flags"
        }

        fn additional_playbin_flags(&self) -> u32 {
            self.flags
        }

        fn should_parse_incoming_rtc_bitstream(&self) -> bool {
            self.parse_rtc
        }

        fn disallowed_web_audio_decoders(&self) -> Vec<String> {
            vec![format!("decoder-{:#x}", self.flags)]
        }
    }

    struct UnsupportedQuirk;

    impl Quirk for UnsupportedQuirk {
        fn identifier(&self) -> &'static str {
            "Unsupported"
        }

        fn is_platform_supported(&self) -> bool {
            false
        }

        fn additional_playbin_flags(&self) -> u32 {
            0xffff_ffff
        }
    }

    #[test]
    fn empty_manager_is_neutral() {
        let manager = QuirksManager::builder().build();
        let mut player = PlayerContext::new();

        assert!(!manager.is_enabled());
        assert!(manager.create_audio_sink().is_none());
        assert!(manager.create_web_audio_sink().is_none());
        assert!(manager.is_hardware_accelerated("avdec_h264").is_none());
        assert!(manager.decoder_factory_list_type().is_none());
        assert!(manager.disallowed_web_audio_decoders().is_empty());
        assert_eq!(manager.additional_playbin_flags(), 0);
        assert!(manager.should_parse_incoming_rtc_bitstream());
        assert!(!manager.needs_buffering_percentage_correction());
        assert_eq!(
            manager.correct_buffering_percentage(&mut player, 30, BufferingMode::Stream),
            30
        );
        assert!(!manager.supports_video_hole_punch_rendering());
        assert!(manager.sinks_require_clock_synchronization());
    }

    #[test]
    fn aggregating_dispatch_rules() {
        let manager = QuirksManager::builder()
            .add_quirk(FlagsQuirk {
                flags: 0b01,
                parse_rtc: true,
            })
            .add_quirk(FlagsQuirk {
                flags: 0b10,
                parse_rtc: false,
            })
            .build();

        assert!(manager.is_enabled());
        assert_eq!(manager.additional_playbin_flags(), 0b11);
        assert!(!manager.should_parse_incoming_rtc_bitstream());
        assert_eq!(manager.disallowed_web_audio_decoders().len(), 2);
    }

    #[test]
    fn unsupported_quirks_are_not_registered() {
        let manager = QuirksManager::builder().add_quirk(UnsupportedQuirk).build();

        assert!(!manager.is_enabled());
        assert_eq!(manager.additional_playbin_flags(), 0);
    }

    #[test]
    fn hole_punch_forwarding() {
        struct OverlayQuirk;

        impl HolePunchQuirk for OverlayQuirk {
            fn identifier(&self) -> &'static str {
                "Overlay"
            }

            fn create_hole_punch_video_sink(&self, is_legacy_playbin: bool) -> Option<ElementRef> {
                (!is_legacy_playbin).then(|| FakeElement::new("overlaysink0") as ElementRef)
            }

            fn set_hole_punch_video_rectangle(
                &self,
                _sink: &ElementRef,
                rectangle: &VideoRectangle,
            ) -> bool {
                rectangle.width > 0 && rectangle.height > 0
            }

            fn requires_clock_synchronization(&self) -> bool {
                false
            }
        }

        let manager = QuirksManager::builder().hole_punch_quirk(OverlayQuirk).build();
        let sink: ElementRef = FakeElement::new("overlaysink0");

        assert!(manager.is_enabled());
        assert!(manager.supports_video_hole_punch_rendering());
        assert!(manager.create_hole_punch_video_sink(false).is_some());
        assert!(manager.create_hole_punch_video_sink(true).is_none());
        assert!(manager.set_hole_punch_video_rectangle(&sink, &VideoRectangle::new(0, 0, 640, 360)));
        assert!(!manager.set_hole_punch_video_rectangle(&sink, &VideoRectangle::new(0, 0, 0, 0)));
        assert!(!manager.sinks_require_clock_synchronization());
    }
}
