//! Vela Player - Pipeline Quirks
//!
//! Pluggable vendor/platform behavior overrides for the Vela playback
//! pipeline.
//!
//! This crate provides:
//! - `Quirk` - capability interface with a neutral default for every hook
//! - `HolePunchQuirk` - orthogonal interface for externally composited video
//! - `QuirksManager` - the single dispatch point the generic pipeline calls
//! - `StateSlot` / `PlayerContext` - owner-tagged per-player quirk state
//! - `BroadcomQuirk` - buffering-percentage correction for Broadcom
//!   hardware pipelines
//! - `MovingAverage` - fixed-window smoothing for reported percentages
//!
//! # Architecture
//!
//! The generic pipeline never knows which vendor is active: it calls the
//! manager on lifecycle events (element added, state transition, buffering
//! query) and the manager forwards to whichever quirks are registered,
//! falling back to neutral defaults otherwise. Quirk objects are stateless;
//! per-player data lives in the player's [`StateSlot`], claimed through an
//! ownership protocol so coexisting quirks cannot clobber each other's
//! state.
//!
//! The host serializes hook calls per player instance; this crate performs
//! no internal locking. Separate player instances are independent.
//!
//! # Example
//!
//! ```rust
//! use vela_pipeline::{BufferingMode, ElementRef, ElementState, FakeElement};
//! use vela_quirks::{BroadcomQuirk, PlayerContext, QuirksManager};
//!
//! let manager = QuirksManager::builder()
//!     .add_quirk(BroadcomQuirk::new())
//!     .build();
//! let mut player = PlayerContext::new();
//!
//! // The pipeline announces element state transitions to the quirks.
//! let queue: ElementRef = {
//!     let queue = FakeElement::new("queue2-0");
//!     queue.set_property("max-size-bytes", 1000u32);
//!     queue
//! };
//! let filter: ElementRef = {
//!     let filter = FakeElement::new("brcmvidfilter0");
//!     filter.set_property("buffered-bytes", 200u32);
//!     filter
//! };
//! manager.setup_buffering_percentage_correction(
//!     &mut player, ElementState::Null, ElementState::Ready, &queue);
//! manager.setup_buffering_percentage_correction(
//!     &mut player, ElementState::Null, ElementState::Ready, &filter);
//!
//! // 50% of the 1000-byte queue plus 200 hardware-buffered bytes is 70%;
//! // the reported value is the 10-sample moving average including that 70.
//! let corrected = manager.correct_buffering_percentage(&mut player, 50, BufferingMode::Stream);
//! assert_eq!(corrected, 7);
//! ```

mod average;
mod broadcom;
mod context;
mod holepunch;
mod manager;
mod quirk;
mod state;
pub mod types;

// Public exports
pub use average::MovingAverage;
pub use broadcom::BroadcomQuirk;
pub use context::PlayerContext;
pub use holepunch::HolePunchQuirk;
pub use manager::{QuirksManager, QuirksManagerBuilder};
pub use quirk::Quirk;
pub use state::{OwnerId, StateSlot};
pub use types::{ElementCharacteristics, FactoryListType, VideoRectangle};
