//! Core types for quirk dispatch

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Runtime characteristics of an element being configured
///
/// Snapshot of the media being played, handed to quirks so they can tune
/// element configuration per stream kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCharacteristics {
    /// The source is a live capture stream (camera/microphone)
    pub is_media_stream: bool,

    /// The stream carries a video track
    pub has_video: bool,

    /// The stream carries an audio track
    pub has_audio: bool,

    /// The stream is live (no seeking, no buffering targets)
    pub is_live: bool,
}

/// Bitmask restricting which decoder factories the pipeline may autoplug
///
/// Quirks use this to steer decoder selection towards (or away from) a
/// platform's hardware decoders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryListType(u64);

impl FactoryListType {
    /// No restriction bits set
    pub const EMPTY: Self = Self(0);

    /// Decoder factories
    pub const DECODER: Self = Self(1);

    /// Sink factories
    pub const SINK: Self = Self(1 << 1);

    /// Factories handling audio media
    pub const AUDIO: Self = Self(1 << 2);

    /// Factories handling video media
    pub const VIDEO: Self = Self(1 << 3);

    /// Hardware-backed factories only
    pub const HARDWARE: Self = Self(1 << 4);

    /// Whether every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bit representation
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reconstruct from raw bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
}

impl BitOr for FactoryListType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FactoryListType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Placement rectangle for a hole-punched video overlay, in page pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRectangle {
    /// Left edge
    pub x: i32,

    /// Top edge
    pub y: i32,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl VideoRectangle {
    /// Create a rectangle
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
