//! Vela Player - Pipeline Boundary
//!
//! Boundary types between Vela Player and the multimedia element runtime.
//!
//! This crate provides:
//! - `PipelineElement` - handle trait for runtime elements (by-name property
//!   access, buffering queries, upstream pad-peer discovery)
//! - `PropertyValue` / `Structure` - variant values for element properties,
//!   including nested per-queue statistics
//! - `ElementState` / `BufferingMode` / `BufferingQuery` - state-transition
//!   and buffering-query vocabulary
//! - `testing::FakeElement` - scriptable in-memory element for tests
//!
//! # Architecture
//!
//! `vela-pipeline` is runtime-agnostic: nothing here links against a real
//! multimedia framework. The embedder wraps its runtime's element handles in
//! `PipelineElement` and hands them to higher layers (such as `vela-quirks`),
//! which only ever talk to elements through this boundary.
//!
//! # Example
//!
//! ```rust
//! use vela_pipeline::{FakeElement, PipelineElement, PipelineElementExt};
//!
//! let queue = FakeElement::new("queue2-0");
//! queue.set_property("max-size-bytes", 2_000_000u32);
//!
//! assert!(queue.has_property("max-size-bytes"));
//! assert_eq!(queue.uint_property("max-size-bytes"), Ok(2_000_000));
//! ```

mod element;
mod error;
mod state;
pub mod testing;
mod value;

// Public exports
pub use element::{ElementRef, PipelineElement, PipelineElementExt};
pub use error::{PropertyError, Result};
pub use state::{BufferingMode, BufferingQuery, ElementState};
pub use testing::FakeElement;
pub use value::{PropertyValue, Structure};
