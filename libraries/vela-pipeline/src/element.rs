//! Element handle trait
//!
//! The embedder wraps its runtime's element handles in `PipelineElement`;
//! everything above this crate talks to elements only through this trait.

use crate::error::{PropertyError, Result};
use crate::state::BufferingQuery;
use crate::value::{PropertyValue, Structure};
use std::sync::Arc;

/// Shared handle to a pipeline element
pub type ElementRef = Arc<dyn PipelineElement>;

/// Handle to a single element in the media pipeline
///
/// Mirrors the slice of the runtime element API the player layers consume:
/// identity by name, by-name property access, buffering queries, and
/// upstream topology discovery.
pub trait PipelineElement: Send + Sync {
    /// Instance name of the element (e.g. `queue2-0`, `brcmvidfilter0`)
    fn name(&self) -> &str;

    /// Whether the element exposes the given property
    ///
    /// Property sets vary across runtime versions, so callers probe before
    /// relying on a property.
    fn has_property(&self, property: &str) -> bool;

    /// Read a property by name
    fn property(&self, property: &str) -> Result<PropertyValue>;

    /// Issue a buffering query against this element
    ///
    /// On success the element has filled in the query's answer fields.
    fn query(&self, query: &mut BufferingQuery) -> bool;

    /// Peer elements attached to this element's sink pads, in pad order
    ///
    /// Used to discover the upstream neighbor of a claimed element.
    fn upstream_peers(&self) -> Vec<ElementRef>;
}

/// Typed property accessors over [`PipelineElement::property`]
pub trait PipelineElementExt: PipelineElement {
    /// Read a property as `u32`
    fn uint_property(&self, property: &str) -> Result<u32> {
        self.property(property)?
            .as_uint()
            .ok_or_else(|| self.type_mismatch(property, "uint"))
    }

    /// Read a property as `u64`, widening 32-bit values
    fn uint64_property(&self, property: &str) -> Result<u64> {
        self.property(property)?
            .as_uint64()
            .ok_or_else(|| self.type_mismatch(property, "uint64"))
    }

    /// Read a property as a nested structure
    fn structure_property(&self, property: &str) -> Result<Structure> {
        match self.property(property)? {
            PropertyValue::Structure(structure) => Ok(structure),
            _ => Err(self.type_mismatch(property, "structure")),
        }
    }

    #[doc(hidden)]
    fn type_mismatch(&self, property: &str, expected: &'static str) -> PropertyError {
        PropertyError::TypeMismatch {
            element: self.name().to_string(),
            property: property.to_string(),
            expected,
        }
    }
}

impl<T: PipelineElement + ?Sized> PipelineElementExt for T {}
