//! Scriptable in-memory elements for tests
//!
//! `FakeElement` stands in for a runtime element in unit and integration
//! tests: properties, buffering-query answers, and upstream topology are all
//! scripted by the test. Also handy for embedder prototyping before a real
//! runtime backend exists.

use crate::element::{ElementRef, PipelineElement};
use crate::error::{PropertyError, Result};
use crate::state::BufferingQuery;
use crate::value::PropertyValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted answer to a buffering query
#[derive(Debug, Clone, Copy)]
struct BufferingAnswer {
    percent: u32,
    busy: bool,
}

/// In-memory stand-in for a pipeline element
///
/// Interior mutability lets tests reconfigure an element after handing out
/// shared [`ElementRef`] handles, the way a live element's properties change
/// underneath its holders.
pub struct FakeElement {
    name: String,
    properties: Mutex<HashMap<String, PropertyValue>>,
    upstream: Mutex<Vec<ElementRef>>,
    buffering_answer: Mutex<Option<BufferingAnswer>>,
}

impl FakeElement {
    /// Create a new element with the given instance name
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            properties: Mutex::new(HashMap::new()),
            upstream: Mutex::new(Vec::new()),
            buffering_answer: Mutex::new(None),
        })
    }

    /// Set or replace a property
    pub fn set_property(&self, property: &str, value: impl Into<PropertyValue>) {
        self.properties
            .lock()
            .unwrap()
            .insert(property.to_string(), value.into());
    }

    /// Remove a property (simulates older runtime versions)
    pub fn remove_property(&self, property: &str) {
        self.properties.lock().unwrap().remove(property);
    }

    /// Attach an upstream peer on the next sink pad
    pub fn add_upstream_peer(&self, peer: ElementRef) {
        self.upstream.lock().unwrap().push(peer);
    }

    /// Script a successful buffering-query answer
    ///
    /// Until this is called, queries against the element fail.
    pub fn set_buffering_answer(&self, percent: u32, busy: bool) {
        *self.buffering_answer.lock().unwrap() = Some(BufferingAnswer { percent, busy });
    }

    /// Make buffering queries fail again
    pub fn clear_buffering_answer(&self) {
        *self.buffering_answer.lock().unwrap() = None;
    }
}

impl PipelineElement for FakeElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_property(&self, property: &str) -> bool {
        self.properties.lock().unwrap().contains_key(property)
    }

    fn property(&self, property: &str) -> Result<PropertyValue> {
        self.properties
            .lock()
            .unwrap()
            .get(property)
            .cloned()
            .ok_or_else(|| PropertyError::NotFound {
                element: self.name.clone(),
                property: property.to_string(),
            })
    }

    fn query(&self, query: &mut BufferingQuery) -> bool {
        match *self.buffering_answer.lock().unwrap() {
            Some(answer) => {
                query.percent = answer.percent;
                query.busy = answer.busy;
                true
            }
            None => false,
        }
    }

    fn upstream_peers(&self) -> Vec<ElementRef> {
        self.upstream.lock().unwrap().clone()
    }
}
