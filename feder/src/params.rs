//! View and search parameters forwarded to the Feder library.
//!
//! Both maps are opaque to this crate: keys and values are handed to the
//! library verbatim. The helper setters only cover the keys Feder is known
//! to read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters spread into the Feder viewer's `viewParams`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewParams(Map<String, Value>);

impl ViewParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas width in CSS pixels.
    pub fn width(self, width: u32) -> Self {
        self.with("width", width)
    }

    /// Canvas height in CSS pixels.
    pub fn height(self, height: u32) -> Self {
        self.with("height", height)
    }

    /// Device pixel multiplier applied to the canvas backing store.
    pub fn canvas_scale(self, scale: f64) -> Self {
        self.with("canvasScale", scale)
    }

    /// Kind of media shown for hovered rows (e.g. `img`).
    pub fn media_type(self, media_type: impl Into<String>) -> Self {
        self.with("mediaType", media_type.into())
    }

    /// Sets an arbitrary key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlays `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: ViewParams) {
        self.0.extend(other.0);
    }
}

impl From<Map<String, Value>> for ViewParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Parameters passed to `feder.setSearchParams` before a search action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchParams(Map<String, Value>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of neighbours to return.
    pub fn k(self, k: u32) -> Self {
        self.with("k", k)
    }

    /// HNSW search breadth.
    pub fn ef(self, ef: u32) -> Self {
        self.with("ef", ef)
    }

    /// IVF clusters probed per query.
    pub fn nprobe(self, nprobe: u32) -> Self {
        self.with("nprobe", nprobe)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlays `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: SearchParams) {
        self.0.extend(other.0);
    }
}

impl From<Map<String, Value>> for SearchParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
