//! Render configuration.
//!
//! Options can be built in code or loaded from YAML/JSON. Missing keys fall
//! back to the defaults:
//!
//! ```rust
//! use dst_render::RenderOptions;
//!
//! let options = RenderOptions::from_yaml("collapse_marker_lines: true").unwrap();
//! assert!(options.collapse_marker_lines);
//! assert_eq!(options.undefined, "");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling a render call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Remove the blank line a section marker leaves when it sits alone on
    /// its own line. See [`collapse_marker_lines`](crate::collapse_marker_lines).
    pub collapse_marker_lines: bool,

    /// Text emitted for undefined (null) values.
    pub undefined: String,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse_marker_lines(mut self, enabled: bool) -> Self {
        self.collapse_marker_lines = enabled;
        self
    }

    pub fn with_undefined(mut self, placeholder: impl Into<String>) -> Self {
        self.undefined = placeholder.into();
        self
    }

    /// Parses options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
