//! Configuration types for `stompguard`

use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use stompguard_protocol::Constraints;
use tracing::{debug, warn};

/// Frame constraints configuration
///
/// Missing fields fall back to the [`Constraints`] defaults, so an empty
/// document yields disabled constraints with the standard limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    /// Apply the constraints (default: false)
    pub enabled: bool,
    /// Maximum headers per frame (default: 64)
    pub max_headers: u32,
    /// Maximum header name length in bytes (default: 256)
    pub max_header_name_size: u32,
    /// Maximum header value length in bytes (default: 4096)
    pub max_header_value_size: u32,
    /// Maximum body size in bytes (default: 1MB)
    pub max_body_size: u32,
    /// Require an allowed content-type on body-bearing frames
    pub enforce_allowed_content_types: bool,
    /// Content types and whether each one is permitted
    pub allowed_content_types: HashMap<String, bool>,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        Self::from(&Constraints::default())
    }
}

impl From<&Constraints> for ConstraintsConfig {
    fn from(c: &Constraints) -> Self {
        Self {
            enabled: c.enabled,
            max_headers: c.max_headers,
            max_header_name_size: c.max_header_name_size,
            max_header_value_size: c.max_header_value_size,
            max_body_size: c.max_body_size,
            enforce_allowed_content_types: c.enforce_allowed_content_types,
            allowed_content_types: c.allowed_content_types.clone(),
        }
    }
}

impl ConstraintsConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    ///
    /// Limits are not sanity-checked; zero is a legal limit. Only allow-list
    /// keys that no frame could ever carry are rejected.
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self.allowed_content_types.keys().find(|k| k.contains('\0')) {
            return Err(GuardError::Config(format!(
                "allowed content type {key:?} contains NUL"
            )));
        }
        Ok(())
    }

    /// Build the [`Constraints`] described by this configuration
    pub fn build(&self) -> Constraints {
        if self.enabled {
            debug!(
                max_headers = self.max_headers,
                max_header_name_size = self.max_header_name_size,
                max_header_value_size = self.max_header_value_size,
                max_body_size = self.max_body_size,
                enforce_allowed_content_types = self.enforce_allowed_content_types,
                "Frame constraints enabled"
            );
            self.warn_suspicious_limits();
        } else {
            debug!("Frame constraints disabled");
        }

        Constraints {
            enabled: self.enabled,
            max_headers: self.max_headers,
            max_header_name_size: self.max_header_name_size,
            max_header_value_size: self.max_header_value_size,
            max_body_size: self.max_body_size,
            enforce_allowed_content_types: self.enforce_allowed_content_types,
            allowed_content_types: self.allowed_content_types.clone(),
        }
    }

    fn warn_suspicious_limits(&self) {
        let limits = [
            ("max_headers", self.max_headers),
            ("max_header_name_size", self.max_header_name_size),
            ("max_header_value_size", self.max_header_value_size),
            ("max_body_size", self.max_body_size),
        ];
        for (name, value) in limits {
            if value == 0 {
                warn!(limit = name, "Limit is zero, anything non-empty will be rejected");
            }
        }

        if self.enforce_allowed_content_types
            && !self.allowed_content_types.values().any(|allowed| *allowed)
        {
            warn!("Content-type enforcement enabled but no content type is allowed");
        }
    }
}
