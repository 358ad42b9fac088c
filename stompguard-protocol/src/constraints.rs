//! Frame constraints for security hardening
//!
//! A [`Constraints`] value holds the limits an endpoint applies to frames
//! received from clients. Each check is independent and side-effect free, so
//! the caller decides which checks run and when: per-header checks while a
//! frame is being decoded, whole-frame checks once it is assembled.
//!
//! Configure the value completely before sharing it. Once it sits behind a
//! `&` or an [`Arc`] it is read concurrently without locking, and nothing may
//! mutate it for as long as validations are running.

use crate::constants::{
    CONTENT_TYPE, DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_HEADERS, DEFAULT_MAX_HEADER_NAME_SIZE,
    DEFAULT_MAX_HEADER_VALUE_SIZE,
};
use crate::frame::{Command, Frame};
use std::collections::HashMap;
use std::sync::Arc;

/// Constraint violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("too many headers: {count} exceeds limit of {limit}")]
    TooManyHeaders { count: usize, limit: u32 },

    #[error("header name too large: {len} bytes exceeds limit of {limit} bytes")]
    HeaderNameTooLarge { len: usize, limit: u32 },

    #[error("header value too large: {len} bytes exceeds limit of {limit} bytes")]
    HeaderValueTooLarge { len: usize, limit: u32 },

    #[error("body too large: {len} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { len: usize, limit: u32 },

    #[error("invalid content type: {content_type:?}")]
    InvalidContentType { content_type: String },

    #[error("missing content type on {command} frame with {body_len} byte body")]
    MissingContentType { command: Command, body_len: usize },
}

/// Limits applied to frames received from a client.
///
/// Nothing is enforced until `enabled` is set. A numeric limit can be turned
/// off on its own by setting it to [`CONSTRAINTS_MAX`](crate::constants::CONSTRAINTS_MAX);
/// zero means zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraints {
    /// Master switch. Defaults to disabled
    pub enabled: bool,

    /// Maximum headers per frame (default: 64)
    pub max_headers: u32,
    /// Maximum header name length in bytes (default: 256)
    pub max_header_name_size: u32,
    /// Maximum header value length in bytes (default: 4096)
    pub max_header_value_size: u32,
    /// Maximum body size in bytes (default: 1MB)
    pub max_body_size: u32,

    /// Require body-bearing frames to declare an allowed content type
    pub enforce_allowed_content_types: bool,
    /// Content types mapped to whether they are permitted. A type listed as
    /// `false` is rejected just like an unlisted one.
    pub allowed_content_types: HashMap<String, bool>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            enabled: false,
            max_headers: DEFAULT_MAX_HEADERS,
            max_header_name_size: DEFAULT_MAX_HEADER_NAME_SIZE,
            max_header_value_size: DEFAULT_MAX_HEADER_VALUE_SIZE,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            enforce_allowed_content_types: false,
            allowed_content_types: HashMap::new(),
        }
    }
}

impl Constraints {
    /// Create disabled constraints populated with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit `content_type` when the allow-list is enforced
    pub fn allow_content_type(&mut self, content_type: impl Into<String>) {
        self.allowed_content_types.insert(content_type.into(), true);
    }

    /// Keep `content_type` listed but rejected
    pub fn disallow_content_type(&mut self, content_type: impl Into<String>) {
        self.allowed_content_types.insert(content_type.into(), false);
    }

    /// Whether `content_type` is listed and mapped to `true`
    pub fn is_content_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .get(content_type)
            .copied()
            .unwrap_or(false)
    }

    /// Check that the header count does not exceed `max_headers`
    pub fn validate_max_headers(&self, frame: &Frame) -> Result<(), ConstraintError> {
        let count = frame.header.len();
        if self.enabled && exceeds(count, self.max_headers) {
            return Err(ConstraintError::TooManyHeaders {
                count,
                limit: self.max_headers,
            });
        }
        Ok(())
    }

    /// Check a single header name length, measured in bytes by the caller
    pub fn validate_header_name_len(&self, len: usize) -> Result<(), ConstraintError> {
        if self.enabled && exceeds(len, self.max_header_name_size) {
            return Err(ConstraintError::HeaderNameTooLarge {
                len,
                limit: self.max_header_name_size,
            });
        }
        Ok(())
    }

    /// Check a single header value length, measured in bytes by the caller.
    ///
    /// Rejects only lengths strictly above `max_header_value_size`, the same
    /// direction as every other numeric check.
    pub fn validate_header_value_len(&self, len: usize) -> Result<(), ConstraintError> {
        if self.enabled && exceeds(len, self.max_header_value_size) {
            return Err(ConstraintError::HeaderValueTooLarge {
                len,
                limit: self.max_header_value_size,
            });
        }
        Ok(())
    }

    /// Check a body length against `max_body_size`
    pub fn validate_body_len(&self, len: usize) -> Result<(), ConstraintError> {
        if self.enabled && exceeds(len, self.max_body_size) {
            return Err(ConstraintError::BodyTooLarge {
                len,
                limit: self.max_body_size,
            });
        }
        Ok(())
    }

    /// Check the frame's `content-type` against the allow-list.
    ///
    /// Only runs when both `enabled` and `enforce_allowed_content_types` are
    /// set. The header value is not parsed; it must match an allowed key
    /// exactly, and an empty value is checked like any other. Without the
    /// header, SEND, MESSAGE and ERROR frames with a non-empty body are
    /// rejected and everything else passes.
    pub fn validate_content_type(&self, frame: &Frame) -> Result<(), ConstraintError> {
        if !(self.enabled && self.enforce_allowed_content_types) {
            return Ok(());
        }

        match frame.header.contains(CONTENT_TYPE) {
            Some(content_type) => {
                if self.is_content_type_allowed(content_type) {
                    Ok(())
                } else {
                    Err(ConstraintError::InvalidContentType {
                        content_type: content_type.to_string(),
                    })
                }
            }
            None if !frame.body.is_empty() && frame.command.is_body_bearing() => {
                Err(ConstraintError::MissingContentType {
                    command: frame.command,
                    body_len: frame.body.len(),
                })
            }
            None => Ok(()),
        }
    }
}

/// `len > limit` without truncating `len` to 32 bits
fn exceeds(len: usize, limit: u32) -> bool {
    u64::try_from(len).map_or(true, |len| len > u64::from(limit))
}

/// The validation surface, implemented for [`Constraints`] and for the ways a
/// caller may hold it.
///
/// `None` means no constraints are configured and accepts every frame, the
/// same as a present but disabled [`Constraints`].
pub trait FrameConstraints {
    fn validate_max_headers(&self, frame: &Frame) -> Result<(), ConstraintError>;
    fn validate_header_name_len(&self, len: usize) -> Result<(), ConstraintError>;
    fn validate_header_value_len(&self, len: usize) -> Result<(), ConstraintError>;
    fn validate_body_len(&self, len: usize) -> Result<(), ConstraintError>;
    fn validate_content_type(&self, frame: &Frame) -> Result<(), ConstraintError>;
}

impl FrameConstraints for Constraints {
    fn validate_max_headers(&self, frame: &Frame) -> Result<(), ConstraintError> {
        Constraints::validate_max_headers(self, frame)
    }

    fn validate_header_name_len(&self, len: usize) -> Result<(), ConstraintError> {
        Constraints::validate_header_name_len(self, len)
    }

    fn validate_header_value_len(&self, len: usize) -> Result<(), ConstraintError> {
        Constraints::validate_header_value_len(self, len)
    }

    fn validate_body_len(&self, len: usize) -> Result<(), ConstraintError> {
        Constraints::validate_body_len(self, len)
    }

    fn validate_content_type(&self, frame: &Frame) -> Result<(), ConstraintError> {
        Constraints::validate_content_type(self, frame)
    }
}

impl<C: FrameConstraints + ?Sized> FrameConstraints for &C {
    fn validate_max_headers(&self, frame: &Frame) -> Result<(), ConstraintError> {
        (**self).validate_max_headers(frame)
    }

    fn validate_header_name_len(&self, len: usize) -> Result<(), ConstraintError> {
        (**self).validate_header_name_len(len)
    }

    fn validate_header_value_len(&self, len: usize) -> Result<(), ConstraintError> {
        (**self).validate_header_value_len(len)
    }

    fn validate_body_len(&self, len: usize) -> Result<(), ConstraintError> {
        (**self).validate_body_len(len)
    }

    fn validate_content_type(&self, frame: &Frame) -> Result<(), ConstraintError> {
        (**self).validate_content_type(frame)
    }
}

impl<C: FrameConstraints + ?Sized> FrameConstraints for Arc<C> {
    fn validate_max_headers(&self, frame: &Frame) -> Result<(), ConstraintError> {
        (**self).validate_max_headers(frame)
    }

    fn validate_header_name_len(&self, len: usize) -> Result<(), ConstraintError> {
        (**self).validate_header_name_len(len)
    }

    fn validate_header_value_len(&self, len: usize) -> Result<(), ConstraintError> {
        (**self).validate_header_value_len(len)
    }

    fn validate_body_len(&self, len: usize) -> Result<(), ConstraintError> {
        (**self).validate_body_len(len)
    }

    fn validate_content_type(&self, frame: &Frame) -> Result<(), ConstraintError> {
        (**self).validate_content_type(frame)
    }
}

impl<C: FrameConstraints> FrameConstraints for Option<C> {
    fn validate_max_headers(&self, frame: &Frame) -> Result<(), ConstraintError> {
        match self {
            Some(c) => c.validate_max_headers(frame),
            None => Ok(()),
        }
    }

    fn validate_header_name_len(&self, len: usize) -> Result<(), ConstraintError> {
        match self {
            Some(c) => c.validate_header_name_len(len),
            None => Ok(()),
        }
    }

    fn validate_header_value_len(&self, len: usize) -> Result<(), ConstraintError> {
        match self {
            Some(c) => c.validate_header_value_len(len),
            None => Ok(()),
        }
    }

    fn validate_body_len(&self, len: usize) -> Result<(), ConstraintError> {
        match self {
            Some(c) => c.validate_body_len(len),
            None => Ok(()),
        }
    }

    fn validate_content_type(&self, frame: &Frame) -> Result<(), ConstraintError> {
        match self {
            Some(c) => c.validate_content_type(frame),
            None => Ok(()),
        }
    }
}
