//! Protocol constants

/// Header naming the format of the frame body
pub const CONTENT_TYPE: &str = "content-type";

/// Header naming the destination of a SEND or SUBSCRIBE
pub const DESTINATION: &str = "destination";

/// Header requesting a RECEIPT from the server
pub const RECEIPT: &str = "receipt";

/// Default maximum number of headers per frame
pub const DEFAULT_MAX_HEADERS: u32 = 64;

/// Default maximum header name length in bytes
pub const DEFAULT_MAX_HEADER_NAME_SIZE: u32 = 256;

/// Default maximum header value length in bytes
pub const DEFAULT_MAX_HEADER_VALUE_SIZE: u32 = 4096;

/// Default maximum body size (1MB)
pub const DEFAULT_MAX_BODY_SIZE: u32 = 1024 * 1024;

/// Limit value that switches off a single numeric check.
///
/// Zero is a real limit, not "unlimited". Set a field to this value to keep
/// the other checks active while this one accepts any practical input.
pub const CONSTRAINTS_MAX: u32 = u32::MAX;
