//! Shared constants and invariants

/// Issuer claim stamped into every internal token.
pub const INTERNAL_ISSUER: &str = "my-api-gateway";

/// Lifetime of an internal token, in seconds.
pub const TOKEN_TTL_SECS: u64 = 900;

/// Request header carrying the forwarded external claim payload.
pub const FORWARDED_PAYLOAD_HEADER: &str = "x-jwt-payload";

/// Response header carrying the freshly signed internal token.
pub const INTERNAL_TOKEN_HEADER: &str = "x-internal-jwt";

/// Timeout applied to every downstream collaborator call.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
