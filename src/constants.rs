//! Constants for robots.txt parsing.

/// User-agent name of the fallback group.
///
/// Rules declared before any `User-agent` line are attached to this agent, and
/// queries for an agent without its own group fall back to it.
pub const WILDCARD_AGENT: &str = "*";

/// Content limit most crawlers apply to a robots.txt body, in bytes.
///
/// Not enforced unless passed to
/// [`ParseOptions::with_max_content_length`](crate::ParseOptions::with_max_content_length).
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 500 * 1024;

/// Path wildcard character.
pub const WILDCARD: char = '*';

/// Path end-of-match anchor character.
pub const END_ANCHOR: char = '$';

/// Comment start character.
pub const COMMENT_START: char = '#';
