//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use robots_txt_parser::prelude::*;
//!
//! let robots = Robots::parse("User-agent: *\nDisallow: /tmp/");
//! assert!(robots.is_disallowed("/tmp/cache", "anybot").unwrap());
//! ```
//!
//! Line-level and path-level helpers (`directive_lines`, `normalize_path`,
//! ...) are left out; import them from the crate root when needed.

pub use crate::{
    // Model
    Group, Report, Robots, Rule, RuleKind,
    // Configuration
    ParseOptions,
    // Errors
    ArgumentError,
    // Constants
    WILDCARD_AGENT,
};
