//! Lenient parser for robots.txt files with crawl-permission queries.
//!
//! This crate turns robots.txt text into a model of per-agent groups and
//! answers "may this agent crawl this URL" against it. It does no I/O: the
//! caller fetches the file and passes its text in.
//!
//! # Quick Start
//!
//! ```rust
//! use robots_txt_parser::Robots;
//!
//! let robots = Robots::parse(
//!     "User-agent: *\n\
//!      Disallow: /private/\n\
//!      Allow: /private/press/\n\
//!      Crawl-delay: 5\n\
//!      \n\
//!      User-agent: BadBot\n\
//!      Disallow: /\n\
//!      \n\
//!      Sitemap: https://example.com/sitemap.xml\n",
//! );
//!
//! assert!(robots.is_allowed("https://example.com/index.html", "GoodBot").unwrap());
//! assert!(robots.is_disallowed("/private/reports.html", "GoodBot").unwrap());
//! assert!(robots.is_allowed("/private/press/2024.html", "GoodBot").unwrap());
//! assert!(robots.is_disallowed("/index.html", "badbot").unwrap());
//!
//! assert_eq!(robots.crawl_delay("GoodBot"), Some(5.0));
//! assert_eq!(robots.sitemaps(), ["https://example.com/sitemap.xml"]);
//! ```
//!
//! # Parsing
//!
//! Lines may end in `\n`, `\r\n` or `\r`. A `#` at the start of a value or
//! after whitespace starts a comment. Lines without a `:` and directives the
//! parser does not know are ignored. Values that a known directive rejects
//! (a negative `Crawl-delay`, a malformed `Visit-time`, ...) are skipped and
//! listed in [`Robots::reports`].
//!
//! Consecutive `User-agent` lines share the directives that follow them.
//! Directives before the first `User-agent` line belong to `*`. A group's
//! singular fields keep the first value declared; `Host` keeps the last.
//!
//! # Matching
//!
//! | Pattern | Meaning |
//! |---------|---------|
//! | `/fish` | any path starting with `/fish` |
//! | `/*.php` | any path containing `.php` |
//! | `/*.php$` | any path ending in `.php` |
//! | `/fish$` | exactly `/fish` |
//!
//! Patterns and paths are percent-decoded and have repeated slashes
//! collapsed before matching. Paths are case-sensitive; agent names are not.
//! When several rules match, the longest pattern wins (a `*` counts half a
//! character less, a trailing `$` half a character more); on a tie the rule
//! declared first wins. No matching rule means the path is allowed.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod constants;
mod directive;
mod error;
mod group;
mod line;
mod options;
mod path;
mod pattern;
pub mod prelude;
mod report;
mod robots;
mod rule;
mod value;

pub use constants::{COMMENT_START, DEFAULT_MAX_CONTENT_LENGTH, END_ANCHOR, WILDCARD, WILDCARD_AGENT};
pub use directive::{Directive, Scope, UnknownDirective};
pub use error::ArgumentError;
pub use group::Group;
pub use line::{DirectiveLine, directive_lines, parse_line};
pub use options::ParseOptions;
pub use path::{extract_path, normalize_path};
pub use pattern::{PathPattern, Specificity, specificity};
pub use report::Report;
pub use robots::{Robots, parse};
pub use rule::{Rule, RuleKind};
