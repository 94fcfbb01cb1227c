//! Path rules declared inside a user-agent group.

use std::fmt;
use std::str::FromStr;

use crate::error::ArgumentError;
use crate::path::{encode_path, normalize_path};
use crate::pattern::{PathPattern, Specificity};

/// The effect of a rule when it is the most specific match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `Allow`: the path may be crawled
    Allow,
    /// `Disallow`: the path must not be crawled
    Disallow,
    /// `Noindex`: the path must not be indexed; treated as a denial by queries
    NoIndex,
}

impl RuleKind {
    /// Returns the directive spelling of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Disallow => "Disallow",
            Self::NoIndex => "Noindex",
        }
    }

    /// Returns true for [`RuleKind::Allow`].
    #[must_use]
    pub const fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "disallow" => Ok(Self::Disallow),
            "noindex" => Ok(Self::NoIndex),
            _ => Err(ArgumentError::Invalid {
                argument: "kind",
                value: s.to_string(),
            }),
        }
    }
}

/// A single `Allow`, `Disallow` or `Noindex` rule.
///
/// The pattern is normalized when the rule is created (leading `/`
/// enforced, percent-decoded, repeated slashes collapsed) and compiled once.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::{Rule, RuleKind};
///
/// let rule = Rule::new(RuleKind::Disallow, "private//%7Edocs").unwrap();
/// assert_eq!(rule.pattern(), "/private/~docs");
/// assert!(rule.matches("/private/~docs/index.html"));
/// assert_eq!(rule.to_string(), "Disallow: /private/~docs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    kind: RuleKind,
    pattern: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    matcher: PathPattern,
}

impl Rule {
    /// Creates a rule from a raw path pattern.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing` if `path` is empty.
    pub fn new(kind: RuleKind, path: &str) -> Result<Self, ArgumentError> {
        let path = ArgumentError::require("path", path)?;
        Ok(Self::compile(kind, path))
    }

    pub(crate) fn compile(kind: RuleKind, path: &str) -> Self {
        let pattern = normalize_path(path);
        let matcher = PathPattern::compile(&pattern);
        Self {
            kind,
            pattern,
            matcher,
        }
    }

    /// Returns the rule kind.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Returns the normalized pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn matcher(&self) -> &PathPattern {
        &self.matcher
    }

    /// Returns true if the rule applies to an already normalized `path`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Returns the specificity of the rule's pattern.
    #[must_use]
    pub const fn specificity(&self) -> Specificity {
        self.matcher.specificity()
    }
}

impl fmt::Display for Rule {
    /// Renders the rule as a directive line. Characters that would be
    /// decoded again or break the line are percent-encoded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, encode_path(&self.pattern))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RuleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_pattern() {
        let rule = Rule::new(RuleKind::Allow, "a//b").unwrap();
        assert_eq!(rule.pattern(), "/a/b");
        assert_eq!(rule.kind(), RuleKind::Allow);
    }

    #[test]
    fn new_rejects_empty_path() {
        let result = Rule::new(RuleKind::Disallow, "");
        assert!(matches!(result, Err(ArgumentError::Missing { argument: "path" })));
    }

    #[test]
    fn matches_uses_compiled_pattern() {
        let rule = Rule::new(RuleKind::Disallow, "/*.gif$").unwrap();
        assert!(rule.matches("/images/cat.gif"));
        assert!(!rule.matches("/images/cat.gif.html"));
    }

    #[test]
    fn specificity_of_normalized_pattern() {
        // "page" becomes "/page" before scoring.
        let rule = Rule::new(RuleKind::Allow, "page").unwrap();
        assert_eq!(rule.specificity().value(), 5.0);
    }

    #[test]
    fn equal_rules_compare_equal() {
        let a = Rule::new(RuleKind::Allow, "/x").unwrap();
        let b = Rule::new(RuleKind::Allow, "x").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Rule::new(RuleKind::Disallow, "/x").unwrap());
    }

    #[test]
    fn kind_parse_and_display() {
        assert_eq!("ALLOW".parse(), Ok(RuleKind::Allow));
        assert_eq!("noindex".parse(), Ok(RuleKind::NoIndex));
        assert!(matches!(
            "crawl-delay".parse::<RuleKind>(),
            Err(ArgumentError::Invalid { argument: "kind", .. })
        ));
        assert_eq!(RuleKind::Disallow.to_string(), "Disallow");
        assert!(RuleKind::Allow.is_allow());
        assert!(!RuleKind::NoIndex.is_allow());
    }

    #[test]
    fn display_as_directive() {
        let rule = Rule::new(RuleKind::NoIndex, "/drafts/").unwrap();
        assert_eq!(rule.to_string(), "Noindex: /drafts/");
    }

    #[test]
    fn display_escapes_decoded_percent() {
        let rule = Rule::new(RuleKind::Disallow, "/a%2525b").unwrap();
        assert_eq!(rule.pattern(), "/a%25b");
        assert_eq!(rule.to_string(), "Disallow: /a%2525b");
    }

    #[test]
    fn display_keeps_decoded_line_breaks_on_one_line() {
        let rule = Rule::new(RuleKind::Disallow, "/x%0AUser-agent:%20evil%0ADisallow:%20/").unwrap();
        assert_eq!(rule.pattern(), "/x\nUser-agent: evil\nDisallow: /");
        assert_eq!(
            rule.to_string(),
            "Disallow: /x%0AUser-agent:%20evil%0ADisallow:%20/"
        );
    }

    #[test]
    fn rendered_pattern_recompiles_to_same_rule() {
        for raw in ["/a%2525b", "/tab%09x", "/q%20%23frag", "/100%", "/%FF", "/*.php$"] {
            let rule = Rule::new(RuleKind::Allow, raw).unwrap();
            let rendered = rule.to_string();
            let value = rendered.strip_prefix("Allow: ").unwrap();
            assert_eq!(Rule::new(RuleKind::Allow, value).unwrap(), rule, "{raw}");
        }
    }
}
