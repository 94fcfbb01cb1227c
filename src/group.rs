//! Per-user-agent directive groups.

use std::fmt;

use crate::directive::Directive;
use crate::error::ArgumentError;
use crate::rule::{Rule, RuleKind};

/// The directives that apply to one user-agent name.
///
/// The name keeps the case it was declared with but is compared
/// case-insensitively. Rules keep declaration order. Singular fields
/// (delays, robot version, visit time) keep the first value declared for the
/// agent; later declarations are ignored.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::{Group, RuleKind};
///
/// let mut group = Group::new("Googlebot");
/// group.add_rule(RuleKind::Disallow, "/private/").unwrap();
///
/// assert!(group.is_named("googlebot"));
/// assert_eq!(group.rules().len(), 1);
/// assert_eq!(group.to_string(), "User-agent: Googlebot\nDisallow: /private/\n");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Group {
    name: String,
    rules: Vec<Rule>,
    crawl_delay: Option<f64>,
    cache_delay: Option<f64>,
    comments: Vec<String>,
    robot_version: Option<String>,
    visit_time: Option<String>,
    request_rates: Vec<String>,
}

impl Group {
    /// Creates an empty group for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the user-agent name as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if `user_agent` names this group, ignoring case.
    #[must_use]
    pub fn is_named(&self, user_agent: &str) -> bool {
        self.name.eq_ignore_ascii_case(user_agent) || agent_key(&self.name) == agent_key(user_agent)
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the declared crawl delay in seconds.
    #[must_use]
    pub const fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delay
    }

    /// Returns the declared cache delay in seconds.
    #[must_use]
    pub const fn cache_delay(&self) -> Option<f64> {
        self.cache_delay
    }

    /// Returns the `Comment` values in declaration order.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns the declared robot version (`1.0` or `2.0`).
    #[must_use]
    pub fn robot_version(&self) -> Option<&str> {
        self.robot_version.as_deref()
    }

    /// Returns the declared visit time window (`HHMM-HHMM`).
    #[must_use]
    pub fn visit_time(&self) -> Option<&str> {
        self.visit_time.as_deref()
    }

    /// Returns the `Request-rate` values in declaration order.
    #[must_use]
    pub fn request_rates(&self) -> &[String] {
        &self.request_rates
    }

    /// Appends a rule built from a raw path pattern.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing` if `path` is empty.
    pub fn add_rule(&mut self, kind: RuleKind, path: &str) -> Result<(), ArgumentError> {
        self.rules.push(Rule::new(kind, path)?);
        Ok(())
    }

    pub(crate) fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub(crate) fn push_comment(&mut self, comment: &str) {
        self.comments.push(comment.to_string());
    }

    pub(crate) fn push_request_rate(&mut self, rate: &str) {
        self.request_rates.push(rate.to_string());
    }

    pub(crate) fn set_crawl_delay(&mut self, delay: f64) {
        self.crawl_delay.get_or_insert(delay);
    }

    pub(crate) fn set_cache_delay(&mut self, delay: f64) {
        self.cache_delay.get_or_insert(delay);
    }

    pub(crate) fn set_robot_version(&mut self, version: &str) {
        self.robot_version.get_or_insert_with(|| version.to_string());
    }

    pub(crate) fn set_visit_time(&mut self, window: &str) {
        self.visit_time.get_or_insert_with(|| window.to_string());
    }
}

/// Case-folded form of a user-agent name, used to index groups.
pub(crate) fn agent_key(name: &str) -> String {
    name.to_lowercase()
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", Directive::UserAgent, self.name)?;
        if let Some(version) = &self.robot_version {
            writeln!(f, "{}: {version}", Directive::RobotVersion)?;
        }
        if let Some(window) = &self.visit_time {
            writeln!(f, "{}: {window}", Directive::VisitTime)?;
        }
        for rate in &self.request_rates {
            writeln!(f, "{}: {rate}", Directive::RequestRate)?;
        }
        if let Some(delay) = self.crawl_delay {
            writeln!(f, "{}: {delay}", Directive::CrawlDelay)?;
        }
        if let Some(delay) = self.cache_delay {
            writeln!(f, "{}: {delay}", Directive::CacheDelay)?;
        }
        for comment in &self.comments {
            writeln!(f, "{}: {comment}", Directive::Comment)?;
        }
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
