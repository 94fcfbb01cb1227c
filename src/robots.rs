//! Parsed robots.txt documents and crawl-permission queries.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::builder::GroupBuilder;
use crate::constants::WILDCARD_AGENT;
use crate::directive::Directive;
use crate::error::ArgumentError;
use crate::group::{Group, agent_key};
use crate::line::directive_lines;
use crate::options::ParseOptions;
use crate::path::extract_path;
use crate::report::Report;
use crate::rule::Rule;

/// Parses robots.txt content; shorthand for [`Robots::parse`].
#[must_use]
pub fn parse(content: &str) -> Robots {
    Robots::parse(content)
}

/// A parsed robots.txt document.
///
/// Parsing never fails on content: unusable lines and unknown directives are
/// dropped, and rejected values are listed in [`reports`](Self::reports).
/// The model is immutable once parsed and can be shared across threads for
/// queries.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::Robots;
///
/// let robots = Robots::parse(
///     "User-agent: *\n\
///      Allow: /\n\
///      Disallow: /secret-folder/\n\
///      Allow: /secret-folder/sub-folder/\n\
///      Sitemap: https://example.com/sitemap.xml\n",
/// );
///
/// assert!(!robots.is_allowed("/secret-folder/", "*").unwrap());
/// assert!(robots.is_allowed("/secret-folder/sub-folder/", "*").unwrap());
/// assert!(robots.is_allowed("https://example.com/about", "SomeBot").unwrap());
/// assert_eq!(robots.sitemaps(), ["https://example.com/sitemap.xml"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Robots {
    groups: Vec<Group>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<String, usize>,
    sitemaps: Vec<String>,
    clean_params: Vec<String>,
    host: Option<String>,
    reports: Vec<Report>,
}

impl Robots {
    /// Parses robots.txt content.
    ///
    /// Empty content yields an empty model that allows everything.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self::parse_with_options(content, &ParseOptions::default())
    }

    /// Parses robots.txt content with explicit options.
    #[must_use]
    pub fn parse_with_options(content: &str, options: &ParseOptions) -> Self {
        let mut builder = GroupBuilder::new();

        let (clipped, limit) = options.clip(content);
        if let Some(max) = limit {
            builder.report(Report::ContentTruncated {
                max,
                actual: content.len(),
            });
        }

        for line in directive_lines(clipped) {
            builder.feed(&line);
        }
        builder.finish()
    }

    pub(crate) const fn from_parts(
        groups: Vec<Group>,
        index: HashMap<String, usize>,
        sitemaps: Vec<String>,
        clean_params: Vec<String>,
        host: Option<String>,
        reports: Vec<Report>,
    ) -> Self {
        Self {
            groups,
            index,
            sitemaps,
            clean_params,
            host,
            reports,
        }
    }

    /// Returns the groups in the order their agents were first declared.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the group declared for `user_agent`, ignoring case.
    ///
    /// Does not fall back to `*`; use [`group_for`](Self::group_for) for the
    /// group a query would use.
    #[must_use]
    pub fn group(&self, user_agent: &str) -> Option<&Group> {
        self.index
            .get(&agent_key(user_agent))
            .and_then(|&index| self.groups.get(index))
    }

    /// Returns the group that queries for `user_agent` are evaluated against:
    /// its own group if declared, otherwise the `*` group.
    #[must_use]
    pub fn group_for(&self, user_agent: &str) -> Option<&Group> {
        self.group(user_agent).or_else(|| self.group(WILDCARD_AGENT))
    }

    /// Returns the `Sitemap` values in declaration order, duplicates included.
    #[must_use]
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Returns the `Clean-param` values in declaration order.
    #[must_use]
    pub fn clean_params(&self) -> &[String] {
        &self.clean_params
    }

    /// Returns the last declared `Host` value.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the diagnostics recorded while parsing.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Returns the crawl delay that applies to `user_agent`.
    ///
    /// Uses the same group selection as [`is_allowed`](Self::is_allowed).
    #[must_use]
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        self.group_for(user_agent).and_then(Group::crawl_delay)
    }

    /// Returns the rule that decides a query, or `None` if no rule matches.
    ///
    /// Among matching rules the most specific one wins; on equal specificity
    /// the one declared first wins.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing` if `url` or `user_agent` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_txt_parser::{Robots, RuleKind};
    ///
    /// let robots = Robots::parse("User-agent: *\nAllow: /page\nDisallow: /*.htm");
    /// let rule = robots.matching_rule("/page.htm", "*").unwrap().unwrap();
    /// assert_eq!(rule.kind(), RuleKind::Disallow);
    /// assert_eq!(rule.pattern(), "/*.htm");
    /// ```
    pub fn matching_rule(
        &self,
        url: &str,
        user_agent: &str,
    ) -> Result<Option<&Rule>, ArgumentError> {
        let url = ArgumentError::require("url", url)?;
        let user_agent = ArgumentError::require("user_agent", user_agent)?;

        let Some(group) = self.group_for(user_agent) else {
            return Ok(None);
        };

        let path = extract_path(url);
        let winner = group
            .rules()
            .iter()
            .filter(|rule| rule.matches(&path))
            .reduce(|best, rule| {
                if rule.specificity() > best.specificity() {
                    rule
                } else {
                    best
                }
            });

        trace!(
            user_agent,
            group = group.name(),
            path = %path,
            rule = winner.map(Rule::pattern),
            "evaluated robots.txt rules"
        );
        Ok(winner)
    }

    /// Returns true if `user_agent` may crawl `url`.
    ///
    /// `url` may be a path (`/a/b?c`) or an absolute URL; only its path is
    /// matched. Paths are compared case-sensitively, agent names are not.
    /// When no rule matches, crawling is allowed.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing` if `url` or `user_agent` is empty.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> Result<bool, ArgumentError> {
        let rule = self.matching_rule(url, user_agent)?;
        Ok(rule.is_none_or(|rule| rule.kind().is_allow()))
    }

    /// Returns true if `user_agent` may not crawl `url`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Missing` if `url` or `user_agent` is empty.
    pub fn is_disallowed(&self, url: &str, user_agent: &str) -> Result<bool, ArgumentError> {
        self.is_allowed(url, user_agent).map(|allowed| !allowed)
    }
}

impl fmt::Display for Robots {
    /// Renders the model as a robots.txt document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{group}")?;
        }
        let has_globals =
            !self.sitemaps.is_empty() || !self.clean_params.is_empty() || self.host.is_some();
        if has_globals && !self.groups.is_empty() {
            writeln!(f)?;
        }
        for sitemap in &self.sitemaps {
            writeln!(f, "{}: {sitemap}", Directive::Sitemap)?;
        }
        for param in &self.clean_params {
            writeln!(f, "{}: {param}", Directive::CleanParam)?;
        }
        if let Some(host) = &self.host {
            writeln!(f, "{}: {host}", Directive::Host)?;
        }
        Ok(())
    }
}

impl FromStr for Robots {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
