//! Assembly of user-agent groups from the directive stream.
//!
//! Consecutive `User-agent` lines form one alias set. Every group directive
//! that follows is applied to each agent of the set. The first `User-agent`
//! line after a group directive has been applied starts a new set. Group
//! directives that appear before any `User-agent` line go to the `*` agent.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::mem;

use tracing::{debug, trace};

use crate::constants::WILDCARD_AGENT;
use crate::directive::{Directive, Scope};
use crate::group::{Group, agent_key};
use crate::line::DirectiveLine;
use crate::report::Report;
use crate::robots::Robots;
use crate::rule::{Rule, RuleKind};
use crate::value;

/// Alias-set state. Agents are indices into the group list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AgentState {
    /// Reading a run of `User-agent` lines
    Collecting(Vec<usize>),
    /// A group directive has been applied to the current set
    Applying(Vec<usize>),
}

impl AgentState {
    fn agents(&self) -> &[usize] {
        match self {
            Self::Collecting(agents) | Self::Applying(agents) => agents,
        }
    }

    /// Transition on a `User-agent` line.
    fn with_agent(self, index: usize) -> Self {
        match self {
            Self::Collecting(mut agents) => {
                if !agents.contains(&index) {
                    agents.push(index);
                }
                Self::Collecting(agents)
            }
            Self::Applying(_) => Self::Collecting(vec![index]),
        }
    }

    /// Transition after a group directive was applied.
    fn applied(self) -> Self {
        match self {
            Self::Collecting(agents) | Self::Applying(agents) => Self::Applying(agents),
        }
    }
}

/// Applies one group directive value to the groups named by `agents`.
#[derive(Clone, Copy)]
enum Handler {
    /// Accepts every value
    Always(fn(&mut [Group], &[usize], &str)),
    /// Validates the value first and reports it when rejected
    Checked(fn(&mut [Group], &[usize], &str) -> Result<(), Report>),
}

impl Handler {
    fn run(self, groups: &mut [Group], agents: &[usize], value: &str) -> Result<(), Report> {
        match self {
            Self::Always(apply) => {
                apply(groups, agents, value);
                Ok(())
            }
            Self::Checked(apply) => apply(groups, agents, value),
        }
    }
}

/// Returns the handler for a group-scoped directive.
fn handler(directive: Directive) -> Option<Handler> {
    let handler = match directive {
        Directive::Allow => Handler::Always(allow),
        Directive::Disallow => Handler::Always(disallow),
        Directive::NoIndex => Handler::Always(noindex),
        Directive::Comment => Handler::Always(comment),
        Directive::RobotVersion => Handler::Checked(robot_version),
        Directive::RequestRate => Handler::Checked(request_rate),
        Directive::VisitTime => Handler::Checked(visit_time),
        Directive::CacheDelay => Handler::Checked(cache_delay),
        Directive::CrawlDelay => Handler::Checked(crawl_delay),
        Directive::UserAgent | Directive::Sitemap | Directive::CleanParam | Directive::Host => {
            return None;
        }
    };
    Some(handler)
}

fn for_each_agent(groups: &mut [Group], agents: &[usize], mut apply: impl FnMut(&mut Group)) {
    for &index in agents {
        if let Some(group) = groups.get_mut(index) {
            apply(group);
        }
    }
}

fn add_rule(groups: &mut [Group], agents: &[usize], kind: RuleKind, value: &str) {
    let rule = Rule::compile(kind, value);
    for_each_agent(groups, agents, |group| group.push_rule(rule.clone()));
}

fn allow(groups: &mut [Group], agents: &[usize], value: &str) {
    add_rule(groups, agents, RuleKind::Allow, value);
}

fn disallow(groups: &mut [Group], agents: &[usize], value: &str) {
    add_rule(groups, agents, RuleKind::Disallow, value);
}

fn noindex(groups: &mut [Group], agents: &[usize], value: &str) {
    add_rule(groups, agents, RuleKind::NoIndex, value);
}

fn comment(groups: &mut [Group], agents: &[usize], value: &str) {
    for_each_agent(groups, agents, |group| group.push_comment(value));
}

fn robot_version(groups: &mut [Group], agents: &[usize], value: &str) -> Result<(), Report> {
    value::check_robot_version(value)?;
    for_each_agent(groups, agents, |group| group.set_robot_version(value));
    Ok(())
}

fn request_rate(groups: &mut [Group], agents: &[usize], value: &str) -> Result<(), Report> {
    value::check_request_rate(value)?;
    for_each_agent(groups, agents, |group| group.push_request_rate(value));
    Ok(())
}

fn visit_time(groups: &mut [Group], agents: &[usize], value: &str) -> Result<(), Report> {
    value::check_visit_time(value)?;
    for_each_agent(groups, agents, |group| group.set_visit_time(value));
    Ok(())
}

fn cache_delay(groups: &mut [Group], agents: &[usize], value: &str) -> Result<(), Report> {
    let delay = value::parse_delay(Directive::CacheDelay, value)?;
    for_each_agent(groups, agents, |group| group.set_cache_delay(delay));
    Ok(())
}

fn crawl_delay(groups: &mut [Group], agents: &[usize], value: &str) -> Result<(), Report> {
    let delay = value::parse_delay(Directive::CrawlDelay, value)?;
    for_each_agent(groups, agents, |group| group.set_crawl_delay(delay));
    Ok(())
}

/// Accumulates a [`Robots`] model one directive line at a time.
#[derive(Debug)]
pub(crate) struct GroupBuilder {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
    sitemaps: Vec<String>,
    clean_params: Vec<String>,
    host: Option<String>,
    reports: Vec<Report>,
    state: AgentState,
}

impl GroupBuilder {
    pub(crate) fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            sitemaps: Vec::new(),
            clean_params: Vec::new(),
            host: None,
            reports: Vec::new(),
            state: AgentState::Collecting(Vec::new()),
        }
    }

    /// Records a diagnostic.
    pub(crate) fn report(&mut self, report: Report) {
        debug!(%report, "robots.txt directive skipped");
        self.reports.push(report);
    }

    /// Applies one directive line.
    pub(crate) fn feed(&mut self, line: &DirectiveLine<'_>) {
        let Some(directive) = Directive::from_lowercase(&line.name) else {
            trace!(name = %line.name, "ignoring unknown robots.txt directive");
            return;
        };

        match directive.scope() {
            Scope::Agent => self.add_agent(line.value),
            Scope::Global => self.apply_global(directive, line.value),
            Scope::Group => self.apply_group(directive, line.value),
        }
    }

    pub(crate) fn finish(self) -> Robots {
        debug!(
            groups = self.groups.len(),
            sitemaps = self.sitemaps.len(),
            reports = self.reports.len(),
            "parsed robots.txt"
        );
        Robots::from_parts(
            self.groups,
            self.index,
            self.sitemaps,
            self.clean_params,
            self.host,
            self.reports,
        )
    }

    fn ensure_group(&mut self, name: &str) -> usize {
        match self.index.entry(agent_key(name)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.groups.push(Group::new(name));
                *entry.insert(self.groups.len() - 1)
            }
        }
    }

    fn add_agent(&mut self, name: &str) {
        let index = self.ensure_group(name);
        let state = mem::replace(&mut self.state, AgentState::Collecting(Vec::new()));
        self.state = state.with_agent(index);
    }

    fn apply_global(&mut self, directive: Directive, value: &str) {
        match directive {
            Directive::Sitemap => self.sitemaps.push(value.to_string()),
            Directive::CleanParam => self.clean_params.push(value.to_string()),
            Directive::Host => self.host = Some(value.to_string()),
            _ => trace!(%directive, "directive is not document-scoped"),
        }
    }

    fn apply_group(&mut self, directive: Directive, value: &str) {
        let Some(handler) = handler(directive) else {
            return;
        };

        if self.state.agents().is_empty() {
            let index = self.ensure_group(WILDCARD_AGENT);
            self.state = AgentState::Collecting(vec![index]);
        }

        match handler.run(&mut self.groups, self.state.agents(), value) {
            Ok(()) => {
                let state = mem::replace(&mut self.state, AgentState::Collecting(Vec::new()));
                self.state = state.applied();
            }
            Err(report) => self.report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::directive_lines;

    fn build(content: &str) -> Robots {
        let mut builder = GroupBuilder::new();
        for line in directive_lines(content) {
            builder.feed(&line);
        }
        builder.finish()
    }

    fn patterns(robots: &Robots, agent: &str) -> Vec<String> {
        robots
            .group(agent)
            .map(|group| group.rules().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn state_collects_consecutive_agents() {
        let state = AgentState::Collecting(Vec::new()).with_agent(0).with_agent(1);
        assert_eq!(state, AgentState::Collecting(vec![0, 1]));
    }

    #[test]
    fn state_ignores_repeated_agent() {
        let state = AgentState::Collecting(vec![0]).with_agent(0);
        assert_eq!(state, AgentState::Collecting(vec![0]));
    }

    #[test]
    fn state_restarts_after_applying() {
        let state = AgentState::Collecting(vec![0, 1]).applied().with_agent(2);
        assert_eq!(state, AgentState::Collecting(vec![2]));
    }

    #[test]
    fn state_stays_applying() {
        let state = AgentState::Applying(vec![3]).applied();
        assert_eq!(state, AgentState::Applying(vec![3]));
    }

    #[test]
    fn only_validated_handlers_can_reject() {
        let mut groups = vec![Group::new("*")];
        for directive in Directive::ALL {
            if let Some(apply) = handler(directive) {
                let accepted = apply.run(&mut groups, &[0], "not-a-number").is_ok();
                assert_eq!(accepted, matches!(apply, Handler::Always(_)), "{directive}");
            }
        }
    }

    #[test]
    fn agent_index_folds_case() {
        let mut builder = GroupBuilder::new();
        let first = builder.ensure_group("MyBot");
        let again = builder.ensure_group("mybot");
        let other = builder.ensure_group("OtherBot");
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(builder.groups.len(), 2);
        assert_eq!(builder.groups[first].name(), "MyBot");
    }

    #[test]
    fn handler_table_covers_group_directives() {
        for directive in Directive::ALL {
            let has_handler = handler(directive).is_some();
            assert_eq!(has_handler, directive.scope() == Scope::Group, "{directive}");
        }
    }

    #[test]
    fn alias_set_shares_rules() {
        let robots = build("User-agent: a\nUser-agent: b\nDisallow: /x\n");
        assert_eq!(patterns(&robots, "a"), vec!["Disallow: /x"]);
        assert_eq!(patterns(&robots, "b"), vec!["Disallow: /x"]);
    }

    #[test]
    fn agent_after_body_starts_new_set() {
        let robots = build("User-agent: a\nDisallow: /x\nUser-agent: b\nDisallow: /y\n");
        assert_eq!(patterns(&robots, "a"), vec!["Disallow: /x"]);
        assert_eq!(patterns(&robots, "b"), vec!["Disallow: /y"]);
    }

    #[test]
    fn redeclared_agent_reuses_group() {
        let robots = build(
            "User-agent: bot\nDisallow: /a\nUser-agent: other\nAllow: /\nUser-agent: BOT\nDisallow: /b\n",
        );
        assert_eq!(robots.groups().len(), 2);
        assert_eq!(patterns(&robots, "bot"), vec!["Disallow: /a", "Disallow: /b"]);
        assert_eq!(robots.group("bot").map(Group::name), Some("bot"));
    }

    #[test]
    fn same_agent_twice_in_one_set_applies_once() {
        let robots = build("User-agent: bot\nUser-agent: Bot\nDisallow: /a\n");
        assert_eq!(patterns(&robots, "bot"), vec!["Disallow: /a"]);
    }

    #[test]
    fn leading_directives_go_to_wildcard() {
        let robots = build("Disallow: /early\nUser-agent: bot\nDisallow: /late\n");
        assert_eq!(patterns(&robots, "*"), vec!["Disallow: /early"]);
        assert_eq!(patterns(&robots, "bot"), vec!["Disallow: /late"]);
    }

    #[test]
    fn global_directives_do_not_close_alias_set() {
        let robots = build("User-agent: a\nSitemap: https://e.com/s.xml\nUser-agent: b\nDisallow: /\n");
        assert_eq!(patterns(&robots, "a"), vec!["Disallow: /"]);
        assert_eq!(patterns(&robots, "b"), vec!["Disallow: /"]);
        assert_eq!(robots.sitemaps(), ["https://e.com/s.xml"]);
    }

    #[test]
    fn leading_global_directive_does_not_create_wildcard() {
        let robots = build("Sitemap: https://e.com/s.xml\nHost: e.com\n");
        assert!(robots.group("*").is_none());
        assert!(robots.groups().is_empty());
    }

    #[test]
    fn rejected_value_does_not_close_alias_set() {
        let robots = build("User-agent: a\nCrawl-delay: never\nUser-agent: b\nCrawl-delay: 3\n");
        assert_eq!(robots.group("a").and_then(Group::crawl_delay), Some(3.0));
        assert_eq!(robots.group("b").and_then(Group::crawl_delay), Some(3.0));
        assert_eq!(robots.reports().len(), 1);
    }

    #[test]
    fn crawl_delay_first_value_wins() {
        let robots = build("User-agent: *\nCrawl-delay: 10\nCrawl-delay: 20\n");
        assert_eq!(robots.group("*").and_then(Group::crawl_delay), Some(10.0));
    }

    #[test]
    fn invalid_delays_are_reported_and_skipped() {
        let robots = build("User-agent: *\nCache-delay: x\nCache-delay: 0\nCache-delay: 4\n");
        assert_eq!(robots.group("*").and_then(Group::cache_delay), Some(4.0));
        let messages: Vec<String> = robots.reports().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                r#"Invalid Cache-delay directive value: "x"."#,
                "Cache-delay must be a positive number. The provided value is 0.",
            ]
        );
    }

    #[test]
    fn informational_fields() {
        let robots = build(
            "User-agent: *\n\
             Robot-version: 3.0\n\
             Robot-version: 2.0\n\
             Robot-version: 1.0\n\
             Visit-time: 0600-0845\n\
             Visit-time: 0900-1000\n\
             Request-rate: 1/5\n\
             Request-rate: 1/10 2500-0100\n\
             Request-rate: 1/20s 0000-0600\n\
             Comment: hello\n\
             Comment: world\n",
        );
        let group = robots.group("*").unwrap();
        assert_eq!(group.robot_version(), Some("2.0"));
        assert_eq!(group.visit_time(), Some("0600-0845"));
        assert_eq!(group.request_rates(), ["1/5", "1/20s 0000-0600"]);
        assert_eq!(group.comments(), ["hello", "world"]);
        let messages: Vec<String> = robots.reports().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                r#"Invalid Robot-Version directive value: "3.0"."#,
                r#"Invalid Request-rate directive start-end time format: "2500-0100"."#,
            ]
        );
    }

    #[test]
    fn visit_time_reports() {
        let robots = build("User-agent: *\nVisit-time: morning\nVisit-time: 0600-0960\n");
        let messages: Vec<String> = robots.reports().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                r#"Invalid Visit-time directive value: "morning"."#,
                r#"Invalid Visit-time directive start-end time format: "0600-0960"."#,
            ]
        );
        assert_eq!(robots.group("*").and_then(Group::visit_time), None);
    }

    #[test]
    fn global_fields() {
        let robots = build(
            "Sitemap: https://e.com/a.xml\n\
             Sitemap: https://e.com/a.xml\n\
             Clean-param: ref /articles/\n\
             Host: first.example\n\
             Host: second.example\n",
        );
        assert_eq!(robots.sitemaps(), ["https://e.com/a.xml", "https://e.com/a.xml"]);
        assert_eq!(robots.clean_params(), ["ref /articles/"]);
        assert_eq!(robots.host(), Some("second.example"));
    }

    #[test]
    fn unknown_directives_are_ignored_silently() {
        let robots = build("User-agent: a\nX-Robots-Tag: none\nUser-agent: b\nDisallow: /\n");
        assert!(robots.reports().is_empty());
        // The unknown line does not close the alias set.
        assert_eq!(patterns(&robots, "a"), vec!["Disallow: /"]);
        assert_eq!(patterns(&robots, "b"), vec!["Disallow: /"]);
    }

    #[test]
    fn rule_patterns_are_normalized() {
        let robots = build("User-agent: *\nDisallow: private//%7Efiles\n");
        assert_eq!(patterns(&robots, "*"), vec!["Disallow: /private/~files"]);
    }
}
