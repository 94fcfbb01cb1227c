//! Recognized robots.txt directives.

use std::fmt;
use std::str::FromStr;

/// A directive name recognized by the parser.
///
/// Names are matched case-insensitively. Any other name is ignored by the
/// parser without a report.
///
/// # Examples
///
/// ```
/// use robots_txt_parser::Directive;
///
/// assert_eq!("CRAWL-DELAY".parse(), Ok(Directive::CrawlDelay));
/// assert_eq!(Directive::CrawlDelay.to_string(), "Crawl-delay");
/// assert!("x-robots-tag".parse::<Directive>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `User-agent`
    UserAgent,
    /// `Allow`
    Allow,
    /// `Disallow`
    Disallow,
    /// `Noindex`
    NoIndex,
    /// `Comment`
    Comment,
    /// `Robot-Version`
    RobotVersion,
    /// `Request-rate`
    RequestRate,
    /// `Visit-time`
    VisitTime,
    /// `Cache-delay`
    CacheDelay,
    /// `Crawl-delay`
    CrawlDelay,
    /// `Sitemap`
    Sitemap,
    /// `Clean-param`
    CleanParam,
    /// `Host`
    Host,
}

/// Which part of the model a directive writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Names an agent; opens or extends an alias set
    Agent,
    /// Applies to every agent of the current alias set
    Group,
    /// Applies to the document as a whole
    Global,
}

impl Directive {
    /// All recognized directives.
    pub const ALL: [Self; 13] = [
        Self::UserAgent,
        Self::Allow,
        Self::Disallow,
        Self::NoIndex,
        Self::Comment,
        Self::RobotVersion,
        Self::RequestRate,
        Self::VisitTime,
        Self::CacheDelay,
        Self::CrawlDelay,
        Self::Sitemap,
        Self::CleanParam,
        Self::Host,
    ];

    /// Looks up a directive by its lowercase name.
    #[must_use]
    pub fn from_lowercase(name: &str) -> Option<Self> {
        let directive = match name {
            "user-agent" => Self::UserAgent,
            "allow" => Self::Allow,
            "disallow" => Self::Disallow,
            "noindex" => Self::NoIndex,
            "comment" => Self::Comment,
            "robot-version" => Self::RobotVersion,
            "request-rate" => Self::RequestRate,
            "visit-time" => Self::VisitTime,
            "cache-delay" => Self::CacheDelay,
            "crawl-delay" => Self::CrawlDelay,
            "sitemap" => Self::Sitemap,
            "clean-param" => Self::CleanParam,
            "host" => Self::Host,
            _ => return None,
        };
        Some(directive)
    }

    /// Returns the canonical spelling used in reports and rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserAgent => "User-agent",
            Self::Allow => "Allow",
            Self::Disallow => "Disallow",
            Self::NoIndex => "Noindex",
            Self::Comment => "Comment",
            Self::RobotVersion => "Robot-Version",
            Self::RequestRate => "Request-rate",
            Self::VisitTime => "Visit-time",
            Self::CacheDelay => "Cache-delay",
            Self::CrawlDelay => "Crawl-delay",
            Self::Sitemap => "Sitemap",
            Self::CleanParam => "Clean-param",
            Self::Host => "Host",
        }
    }

    /// Returns the scope this directive writes to.
    #[must_use]
    pub const fn scope(self) -> Scope {
        match self {
            Self::UserAgent => Scope::Agent,
            Self::Sitemap | Self::CleanParam | Self::Host => Scope::Global,
            Self::Allow
            | Self::Disallow
            | Self::NoIndex
            | Self::Comment
            | Self::RobotVersion
            | Self::RequestRate
            | Self::VisitTime
            | Self::CacheDelay
            | Self::CrawlDelay => Scope::Group,
        }
    }
}

/// Error returned when parsing an unrecognized directive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirective {
    /// The name that was not recognized
    pub name: String,
}

impl fmt::Display for UnknownDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown robots.txt directive '{}'", self.name)
    }
}

impl std::error::Error for UnknownDirective {}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Directive {
    type Err = UnknownDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lowercase(&s.trim().to_lowercase()).ok_or_else(|| UnknownDirective {
            name: s.to_string(),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Directive {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
