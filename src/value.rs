//! Value validation for group directives.

use crate::directive::Directive;
use crate::report::Report;

const MAX_HOUR: u32 = 23;
const MAX_MINUTE: u32 = 59;

/// Parses a `Crawl-delay` or `Cache-delay` value.
///
/// The value must be a finite number greater than zero.
pub(crate) fn parse_delay(directive: Directive, value: &str) -> Result<f64, Report> {
    let delay = value
        .parse::<f64>()
        .ok()
        .filter(|delay| delay.is_finite())
        .ok_or_else(|| invalid_value(directive, value))?;

    if delay <= 0.0 {
        return Err(Report::NotPositive {
            directive,
            value: value.to_string(),
        });
    }
    Ok(delay)
}

/// Checks a `Robot-Version` value: `1.0` or `2.0`.
pub(crate) fn check_robot_version(value: &str) -> Result<(), Report> {
    match value {
        "1.0" | "2.0" => Ok(()),
        _ => Err(invalid_value(Directive::RobotVersion, value)),
    }
}

/// Checks a `Request-rate` value: `<requests>/<seconds>[s|m|h]`, optionally
/// followed by whitespace and an `HHMM-HHMM` time range.
pub(crate) fn check_request_rate(value: &str) -> Result<(), Report> {
    let directive = Directive::RequestRate;
    let mut parts = value.split_whitespace();

    let rate = parts.next().unwrap_or_default();
    if !is_rate(rate) {
        return Err(invalid_value(directive, value));
    }

    match (parts.next(), parts.next()) {
        (None, _) => Ok(()),
        (Some(range), None) => check_time_range(directive, value, range),
        (Some(_), Some(_)) => Err(invalid_value(directive, value)),
    }
}

/// Checks a `Visit-time` value: a bare `HHMM-HHMM` time range.
pub(crate) fn check_visit_time(value: &str) -> Result<(), Report> {
    check_time_range(Directive::VisitTime, value, value)
}

fn is_rate(rate: &str) -> bool {
    let Some((requests, period)) = rate.split_once('/') else {
        return false;
    };
    let period = period
        .strip_suffix(['s', 'm', 'h'])
        .unwrap_or(period);
    is_digits(requests) && is_digits(period)
}

fn check_time_range(directive: Directive, value: &str, range: &str) -> Result<(), Report> {
    let Some((start, end)) = range.split_once('-') else {
        return Err(invalid_value(directive, value));
    };
    if !is_clock_shaped(start) || !is_clock_shaped(end) {
        return Err(invalid_value(directive, value));
    }
    if !is_valid_clock(start) || !is_valid_clock(end) {
        return Err(Report::InvalidTimeRange {
            directive,
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

fn is_clock_shaped(clock: &str) -> bool {
    clock.len() == 4 && is_digits(clock)
}

fn is_valid_clock(clock: &str) -> bool {
    let (hours, minutes) = clock.split_at(2);
    matches!(
        (hours.parse::<u32>(), minutes.parse::<u32>()),
        (Ok(h), Ok(m)) if h <= MAX_HOUR && m <= MAX_MINUTE
    )
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn invalid_value(directive: Directive, value: &str) -> Report {
    Report::InvalidValue {
        directive,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_accepts_positive_numbers() {
        assert_eq!(parse_delay(Directive::CrawlDelay, "10"), Ok(10.0));
        assert_eq!(parse_delay(Directive::CrawlDelay, "0.5"), Ok(0.5));
    }

    #[test]
    fn delay_rejects_non_numbers() {
        for value in ["ten", "1s", "", "NaN", "inf"] {
            let result = parse_delay(Directive::CrawlDelay, value);
            assert!(
                matches!(result, Err(Report::InvalidValue { .. })),
                "{value} should be rejected as invalid"
            );
        }
    }

    #[test]
    fn delay_rejects_non_positive() {
        assert_eq!(
            parse_delay(Directive::CacheDelay, "0"),
            Err(Report::NotPositive {
                directive: Directive::CacheDelay,
                value: "0".to_string(),
            })
        );
        assert!(matches!(
            parse_delay(Directive::CacheDelay, "-3"),
            Err(Report::NotPositive { .. })
        ));
    }

    #[test]
    fn robot_version() {
        assert!(check_robot_version("1.0").is_ok());
        assert!(check_robot_version("2.0").is_ok());
        for value in ["3.0", "1", "1.00", "2.0.0", "v2.0"] {
            assert!(check_robot_version(value).is_err(), "{value}");
        }
    }

    #[test]
    fn request_rate_without_range() {
        assert!(check_request_rate("1/5").is_ok());
        assert!(check_request_rate("10/1m").is_ok());
        assert!(check_request_rate("3/2h").is_ok());
    }

    #[test]
    fn request_rate_with_range() {
        assert!(check_request_rate("1/10s 0800-1700").is_ok());
        assert!(check_request_rate("1/10s   0000-2359").is_ok());
    }

    #[test]
    fn request_rate_grammar_errors() {
        for value in ["fast", "1/", "/5", "1/5x", "1/5 08:00-17:00", "1/5 0800-1700 extra"] {
            assert!(
                matches!(check_request_rate(value), Err(Report::InvalidValue { .. })),
                "{value}"
            );
        }
    }

    #[test]
    fn request_rate_out_of_range_time() {
        assert_eq!(
            check_request_rate("1/5 2400-0100"),
            Err(Report::InvalidTimeRange {
                directive: Directive::RequestRate,
                start: "2400".to_string(),
                end: "0100".to_string(),
            })
        );
    }

    #[test]
    fn visit_time() {
        assert!(check_visit_time("0600-0845").is_ok());
        assert!(matches!(
            check_visit_time("0600-0860"),
            Err(Report::InvalidTimeRange { .. })
        ));
        assert!(matches!(
            check_visit_time("6am-9am"),
            Err(Report::InvalidValue { .. })
        ));
        assert!(matches!(
            check_visit_time("0600"),
            Err(Report::InvalidValue { .. })
        ));
    }
}
