//! Countdown formatting and duration parsing.

use std::num::NonZeroU32;

use chrono::Duration;

/// Format a number of seconds as MM:SS.
///
/// Minutes are not wrapped into hours, so 90 minutes reads `90:00`.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{seconds} second{}", plural(seconds));
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

const fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return if minutes > 0 {
            Duration::try_minutes(minutes)
        } else {
            None
        };
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }
        if c.is_whitespace() {
            continue;
        }
        if current_num.is_empty() {
            return None;
        }

        let num: i64 = current_num.parse().ok()?;
        current_num.clear();

        let seconds = match c {
            'h' => num.checked_mul(3600)?,
            'm' => num.checked_mul(60)?,
            's' => num,
            _ => return None,
        };
        total_seconds = total_seconds.checked_add(seconds)?;
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Duration::try_seconds(total_seconds)
    } else {
        None
    }
}

/// Parse a duration flag into whole minutes.
///
/// Rounds seconds down and rejects anything shorter than one minute.
#[must_use]
pub fn parse_minutes(s: &str) -> Option<NonZeroU32> {
    let minutes = parse_duration(s)?.num_minutes();
    NonZeroU32::new(u32::try_from(minutes).ok()?)
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(5400), "90:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(25)), "25 minutes");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::hours(2)), "2 hours");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::seconds(45)), "45 seconds");
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("25m"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration(" 25M "), Some(Duration::minutes(25)));
    }

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration("1h"), Some(Duration::hours(1)));
        assert_eq!(parse_duration("2h30m"), Some(Duration::minutes(150)));
        assert_eq!(parse_duration("1h15"), Some(Duration::minutes(75)));
        assert_eq!(parse_duration("1h 30m"), Some(Duration::minutes(90)));
    }

    #[test]
    fn test_parse_duration_seconds() {
        assert_eq!(parse_duration("90s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::seconds(90)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("-5").is_none());
        assert!(parse_duration("5x").is_none());
        assert!(parse_duration("m").is_none());
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        assert!(parse_duration("9223372036854775807").is_none());
        assert!(parse_duration("99999999999999h").is_none());
        assert!(parse_duration("9223372036854775807s").is_none());
        assert!(parse_duration("5000000000000000000s5000000000000000000s").is_none());
        assert!(parse_minutes("99999999999999h").is_none());
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("50").map(NonZeroU32::get), Some(50));
        assert_eq!(parse_minutes("1h30m").map(NonZeroU32::get), Some(90));
        assert_eq!(parse_minutes("90s").map(NonZeroU32::get), Some(1));
        assert!(parse_minutes("30s").is_none());
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));

        assert_eq!(render_progress_bar(1.5, 4), "[████]");
        assert_eq!(render_progress_bar(-1.0, 4), "[░░░░]");
    }
}
