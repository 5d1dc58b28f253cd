//! Durations are whole minutes on the wire and `H:MM` on screen.

use thiserror::Error;

/// A duration string the user typed could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {input:?}: enter minutes (90) or hours:minutes (1:30)")]
    Invalid { input: String },

    #[error("duration {input:?} is too large")]
    TooLarge { input: String },
}

/// Renders minutes as `H:MM`.
///
/// Hours are unpadded and uncapped; minutes are always two digits. Negative
/// values use floor division so that [`parse_duration`] reads them back.
pub fn format_duration(minutes: i64) -> String {
    format!("{}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Parses `90`-style minutes or `1:30`-style hours and minutes.
///
/// Negative parts and large hour counts such as
/// `99:00` are accepted as typed.
pub fn parse_duration(input: &str) -> Result<i64, DurationError> {
    let input = input.trim();
    let (hours, minutes) = match input.split_once(':') {
        Some((hours, minutes)) => (parse_part(hours, input)?, parse_part(minutes, input)?),
        None => (0, parse_part(input, input)?),
    };

    hours
        .checked_mul(60)
        .and_then(|hours| hours.checked_add(minutes))
        .ok_or_else(|| DurationError::TooLarge {
            input: input.to_string(),
        })
}

fn parse_part(part: &str, input: &str) -> Result<i64, DurationError> {
    part.trim().parse().map_err(|_| DurationError::Invalid {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_minutes_only() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(90), "1:30");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(25 * 60 + 1), "25:01");
    }

    #[test]
    fn parse_bare_minutes() {
        assert_eq!(parse_duration("90"), Ok(90));
        assert_eq!(parse_duration(" 45 "), Ok(45));
    }

    #[test]
    fn parse_hours_and_minutes() {
        assert_eq!(parse_duration("1:30"), Ok(90));
        assert_eq!(parse_duration("0:05"), Ok(5));
        assert_eq!(parse_duration("2:0"), Ok(120));
    }

    #[test]
    fn parse_is_permissive_about_range() {
        assert_eq!(parse_duration("99:00"), Ok(99 * 60));
        assert_eq!(parse_duration("0:90"), Ok(90));
        assert_eq!(parse_duration("-1:30"), Ok(-30));
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "abc", "1:", ":30", "1:30:00", "1.5"] {
            assert!(
                matches!(parse_duration(input), Err(DurationError::Invalid { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        let input = format!("{}:00", i64::MAX);
        assert!(matches!(
            parse_duration(&input),
            Err(DurationError::TooLarge { .. })
        ));
    }

    #[test]
    fn format_then_parse_returns_original_minutes() {
        for minutes in [0, 1, 59, 60, 61, 90, 599, 1440, 10_000, -5] {
            assert_eq!(parse_duration(&format_duration(minutes)), Ok(minutes));
        }
    }
}
