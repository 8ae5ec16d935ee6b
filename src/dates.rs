//! Date Validator: syntactic checks on raw date tokens from request paths.
//!
//! Day-scan endpoints take a single `MMDDYYYY` token; range endpoints take
//! two `YYYY-MM-DD` tokens that pass through unchanged for literal use.
//! Validation is purely syntactic: month 13 or February 31 clear this layer
//! and are caught downstream (resolver lookup, or a shard name no ingested
//! table matches). Calendar-validity checking is an open product question,
//! pinned by `impossible_calendar_dates_pass_syntax_check` below.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::GatewayError;

/// Integer components of a validated `MMDDYYYY` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayParts {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

const DAY_TOKEN_FORMAT: &str = "MMDDYYYY (8 digits)";
const RANGE_TOKEN_FORMAT: &str = "YYYY-MM-DD";

// [0-9] rather than \d: the token must be ASCII digits, and \d in the
// regex crate also matches Unicode digit characters.
fn day_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{8}$").expect("day token pattern"))
}

fn range_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("range token pattern"))
}

/// Validate an `MMDDYYYY` token and decompose it into integer parts.
pub fn parse_day_token(raw: &str) -> Result<DayParts, GatewayError> {
    if !day_token_re().is_match(raw) {
        return Err(GatewayError::validation(raw, DAY_TOKEN_FORMAT));
    }

    // The pattern guarantees 8 ASCII digits, so these slices and parses
    // cannot fail; the map_err keeps the function total anyway.
    let month: u32 = raw[0..2]
        .parse()
        .map_err(|_| GatewayError::validation(raw, DAY_TOKEN_FORMAT))?;
    let day: u32 = raw[2..4]
        .parse()
        .map_err(|_| GatewayError::validation(raw, DAY_TOKEN_FORMAT))?;
    let year: i32 = raw[4..8]
        .parse()
        .map_err(|_| GatewayError::validation(raw, DAY_TOKEN_FORMAT))?;

    Ok(DayParts { month, day, year })
}

/// Confirm a range-endpoint token is exactly `YYYY-MM-DD`.
///
/// The token is used verbatim afterwards, either inside a shard name or as
/// a bound parameter, so nothing is decomposed here.
pub fn validate_range_token(raw: &str) -> Result<(), GatewayError> {
    if !range_token_re().is_match(raw) {
        return Err(GatewayError::validation(raw, RANGE_TOKEN_FORMAT));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_day_token() {
        let parts = parse_day_token("06082025").unwrap();
        assert_eq!(
            parts,
            DayParts {
                month: 6,
                day: 8,
                year: 2025
            }
        );
    }

    #[test]
    fn rejects_day_tokens_with_wrong_shape() {
        // Last entry is Arabic-Indic digits: eight "digits", none of them ASCII.
        for bad in ["6082025", "060820251", "06-08-25", "june0825", "", "0608202a", "٠٦٠٨٢٠٢٥"] {
            let err = parse_day_token(bad).unwrap_err();
            assert!(err.to_string().contains(bad), "message should name {bad:?}");
        }
    }

    #[test]
    fn impossible_calendar_dates_pass_syntax_check() {
        // Month 13 and February 31 are syntactically fine; the resolver and
        // the storage lookup are where they fail today.
        assert!(parse_day_token("13012025").is_ok());
        assert!(parse_day_token("02312025").is_ok());
    }

    #[test]
    fn accepts_well_formed_range_token() {
        assert!(validate_range_token("2025-06-30").is_ok());
    }

    #[test]
    fn rejects_malformed_range_tokens() {
        for bad in ["2025/06/30", "2025-6-30", "20250630", "2025-06-301", "06-30-2025x"] {
            assert!(validate_range_token(bad).is_err(), "{bad:?} should fail");
        }
    }
}
