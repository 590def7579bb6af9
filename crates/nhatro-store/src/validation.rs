// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub const DATETIME_LAYOUT: &str = "YYYY-MM-DD HH:MM:SS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    InvalidDate,
    InvalidDateTime,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate => f.write_str("invalid date value"),
            Self::InvalidDateTime => f.write_str("invalid datetime value"),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

pub fn parse_date(raw: &str) -> ParseResult<Date> {
    Date::parse(
        raw.trim(),
        &format_description!("[year]-[month]-[day]"),
    )
    .map_err(|_| ParseError::InvalidDate)
}

pub fn format_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .expect("date format is valid")
}

pub fn parse_datetime(raw: &str) -> ParseResult<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        raw.trim(),
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map_err(|_| ParseError::InvalidDateTime)
}

pub fn format_datetime(value: PrimitiveDateTime) -> String {
    value
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .expect("datetime format is valid")
}

#[cfg(test)]
mod tests {
    use super::{ParseError, format_date, format_datetime, parse_date, parse_datetime};

    #[test]
    fn date_round_trip() {
        let parsed = parse_date("2024-11-15").expect("parse seeded contract date");
        assert_eq!(format_date(parsed), "2024-11-15");
    }

    #[test]
    fn datetime_round_trip() {
        let parsed = parse_datetime("2024-01-15 14:30:00").expect("parse seeded timestamp");
        assert_eq!(format_datetime(parsed), "2024-01-15 14:30:00");
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert!(parse_date(" 2024-11-15 ").is_ok());
        assert!(parse_datetime(" 2024-01-15 14:30:00 ").is_ok());
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(parse_date("15/11/2024"), Err(ParseError::InvalidDate));
        assert_eq!(
            parse_datetime("2024-01-15T14:30:00"),
            Err(ParseError::InvalidDateTime)
        );
    }
}
