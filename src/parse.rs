use chrono::NaiveDate;
use nom::character::complete::{char as char_parser, i32 as i32_parser, u32 as u32_parser};
use nom::combinator::opt;
use nom::error::{make_error, ErrorKind};
use nom::sequence::preceded;
use nom::IResult;

use crate::aggregate::ChartFilter;
use crate::errors::KharchaError;

fn month_parser(input: &str) -> IResult<&str, u32> {
    let (input, month) = u32_parser(input)?;
    if !(1..=12).contains(&month) {
        return Err(nom::Err::Error(make_error(input, ErrorKind::Verify)));
    }
    Ok((input, month))
}

fn filter_parser(input: &str) -> IResult<&str, ChartFilter> {
    let (input, year) = i32_parser(input)?;
    let (input, _) = char_parser('-')(input)?;
    let (input, month) = month_parser(input)?;
    let (input, day) = opt(preceded(char_parser('-'), u32_parser))(input)?;
    match day {
        Some(day) => {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| nom::Err::Error(make_error(input, ErrorKind::Verify)))?;
            Ok((input, ChartFilter::Day(date)))
        }
        None => Ok((input, ChartFilter::Month { year, month })),
    }
}

/// Parses a chart filter expression: `YYYY-MM-DD` selects a single day,
/// `YYYY-MM` a whole month.
pub fn parse_filter(s: &str) -> Result<ChartFilter, KharchaError> {
    match filter_parser(s.trim()) {
        Ok(("", filter)) => Ok(filter),
        Ok((_, _)) => Err(KharchaError::Parse("Too many characters".to_string())),
        Err(e) => Err(KharchaError::Parse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_date_parses_as_day_filter() {
        let filter = parse_filter("2024-05-01").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(filter, ChartFilter::Day(expected));
    }

    #[test]
    fn test_year_month_parses_as_month_filter() {
        let filter = parse_filter("2024-05").unwrap();
        assert_eq!(
            filter,
            ChartFilter::Month {
                year: 2024,
                month: 5
            }
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let filter = parse_filter("  2024-12  ").unwrap();
        assert_eq!(
            filter,
            ChartFilter::Month {
                year: 2024,
                month: 12
            }
        );
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        assert!(parse_filter("2024-13").is_err());
        assert!(parse_filter("2024-00").is_err());
    }

    #[test]
    fn test_invalid_calendar_day_is_rejected() {
        assert!(parse_filter("2024-02-30").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_filter("not a date").is_err());
        assert!(parse_filter("2024").is_err());
        assert!(parse_filter("2024-05-01-07").is_err());
        assert!(parse_filter("").is_err());
    }
}
