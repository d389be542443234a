// Copyright 2026 Parliamentary Data Platform Contributors
// This file is part of parl-archive.

// parl-archive is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// parl-archive is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with parl-archive.  If not, see <http://www.gnu.org/licenses/>.

//! Date/amount parsing helpers shared by every decoder. All functions
//! are total: malformed input yields `None` (or `Decimal::ZERO` for
//! amounts) rather than an error, matching the decoders' stateless,
//! total contract.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const DATE_FORMATS: &[&str] = &["%A, %B %d, %Y", "%B %d, %Y", "%Y-%m-%d"];

/// Parses a plain date in any of the accepted upstream formats.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
	let value = value.trim();
	if value.is_empty() {
		return None;
	}
	DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

const DATETIME_FORMATS: &[&str] =
	&["%B %d, %Y, %I:%M %p", "%B %d, %Y %I:%M %p", "%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S"];

/// Parses a timestamp, accepting the upstream's "a.m."/"(EDT)"-style
/// noise and coercing naive results to UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
	let cleaned = value
		.replace("a.m.", "AM")
		.replace("p.m.", "PM")
		.replace(" at ", " ")
		.replace("(EDT)", "")
		.replace("(EST)", "")
		.replace("(PDT)", "")
		.replace("(PST)", "")
		.trim()
		.to_string();

	for fmt in DATETIME_FORMATS {
		if fmt.ends_with("%z") {
			if let Ok(dt) = DateTime::parse_from_str(&cleaned, fmt) {
				return Some(dt.with_timezone(&Utc));
			}
			continue;
		}
		if let Ok(naive) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
			return Some(Utc.from_utc_datetime(&naive));
		}
	}
	None
}

/// Earliest date among the given (possibly absent) timestamp strings;
/// used by the bills pipeline to pick `introduced_date` from multiple
/// chambers' first-reading timestamps.
pub fn pick_first_date<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Option<NaiveDate> {
	values.into_iter().flatten().filter_map(parse_datetime).map(|dt| dt.date_naive()).min()
}

static DATE_RANGE_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"From\s+([A-Za-z]+\s+\d{1,2},\s+\d{4})\s+to\s+([A-Za-z]+\s+\d{1,2},\s+\d{4})").unwrap());

/// Extracts `(period_start, period_end)` from free text like
/// `"From January 1, 2024 to March 31, 2024"`.
pub fn parse_date_range(text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
	match DATE_RANGE_RE.captures(text) {
		Some(caps) => (parse_date(&caps[1]), parse_date(&caps[2])),
		None => (None, None),
	}
}

/// Parses a currency amount, stripping `$` and thousands separators;
/// blank or `"-"` cells are zero, matching the upstream disclosure CSVs'
/// convention for nil spending.
pub fn parse_amount(value: &str) -> Decimal {
	let cleaned = value.replace(',', "").replace('$', "");
	let cleaned = cleaned.trim();
	if cleaned.is_empty() || cleaned.chars().all(|c| c == '-') {
		return Decimal::ZERO;
	}
	cleaned.parse().unwrap_or(Decimal::ZERO)
}

static BILL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Bill\s+([A-Z]-\d+)").unwrap());

pub fn extract_bill_number(text: &str) -> Option<String> {
	BILL_NUMBER_RE.captures(text).map(|c| c[1].to_string())
}

static TOTAL_PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Page:\s*\d+\s*of\s*(\d+)").unwrap());

pub fn extract_total_pages(html: &str) -> Option<u32> {
	TOTAL_PAGES_RE.captures(html).and_then(|c| c[1].parse().ok())
}

static SITTING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Sitting\s+No\.\s*(\d+)").unwrap());

pub fn extract_sitting(text: &str) -> Option<i32> {
	SITTING_RE.captures(text).and_then(|c| c[1].parse().ok())
}

/// April 1 – March 31 fiscal year label, e.g. `"2023-2024"`.
pub fn fiscal_year(start_date: NaiveDate) -> String {
	use chrono::Datelike;
	if start_date.month() >= 4 {
		format!("{}-{}", start_date.year(), start_date.year() + 1)
	} else {
		format!("{}-{}", start_date.year() - 1, start_date.year())
	}
}

/// Parses `digits only` out of a free-text field (e.g. signature counts
/// rendered with thousands separators).
pub fn parse_digits(value: &str) -> Option<i32> {
	let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
	if digits.is_empty() {
		None
	} else {
		digits.parse().ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_all_date_formats() {
		assert_eq!(parse_date("Monday, January 5, 2024"), NaiveDate::from_ymd_opt(2024, 1, 5));
		assert_eq!(parse_date("January 5, 2024"), NaiveDate::from_ymd_opt(2024, 1, 5));
		assert_eq!(parse_date("2024-01-05"), NaiveDate::from_ymd_opt(2024, 1, 5));
		assert_eq!(parse_date(""), None);
	}

	#[test]
	fn parses_datetime_with_meridiem_and_timezone_noise() {
		let dt = parse_datetime("January 5, 2024, 2:30 p.m. (EST)").unwrap();
		assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
		assert_eq!(dt.time().hour(), 14);
	}

	#[test]
	fn amount_parsing_strips_currency_formatting() {
		assert_eq!(parse_amount("$1,234.56"), "1234.56".parse().unwrap());
		assert_eq!(parse_amount("-"), Decimal::ZERO);
		assert_eq!(parse_amount(""), Decimal::ZERO);
	}

	#[test]
	fn fiscal_year_rolls_over_in_april() {
		assert_eq!(fiscal_year(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()), "2024-2025");
		assert_eq!(fiscal_year(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()), "2023-2024");
	}

	#[test]
	fn extracts_bill_number_from_subject_text() {
		assert_eq!(extract_bill_number("Second reading of Bill C-10"), Some("C-10".to_string()));
		assert_eq!(extract_bill_number("no bill mentioned"), None);
	}

	use chrono::Timelike;
}
