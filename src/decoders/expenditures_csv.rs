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

//! Member and house-officer expenditure CSV decoders.
//!
//! Both disclosure formats carry non-tabular preamble rows before the
//! real header, so decoding reads records positionally (`csv::Reader`
//! without headers) rather than relying on `serde`'s header inference.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use scraper::{Html, Selector};

use crate::decoders::dates::{fiscal_year, parse_amount, parse_date_range};
use crate::error::{ArchiveError, Result};
use crate::types::{ExpenditureCategory, ExpenditureRecord};

/// Finds the member-expenditure CSV link and the disclosure period text
/// on `https://www.ourcommons.ca/ProactiveDisclosure/en/members`.
pub fn find_member_csv_link(html: &str) -> Option<(String, String)> {
	let document = Html::parse_document(html);
	let link_sel = Selector::parse("a.csv-btn").unwrap();
	let period_sel = Selector::parse("#quarters-dropdown-text").unwrap();

	let href = document.select(&link_sel).next()?.value().attr("href")?.to_string();
	let period_text = document
		.select(&period_sel)
		.next()
		.map(|el| el.text().collect::<String>().trim().to_string())
		.unwrap_or_default();
	Some((href, period_text))
}

/// Finds every `HouseOfficers*.csv` link on
/// `https://www.ourcommons.ca/Boie/en/reports-and-disclosure`.
pub fn find_house_officer_csv_links(html: &str) -> Vec<String> {
	let document = Html::parse_document(html);
	let link_sel = Selector::parse("a").unwrap();
	document
		.select(&link_sel)
		.filter_map(|el| el.value().attr("href"))
		.filter(|href| href.ends_with(".csv") && href.contains("HouseOfficers"))
		.map(str::to_string)
		.collect()
}

const MEMBER_CATEGORIES: &[(&str, ExpenditureCategory)] = &[
	("Salaries", ExpenditureCategory::Salaries),
	("Travel", ExpenditureCategory::Travel),
	("Hospitality", ExpenditureCategory::Hospitality),
	("Contracts", ExpenditureCategory::Contracts),
];

/// Decodes the member expenditure CSV, which has a real header row
/// (`Name,Salaries,Travel,Hospitality,Contracts,...`) once the UTF-8 BOM
/// is stripped. `period` is parsed separately from the disclosure page's
/// `"From <date> to <date>"` text and supplied by the caller.
pub fn decode_member(csv_text: &str, period: (NaiveDate, NaiveDate)) -> Result<Vec<ExpenditureRecord>> {
	let cleaned = csv_text.trim_start_matches('\u{feff}');
	let mut reader = ReaderBuilder::new().has_headers(true).from_reader(cleaned.as_bytes());
	let headers = reader.headers().map_err(|e| ArchiveError::decode_failed("member expenditure csv", e))?.clone();
	let fy = fiscal_year(period.0);

	let mut records = Vec::new();
	for result in reader.records() {
		let row = result.map_err(|e| ArchiveError::decode_failed("member expenditure csv", e))?;
		let name = headers.iter().position(|h| h.trim_start_matches('\u{feff}') == "Name").and_then(|i| row.get(i));
		let Some(name) = name.map(str::trim).filter(|s| !s.is_empty()) else { continue };

		for (column, category) in MEMBER_CATEGORIES {
			let amount = headers
				.iter()
				.position(|h| h == *column)
				.and_then(|i| row.get(i))
				.map(parse_amount)
				.unwrap_or_default();
			records.push(ExpenditureRecord {
				member_or_officer: name.to_string(),
				category: *category,
				amount,
				period_start: period.0,
				period_end: period.1,
				fiscal_year: fy.clone(),
			});
		}
	}
	Ok(records)
}

const OFFICER_CATEGORIES: &[(&str, ExpenditureCategory)] = &[
	("Employees' Salaries($)", ExpenditureCategory::Salaries),
	("Service Contracts($)", ExpenditureCategory::Contracts),
	("Travel($)", ExpenditureCategory::Travel),
	("Hospitality($)", ExpenditureCategory::Hospitality),
	("Office($)", ExpenditureCategory::Other),
];

/// Decodes a house-officer expenditure CSV: row 2 (index 1) holds the
/// period range text, row 3 (index 2) is the header, data starts at row
/// 4 (index 3).
pub fn decode_house_officer(csv_text: &str) -> Result<Vec<ExpenditureRecord>> {
	let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(csv_text.as_bytes());
	let rows: Vec<csv::StringRecord> =
		reader.records().collect::<std::result::Result<_, _>>().map_err(|e| ArchiveError::decode_failed("house officer csv", e))?;

	if rows.len() < 3 {
		return Ok(Vec::new());
	}

	let period_line = rows[1].get(0).unwrap_or_default();
	let (Some(period_start), Some(period_end)) = parse_date_range(period_line) else {
		return Ok(Vec::new());
	};
	let fy = fiscal_year(period_start);

	let headers: Vec<String> = rows[2].iter().map(|h| h.trim().to_string()).collect();

	let mut records = Vec::new();
	for row in &rows[3..] {
		let name_cell = row.get(0).unwrap_or_default().trim();
		if name_cell.is_empty() {
			continue;
		}
		let officer_name = headers.iter().position(|h| h == "Name").and_then(|i| row.get(i)).unwrap_or(name_cell);

		for (column, category) in OFFICER_CATEGORIES {
			let amount =
				headers.iter().position(|h| h == *column).and_then(|i| row.get(i)).map(parse_amount).unwrap_or_default();
			records.push(ExpenditureRecord {
				member_or_officer: officer_name.to_string(),
				category: *category,
				amount,
				period_start,
				period_end,
				fiscal_year: fy.clone(),
			});
		}
	}
	Ok(records)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_member_expenditures_into_four_category_rows() {
		let csv = "Name,Salaries,Travel,Hospitality,Contracts\n\"Doe, Jane\",\"$1,200.00\",$50.00,-,$0.00\n";
		let period = (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
		let records = decode_member(csv, period).unwrap();
		assert_eq!(records.len(), 4);
		assert_eq!(records[0].amount, "1200.00".parse().unwrap());
		assert_eq!(records[2].amount, rust_decimal::Decimal::ZERO);
	}

	#[test]
	fn decodes_house_officer_csv_with_preamble_rows() {
		let csv = "House Officer Expenditures\nFrom January 1, 2024 to March 31, 2024\nName,Role,Employees' Salaries($),Service Contracts($),Travel($),Hospitality($),Office($)\nJohn Smith,Speaker,\"$10,000.00\",$500.00,$200.00,$0.00,$100.00\n";
		let records = decode_house_officer(csv).unwrap();
		assert_eq!(records.len(), 5);
		assert_eq!(records[0].member_or_officer, "John Smith");
		assert_eq!(records[0].fiscal_year, "2023-2024");
	}
}
