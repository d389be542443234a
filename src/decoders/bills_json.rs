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

//! LEGISinfo bills JSON decoder.

use serde::Deserialize;
use serde_json::Value;

use crate::decoders::dates::{parse_date, pick_first_date};
use crate::error::{ArchiveError, Result};
use crate::types::BillRecord;

#[derive(Deserialize)]
struct RawBill {
	#[serde(rename = "BillNumberFormatted")]
	bill_number_formatted: Option<String>,
	#[serde(rename = "ParliamentNumber")]
	parliament_number: Option<i32>,
	#[serde(rename = "SessionNumber")]
	session_number: Option<i32>,
	#[serde(rename = "BillId")]
	bill_id: Option<i32>,
	#[serde(rename = "LongTitleEn")]
	long_title_en: Option<String>,
	#[serde(rename = "ShortTitleEn")]
	short_title_en: Option<String>,
	#[serde(rename = "LongTitleFr")]
	long_title_fr: Option<String>,
	#[serde(rename = "ShortTitleFr")]
	short_title_fr: Option<String>,
	#[serde(rename = "CurrentStatusEn")]
	current_status_en: Option<String>,
	#[serde(rename = "PassedHouseFirstReadingDateTime")]
	passed_house_first_reading: Option<String>,
	#[serde(rename = "PassedSenateFirstReadingDateTime")]
	passed_senate_first_reading: Option<String>,
	#[serde(rename = "LatestActivityDateTime")]
	latest_activity: Option<String>,
	#[serde(rename = "SponsorEn")]
	sponsor_en: Option<String>,
}

/// Decodes the LEGISinfo bills JSON array for a parliament-session.
/// `introduced_date` is the earliest of the recorded first-reading
/// timestamps across both chambers, not merely the first one present.
pub fn decode(json: &str) -> Result<Vec<(BillRecord, Value)>> {
	let raw_items: Vec<Value> =
		serde_json::from_str(json).map_err(|e| ArchiveError::decode_failed("bills json", e))?;

	let mut bills = Vec::new();
	for item in raw_items {
		let raw: RawBill = match serde_json::from_value(item.clone()) {
			Ok(r) => r,
			Err(_) => continue,
		};
		let Some(bill_number) = raw.bill_number_formatted.filter(|s| !s.is_empty()) else { continue };

		let introduced_date =
			pick_first_date([raw.passed_house_first_reading.as_deref(), raw.passed_senate_first_reading.as_deref()]);
		let latest_activity_date = raw.latest_activity.as_deref().and_then(parse_date_lenient);

		bills.push((
			BillRecord {
				bill_number,
				parliament: raw.parliament_number,
				session: raw.session_number,
				legisinfo_id: raw.bill_id,
				title_en: raw.long_title_en.or(raw.short_title_en),
				title_fr: raw.long_title_fr.or(raw.short_title_fr),
				status: raw.current_status_en,
				introduced_date,
				latest_activity_date,
				sponsor_name: raw.sponsor_en,
			},
			item,
		));
	}
	Ok(bills)
}

fn parse_date_lenient(value: &str) -> Option<chrono::NaiveDate> {
	crate::decoders::dates::parse_datetime(value).map(|dt| dt.date_naive()).or_else(|| parse_date(value))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_earliest_first_reading_across_chambers() {
		let json = r#"[{
			"BillNumberFormatted": "C-10",
			"ParliamentNumber": 44,
			"SessionNumber": 1,
			"PassedHouseFirstReadingDateTime": "2024-02-01T00:00:00",
			"PassedSenateFirstReadingDateTime": "2024-01-05T00:00:00",
			"LongTitleEn": "An Act respecting testing"
		}]"#;
		let bills = decode(json).unwrap();
		assert_eq!(bills.len(), 1);
		assert_eq!(bills[0].0.introduced_date, chrono::NaiveDate::from_ymd_opt(2024, 1, 5));
	}

	#[test]
	fn skips_items_without_a_bill_number() {
		let json = r#"[{"ParliamentNumber": 44}]"#;
		assert!(decode(json).unwrap().is_empty());
	}
}
