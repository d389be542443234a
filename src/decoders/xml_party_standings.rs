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

//! Party-standings XML decoder.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{ArchiveError, Result};
use crate::types::PartyStandingRecord;

/// Groups `PartyStanding` items by `CaucusShortName`, summing
/// `SeatCount`. `"Vacant"` is retained as its own entry (never linked to
/// a Party row by the caller).
pub fn decode(xml: &str) -> Result<Vec<PartyStandingRecord>> {
	let mut reader = Reader::from_str(xml);
	reader.config_mut().trim_text(true);

	let mut totals: HashMap<String, i32> = HashMap::new();
	let mut order: Vec<String> = Vec::new();
	let mut in_item = false;
	let mut current_tag = String::new();
	let mut party_name: Option<String> = None;
	let mut seat_count = 0i32;
	let mut buf = Vec::new();

	loop {
		match reader.read_event_into(&mut buf).map_err(|e| ArchiveError::decode_failed("party standings xml", e))? {
			Event::Start(e) => {
				let name = local_name(e.name().as_ref());
				if name == "PartyStanding" {
					in_item = true;
					party_name = None;
					seat_count = 0;
				} else if in_item {
					current_tag = name;
				}
			}
			Event::Text(t) if in_item => {
				let text = t.unescape().unwrap_or_default().trim().to_string();
				if text.is_empty() {
					continue;
				}
				match current_tag.as_str() {
					"CaucusShortName" => party_name = Some(text),
					"SeatCount" => seat_count = text.parse().unwrap_or(0),
					_ => {}
				}
			}
			Event::End(e) => {
				if local_name(e.name().as_ref()) == "PartyStanding" {
					in_item = false;
					if let Some(name) = party_name.take() {
						if !name.is_empty() {
							if !totals.contains_key(&name) {
								order.push(name.clone());
							}
							*totals.entry(name).or_insert(0) += seat_count;
						}
					}
				}
			}
			Event::Eof => break,
			_ => {}
		}
		buf.clear();
	}

	Ok(order.into_iter().map(|name| PartyStandingRecord { seat_count: totals[&name], party_name: name }).collect())
}

fn local_name(raw: &[u8]) -> String {
	let s = String::from_utf8_lossy(raw);
	s.rsplit(':').next().unwrap_or(&s).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sums_seat_counts_by_caucus() {
		let xml = r#"<PartyStandings>
			<PartyStanding><CaucusShortName>Liberal</CaucusShortName><SeatCount>5</SeatCount></PartyStanding>
			<PartyStanding><CaucusShortName>Liberal</CaucusShortName><SeatCount>3</SeatCount></PartyStanding>
			<PartyStanding><CaucusShortName>Vacant</CaucusShortName><SeatCount>1</SeatCount></PartyStanding>
		</PartyStandings>"#;

		let standings = decode(xml).unwrap();
		assert_eq!(standings.len(), 2);
		assert_eq!(standings[0].party_name, "Liberal");
		assert_eq!(standings[0].seat_count, 8);
		assert_eq!(standings[1].party_name, "Vacant");
	}
}
