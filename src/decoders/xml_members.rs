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

//! All-MPs XML registry decoder.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{ArchiveError, Result};
use crate::types::MemberRecord;

struct MemberBuilder {
	person_id: i32,
	first_name: Option<String>,
	last_name: Option<String>,
	honorific: Option<String>,
	constituency_name: Option<String>,
	province: Option<String>,
	caucus_short_name: Option<String>,
	email: Option<String>,
	phone: Option<String>,
}

impl MemberBuilder {
	fn new() -> Self {
		Self {
			person_id: 0,
			first_name: None,
			last_name: None,
			honorific: None,
			constituency_name: None,
			province: None,
			caucus_short_name: None,
			email: None,
			phone: None,
		}
	}

	fn into_record(self) -> Option<MemberRecord> {
		if self.person_id == 0 {
			return None;
		}
		let first = self.first_name.unwrap_or_default();
		let last = self.last_name.unwrap_or_default();
		Some(MemberRecord {
			hoc_id: self.person_id,
			first_name: non_empty(first.clone()),
			last_name: non_empty(last.clone()),
			name: format!("{first} {last}").trim().to_string(),
			honorific: self.honorific.and_then(non_empty),
			constituency_name: self.constituency_name.unwrap_or_default(),
			province: self.province.unwrap_or_default(),
			caucus_short_name: self.caucus_short_name.and_then(non_empty),
			email: self.email.and_then(non_empty),
			phone: self.phone.and_then(non_empty),
		})
	}
}

fn non_empty(s: String) -> Option<String> {
	if s.trim().is_empty() {
		None
	} else {
		Some(s)
	}
}

/// Decodes the all-MPs XML registry into one [`MemberRecord`] per
/// `MemberOfParliament` element. MPs with a missing or zero `PersonId`
/// are skipped, matching the upstream's sentinel convention.
pub fn decode(xml: &str) -> Result<Vec<MemberRecord>> {
	let mut reader = Reader::from_str(xml);
	reader.config_mut().trim_text(true);

	let mut members = Vec::new();
	let mut in_member = false;
	let mut builder = MemberBuilder::new();
	let mut current_tag = String::new();
	let mut buf = Vec::new();

	loop {
		match reader.read_event_into(&mut buf).map_err(|e| ArchiveError::decode_failed("members xml", e))? {
			Event::Start(e) => {
				let name = local_name(e.name().as_ref());
				if name == "MemberOfParliament" {
					in_member = true;
					builder = MemberBuilder::new();
				} else if in_member {
					current_tag = name;
				}
			}
			Event::Text(t) if in_member => {
				let text = t.unescape().unwrap_or_default().trim().to_string();
				if text.is_empty() {
					continue;
				}
				match current_tag.as_str() {
					"PersonId" => builder.person_id = text.parse().unwrap_or(0),
					"PersonOfficialFirstName" => builder.first_name = Some(text),
					"PersonOfficialLastName" => builder.last_name = Some(text),
					"PersonShortHonorific" => builder.honorific = Some(text),
					"ConstituencyName" => builder.constituency_name = Some(text),
					"ConstituencyProvinceTerritoryName" => builder.province = Some(text),
					"CaucusShortName" => builder.caucus_short_name = Some(text),
					"PersonEmail" | "Email" if builder.email.is_none() => builder.email = Some(text),
					"PersonTelephone" | "Telephone" if builder.phone.is_none() => builder.phone = Some(text),
					_ => {}
				}
			}
			Event::End(e) => {
				let name = local_name(e.name().as_ref());
				if name == "MemberOfParliament" {
					in_member = false;
					if let Some(record) = std::mem::replace(&mut builder, MemberBuilder::new()).into_record() {
						members.push(record);
					}
				}
			}
			Event::Eof => break,
			_ => {}
		}
		buf.clear();
	}

	Ok(members)
}

fn local_name(raw: &[u8]) -> String {
	let s = String::from_utf8_lossy(raw);
	s.rsplit(':').next().unwrap_or(&s).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_a_single_mp_and_skips_zero_person_id() {
		let xml = r#"<ArrayOfMemberOfParliament>
			<MemberOfParliament>
				<PersonId>1</PersonId>
				<PersonOfficialFirstName>Jane</PersonOfficialFirstName>
				<PersonOfficialLastName>Doe</PersonOfficialLastName>
				<PersonShortHonorific>Hon.</PersonShortHonorific>
				<ConstituencyName>Test Riding</ConstituencyName>
				<ConstituencyProvinceTerritoryName>Ontario</ConstituencyProvinceTerritoryName>
				<CaucusShortName>Liberal</CaucusShortName>
			</MemberOfParliament>
			<MemberOfParliament>
				<PersonId>0</PersonId>
			</MemberOfParliament>
		</ArrayOfMemberOfParliament>"#;

		let members = decode(xml).unwrap();
		assert_eq!(members.len(), 1);
		assert_eq!(members[0].hoc_id, 1);
		assert_eq!(members[0].name, "Jane Doe");
		assert_eq!(members[0].province, "Ontario");
	}
}
