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

//! Per-MP roles XML decoder.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{ArchiveError, Result};
use crate::types::{RoleRecord, RoleType};

const ROLE_ELEMENTS: &[(&str, RoleType)] = &[
	("CaucusMemberRole", RoleType::Caucus),
	("ParliamentaryPositionRole", RoleType::ParliamentaryPosition),
	("CommitteeMemberRole", RoleType::Committee),
	("ParliamentaryAssociationsandInterparliamentaryGroupRole", RoleType::Association),
];

/// Decodes one role-element family at a time. Each family supplies its
/// own role-name field(s): caucus roles use `CaucusShortName`, positions
/// use `Title`, committees use `AffiliationRoleName`/`CommitteeName`,
/// associations use `Title`/`AssociationMemberRoleType`/`Organization`.
pub fn decode(xml: &str) -> Result<Vec<RoleRecord>> {
	let mut reader = Reader::from_str(xml);
	reader.config_mut().trim_text(true);

	let mut roles = Vec::new();
	let mut stack: Vec<(String, RoleType)> = Vec::new();
	let mut fields: HashMap<String, String> = HashMap::new();
	let mut current_tag = String::new();
	let mut buf = Vec::new();

	loop {
		match reader.read_event_into(&mut buf).map_err(|e| ArchiveError::decode_failed("roles xml", e))? {
			Event::Start(e) => {
				let name = local_name(e.name().as_ref());
				if let Some((_, role_type)) = ROLE_ELEMENTS.iter().find(|(tag, _)| *tag == name) {
					stack.push((name.clone(), *role_type));
					fields.clear();
				} else if !stack.is_empty() {
					current_tag = name;
				}
			}
			Event::Text(t) if !stack.is_empty() => {
				let text = t.unescape().unwrap_or_default().trim().to_string();
				if !text.is_empty() {
					fields.insert(current_tag.clone(), text);
				}
			}
			Event::End(e) => {
				let name = local_name(e.name().as_ref());
				if let Some((_, role_type)) = stack.last().copied() {
					if name == stack.last().unwrap().0 {
						roles.push(build_role(role_type, &fields));
						stack.pop();
					}
				}
			}
			Event::Eof => break,
			_ => {}
		}
		buf.clear();
	}

	Ok(roles)
}

fn build_role(role_type: RoleType, fields: &HashMap<String, String>) -> RoleRecord {
	let get = |key: &str| fields.get(key).cloned();

	let role_name = match role_type {
		RoleType::Caucus => get("CaucusShortName").filter(|s| !s.is_empty()).unwrap_or_else(|| "Caucus Member".into()),
		RoleType::ParliamentaryPosition => {
			get("Title").filter(|s| !s.is_empty()).unwrap_or_else(|| "Parliamentary Position".into())
		}
		RoleType::Committee => get("AffiliationRoleName")
			.filter(|s| !s.is_empty())
			.or_else(|| get("CommitteeName"))
			.unwrap_or_else(|| "Committee Member".into()),
		RoleType::Association => get("Title")
			.filter(|s| !s.is_empty())
			.or_else(|| get("AssociationMemberRoleType"))
			.unwrap_or_else(|| "Association Member".into()),
	};

	let organization = match role_type {
		RoleType::Committee => get("CommitteeName"),
		RoleType::Association => get("Organization"),
		_ => None,
	};

	let start_date = get("FromDateTime").and_then(|v| super::dates::parse_datetime(&v));
	let end_date = get("ToDateTime").and_then(|v| super::dates::parse_datetime(&v));

	RoleRecord {
		role_name,
		role_type,
		organization,
		parliament: get("ParliamentNumber").and_then(|v| v.parse().ok()),
		session: get("SessionNumber").and_then(|v| v.parse().ok()),
		start_date,
		end_date,
	}
}

fn local_name(raw: &[u8]) -> String {
	let s = String::from_utf8_lossy(raw);
	s.rsplit(':').next().unwrap_or(&s).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_caucus_and_committee_roles() {
		let xml = r#"<Roles>
			<CaucusMemberRole>
				<CaucusShortName>Liberal</CaucusShortName>
				<ParliamentNumber>44</ParliamentNumber>
				<SessionNumber>1</SessionNumber>
				<FromDateTime>2021-09-20T00:00:00</FromDateTime>
			</CaucusMemberRole>
			<CommitteeMemberRole>
				<AffiliationRoleName>Chair</AffiliationRoleName>
				<CommitteeName>Standing Committee on Finance</CommitteeName>
				<FromDateTime>2021-09-20T00:00:00</FromDateTime>
				<ToDateTime>2022-01-01T00:00:00</ToDateTime>
			</CommitteeMemberRole>
		</Roles>"#;

		let roles = decode(xml).unwrap();
		assert_eq!(roles.len(), 2);
		assert_eq!(roles[0].role_type, RoleType::Caucus);
		assert!(roles[0].is_current());
		assert_eq!(roles[1].organization.as_deref(), Some("Standing Committee on Finance"));
		assert!(!roles[1].is_current());
	}
}
