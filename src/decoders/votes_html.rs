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

//! Votes list and vote-detail HTML decoders.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::decoders::dates::{extract_bill_number, extract_sitting, parse_date, parse_digits};
use crate::error::Result;
use crate::types::{VoteDetailRecord, VoteListRecord, VoteMemberRecord};

/// Decodes the `#global-votes` table on the votes list page.
pub fn decode_list(html: &str) -> Result<Vec<VoteListRecord>> {
	let document = Html::parse_document(html);
	let table_sel = Selector::parse("table#global-votes tbody tr").unwrap();
	let cell_sel = Selector::parse("td").unwrap();
	let link_sel = Selector::parse("a").unwrap();

	let mut rows = Vec::new();
	for row in document.select(&table_sel) {
		let cells: Vec<_> = row.select(&cell_sel).collect();
		if cells.len() < 6 {
			continue;
		}
		let link = cells[0].select(&link_sel).next();
		let Some(vote_number) = link.and_then(|a| parse_digits(&text(a))) else { continue };
		let detail_href = link.and_then(|a| a.value().attr("href")).unwrap_or_default().to_string();
		let subject = text(&cells[2]);
		let (yeas, nays, paired) = parse_counts(&text(&cells[3]));
		let decision = non_empty(text(&cells[4]));
		let vote_date = parse_date(&text(&cells[5]));
		let bill_number = extract_bill_number(&subject);

		rows.push(VoteListRecord { vote_number, detail_href, subject, yeas, nays, paired, decision, vote_date, bill_number });
	}
	Ok(rows)
}

fn parse_counts(text: &str) -> (Option<i32>, Option<i32>, Option<i32>) {
	let parts: Vec<&str> = text.split('/').map(str::trim).filter(|s| !s.is_empty()).collect();
	(
		parts.first().and_then(|s| parse_digits(s)),
		parts.get(1).and_then(|s| parse_digits(s)),
		parts.get(2).and_then(|s| parse_digits(s)),
	)
}

static RIDING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());

/// Decodes a single vote detail page.
pub fn decode_detail(html: &str) -> Result<VoteDetailRecord> {
	let document = Html::parse_document(html);

	let subject = select_text(&document, "#mip-vote-desc");
	let motion_text = select_text(&document, "#mip-vote-text-collapsible-text");
	let bill_text = select_text(&document, ".mip-vote-bill-section h2");
	let sitting = select_text(&document, ".mip-vote-title-section p").and_then(|t| extract_sitting(&t));

	let members_sel = Selector::parse(".ce-mip-mp-vote-panel-body table tbody tr").unwrap();
	let cell_sel = Selector::parse("td").unwrap();
	let link_sel = Selector::parse("a").unwrap();

	let mut members = Vec::new();
	for row in document.select(&members_sel) {
		let cells: Vec<_> = row.select(&cell_sel).collect();
		if cells.len() < 3 {
			continue;
		}
		let name_cell = &cells[0];
		let link = name_cell.select(&link_sel).next();
		let (name, external_id) = match link {
			Some(a) => {
				let href = a.value().attr("href").unwrap_or_default();
				let id = href.trim_matches('/').rsplit('/').next().and_then(|s| s.parse().ok());
				(text(a), id)
			}
			None => (text(name_cell), None),
		};
		let name_full = text(name_cell);
		let riding_name = RIDING_RE.captures(&name_full).map(|c| c[1].trim().to_string());

		let party = non_empty(text(&cells[1]));
		let vote_text = text(&cells[2]);
		let paired_text = cells.get(3).map(text).unwrap_or_default();
		let position = if !vote_text.is_empty() {
			vote_text.clone()
		} else if !paired_text.is_empty() {
			"Paired".to_string()
		} else {
			"Absent".to_string()
		};
		let paired = position == "Paired";

		members.push(VoteMemberRecord { external_id, name, riding_name, party, position: Some(position), paired });
	}

	Ok(VoteDetailRecord { subject, motion_text, bill_text, sitting, members })
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
	let sel = Selector::parse(selector).unwrap();
	document.select(&sel).next().map(|el| el.text().collect::<String>().trim().to_string()).filter(|s| !s.is_empty())
}

fn text(el: &scraper::ElementRef) -> String {
	el.text().collect::<String>().trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
	if s.is_empty() {
		None
	} else {
		Some(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_a_vote_list_row() {
		let html = r#"<table id="global-votes"><tbody><tr>
			<td><a href="/vote/1">1</a></td><td></td><td>Second reading of Bill C-10</td>
			<td>150 / 100 / 2</td><td>Agreed to</td><td>2024-01-05</td>
		</tr></tbody></table>"#;
		let rows = decode_list(html).unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].vote_number, 1);
		assert_eq!(rows[0].yeas, Some(150));
		assert_eq!(rows[0].bill_number.as_deref(), Some("C-10"));
	}

	#[test]
	fn decodes_vote_detail_members_table() {
		let html = r#"
			<div id="mip-vote-desc">Test subject</div>
			<div class="ce-mip-mp-vote-panel-body"><table><tbody><tr>
				<td><a href="/members/en/2001">Jane Doe (Test Riding)</a></td>
				<td>Liberal</td><td>Yea</td>
			</tr></tbody></table></div>
		"#;
		let detail = decode_detail(html).unwrap();
		assert_eq!(detail.subject.as_deref(), Some("Test subject"));
		assert_eq!(detail.members.len(), 1);
		assert_eq!(detail.members[0].external_id, Some(2001));
		assert_eq!(detail.members[0].riding_name.as_deref(), Some("Test Riding"));
	}
}
