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

//! Petitions search-result and detail-page decoders.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::decoders::dates::{parse_datetime, parse_digits};
use crate::error::{ArchiveError, Result};
use crate::types::{PetitionDetailRecord, PetitionListRecord};

#[derive(Deserialize)]
struct SearchResponse {
	html: String,
}

/// Parses one paginated JSON response from the petitions search
/// endpoint, returning its petition rows.
pub fn decode_page(json: &str) -> Result<Vec<PetitionListRecord>> {
	let payload: SearchResponse =
		serde_json::from_str(json).map_err(|e| ArchiveError::decode_failed("petitions search response", e))?;
	decode_rows(&payload.html)
}

/// Total page count from the paginator's `"Page: N of M"` text, found on
/// the first response.
pub fn total_pages(json: &str) -> Result<u32> {
	let payload: SearchResponse =
		serde_json::from_str(json).map_err(|e| ArchiveError::decode_failed("petitions search response", e))?;
	Ok(super::dates::extract_total_pages(&payload.html).unwrap_or(1))
}

fn decode_rows(html: &str) -> Result<Vec<PetitionListRecord>> {
	let document = Html::parse_document(html);
	let row_sel = Selector::parse("tr.Pub").unwrap();
	let link_sel = Selector::parse("a.publicationTitleSearch").unwrap();
	let span_sel = Selector::parse("span").unwrap();
	let cell_sel = Selector::parse("td").unwrap();

	let mut rows = Vec::new();
	for row in document.select(&row_sel) {
		let cells: Vec<_> = row.select(&cell_sel).collect();
		if cells.len() < 6 {
			continue;
		}
		let Some(link) = row.select(&link_sel).next() else { continue };
		let spans: Vec<_> = link.select(&span_sel).collect();
		let Some(petition_number) = spans.first().map(|s| text(s)).filter(|s| !s.is_empty()) else { continue };
		let title = spans.get(1).map(|s| text(s)).unwrap_or_else(|| text(&link));

		let status = non_empty(text(&cells[3]));
		let sponsor_name = non_empty(text(&cells[4]));
		let signatures = parse_digits(&text(&cells[5]));
		let detail_href = link.value().attr("href").map(str::to_string);

		rows.push(PetitionListRecord { petition_number, title, status, sponsor_name, signatures, detail_href });
	}
	Ok(rows)
}

static SPONSOR_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)\)").unwrap());

/// Parses a petition's detail page: sponsor external id (from the
/// `#DetailsMember` link), and the presentation/closing dates from the
/// history `dt`/`dd` pairs.
pub fn decode_detail(html: &str) -> Result<PetitionDetailRecord> {
	let document = Html::parse_document(html);
	let mut detail = PetitionDetailRecord::default();

	let member_sel = Selector::parse("#DetailsMember a").unwrap();
	if let Some(link) = document.select(&member_sel).next() {
		if let Some(href) = link.value().attr("href") {
			if let Some(caps) = SPONSOR_ID_RE.captures(href) {
				detail.sponsor_external_id = caps[1].parse().ok();
			}
		}
	}

	let dt_sel = Selector::parse(".history-section dt").unwrap();
	for dt in document.select(&dt_sel) {
		let label = text(&dt).to_lowercase();
		let Some(dd) = next_sibling_dd(&dt) else { continue };
		let Some(value) = parse_datetime(&text(&dd)) else { continue };
		if label.contains("presented") {
			detail.presentation_date = Some(value.date_naive());
		}
		if label.contains("closed") {
			detail.closing_date = Some(value.date_naive());
		}
	}

	Ok(detail)
}

fn next_sibling_dd<'a>(dt: &scraper::ElementRef<'a>) -> Option<scraper::ElementRef<'a>> {
	let mut siblings = dt.next_siblings();
	siblings.find_map(scraper::ElementRef::wrap).filter(|el| el.value().name() == "dd")
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
	fn decodes_a_petition_row() {
		let html = r#"{"html": "<table><tr class=\"Pub\"><td></td><td></td><td></td><td>Open</td><td>Jane Doe</td><td>1,234</td><a class=\"publicationTitleSearch\" href=\"/e-0001\"><span>e-0001</span><span>Save the thing</span></a></tr></table>"}"#;
		let rows = decode_page(html).unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].petition_number, "e-0001");
		assert_eq!(rows[0].signatures, Some(1234));
	}
}
