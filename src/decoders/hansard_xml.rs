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

//! Hansard sitting-document decoder.
//!
//! Streams the document in order, maintaining a running context of the
//! order-of-business, subject, language, and timestamp headings that
//! precede each `Intervention`, rather than building a DOM.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::decoders::dates::parse_date;
use crate::error::{ArchiveError, Result};
use crate::types::{HansardRecord, InterventionRecord};

#[derive(Default)]
struct InterventionBuilder {
	in_person_speaking: bool,
	speaker_affiliation: Option<String>,
	para_texts: Vec<String>,
	current_para: Option<String>,
	intervention_type: Option<String>,
}

/// Decodes a single sitting document. `sequence` numbers are assigned
/// 1..N in document order.
pub fn decode(xml: &str) -> Result<HansardRecord> {
	let mut reader = Reader::from_str(xml);
	reader.config_mut().trim_text(true);

	let mut extracted: HashMap<String, String> = HashMap::new();
	let mut interventions = Vec::new();

	let mut current_order: Option<String> = None;
	let mut current_subject: Option<String> = None;
	let mut current_language: Option<String> = None;
	let mut current_timestamp: Option<String> = None;

	let mut tag_stack: Vec<String> = Vec::new();
	let mut current_extracted_name: Option<String> = None;
	let mut current_extracted_text = String::new();

	let mut intervention: Option<InterventionBuilder> = None;

	let mut buf = Vec::new();

	loop {
		match reader.read_event_into(&mut buf).map_err(|e| ArchiveError::decode_failed("hansard xml", e))? {
			Event::Start(e) => {
				let name = local_name(e.name().as_ref());

				match name.as_str() {
					"ExtractedItem" => {
						current_extracted_name =
							e.attributes().flatten().find(|a| local_name(a.key.as_ref()) == "Name").map(|a| {
								String::from_utf8_lossy(&a.value).to_string()
							});
						current_extracted_text.clear();
					}
					"FloorLanguage" => {
						current_language = e.attributes().flatten().find(|a| local_name(a.key.as_ref()) == "language").map(
							|a| String::from_utf8_lossy(&a.value).to_string(),
						);
					}
					"Timestamp" => {
						let hr = attr_value(&e, "Hr");
						let mn = attr_value(&e, "Mn");
						if let (Some(hr), Some(mn)) = (hr, mn) {
							if let (Ok(hr), Ok(mn)) = (hr.parse::<u32>(), mn.parse::<u32>()) {
								current_timestamp = Some(format!("{hr:02}:{mn:02}"));
							}
						}
					}
					"Intervention" => {
						intervention =
							Some(InterventionBuilder { intervention_type: attr_value(&e, "Type"), ..Default::default() });
					}
					"PersonSpeaking" => {
						if let Some(iv) = intervention.as_mut() {
							iv.in_person_speaking = true;
						}
					}
					"ParaText" => {
						if let Some(iv) = intervention.as_mut() {
							iv.current_para = Some(String::new());
						}
					}
					_ => {}
				}

				tag_stack.push(name);
			}
			Event::Text(t) => {
				let text = t.unescape().unwrap_or_default().to_string();
				if current_extracted_name.is_some() {
					current_extracted_text.push_str(&text);
				}
				if name_is(&tag_stack, "OrderOfBusinessTitle") {
					append_trimmed(&mut current_order, &text);
				} else if name_is(&tag_stack, "SubjectOfBusinessTitle") {
					append_trimmed(&mut current_subject, &text);
				}
				if let Some(iv) = intervention.as_mut() {
					if iv.in_person_speaking {
						let buf = iv.speaker_affiliation.get_or_insert_with(String::new);
						buf.push_str(&text);
					}
					if let Some(para) = iv.current_para.as_mut() {
						para.push_str(&text);
					}
				}
			}
			Event::End(e) => {
				let name = local_name(e.name().as_ref());
				tag_stack.pop();

				if name == "ExtractedItem" {
					if let Some(key) = current_extracted_name.take() {
						extracted.insert(key, current_extracted_text.trim().to_string());
					}
				}

				if name == "PersonSpeaking" {
					if let Some(iv) = intervention.as_mut() {
						iv.in_person_speaking = false;
					}
				}

				if name == "ParaText" {
					if let Some(iv) = intervention.as_mut() {
						if let Some(text) = iv.current_para.take() {
							let trimmed = text.trim().to_string();
							if !trimmed.is_empty() {
								iv.para_texts.push(trimmed);
							}
						}
					}
				}

				if name == "Intervention" {
					if let Some(iv) = intervention.take() {
						let speaker_affiliation = iv.speaker_affiliation.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
						let speaker_name =
							speaker_affiliation.as_ref().map(|s| s.split('(').next().unwrap_or(s).trim().to_string());
						interventions.push(InterventionRecord {
							sequence: 0,
							order_of_business: current_order.clone(),
							subject_of_business: current_subject.clone(),
							timestamp: current_timestamp.clone(),
							speaker_name,
							speaker_affiliation,
							text: iv.para_texts.join("\n\n"),
							intervention_type: iv.intervention_type,
						});
					}
				}
			}
			Event::Eof => break,
			_ => {}
		}
		buf.clear();
	}

	for (i, iv) in interventions.iter_mut().enumerate() {
		iv.sequence = i as i32 + 1;
	}

	let debate_date = extracted
		.get("Date")
		.and_then(|v| parse_date(v))
		.or_else(|| {
			let y = extracted.get("MetaDateNumYear")?;
			let m = extracted.get("MetaDateNumMonth")?;
			let d = extracted.get("MetaDateNumDay")?;
			parse_date(&format!("{y}-{m}-{d}"))
		});

	Ok(HansardRecord {
		debate_date,
		volume: extracted.get("Volume").cloned(),
		number: extracted.get("Number").cloned(),
		speaker_name: extracted.get("SpeakerName").cloned(),
		interventions,
	})
}

fn append_trimmed(target: &mut Option<String>, text: &str) {
	let trimmed = text.trim();
	if !trimmed.is_empty() {
		*target = Some(trimmed.to_string());
	}
}

fn name_is(stack: &[String], tag: &str) -> bool {
	stack.last().map(|t| t == tag).unwrap_or(false)
}

fn attr_value(e: &quick_xml::events::BytesStart, key: &str) -> Option<String> {
	e.attributes().flatten().find(|a| local_name(a.key.as_ref()) == key).map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn local_name(raw: &[u8]) -> String {
	let s = String::from_utf8_lossy(raw);
	s.rsplit(':').next().unwrap_or(&s).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_metadata_and_sequences_interventions() {
		let xml = r#"<Hansard>
			<ExtractedItem Name="Date">Monday, January 5, 2024</ExtractedItem>
			<ExtractedItem Name="Volume">148</ExtractedItem>
			<OrderOfBusinessTitle>Government Orders</OrderOfBusinessTitle>
			<SubjectOfBusinessTitle>Budget Implementation Act</SubjectOfBusinessTitle>
			<FloorLanguage language="EN"/>
			<Timestamp Hr="10" Mn="5"/>
			<Intervention Type="Speech">
				<PersonSpeaking><Affiliation>Jane Doe (Test Riding)</Affiliation></PersonSpeaking>
				<ParaText>Hello there.</ParaText>
				<ParaText>Second paragraph.</ParaText>
			</Intervention>
		</Hansard>"#;

		let record = decode(xml).unwrap();
		assert_eq!(record.volume.as_deref(), Some("148"));
		assert_eq!(record.interventions.len(), 1);
		let iv = &record.interventions[0];
		assert_eq!(iv.sequence, 1);
		assert_eq!(iv.speaker_name.as_deref(), Some("Jane Doe"));
		assert_eq!(iv.text, "Hello there.\n\nSecond paragraph.");
		assert_eq!(iv.order_of_business.as_deref(), Some("Government Orders"));
	}
}
