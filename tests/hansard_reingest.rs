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

//! Scenario 6 and invariants 2/3: re-ingesting a Hansard sitting with
//! an unchanged payload is a no-op, and an ingest that does change the
//! payload replaces the intervention set atomically, with no
//! duplicates and no partial state.

mod common;

use parl_archive::db::debates as debates_repo;
use parl_archive::decoders::hansard_xml;
use parl_archive::hash::{source_hash, unchanged};
use parl_archive::types::Language;

fn sitting_xml(speech: &str) -> String {
	format!(
		r#"<Hansard>
			<ExtractedItem Name="Date">Monday, January 5, 2024</ExtractedItem>
			<ExtractedItem Name="Volume">148</ExtractedItem>
			<OrderOfBusinessTitle>Government Orders</OrderOfBusinessTitle>
			<Intervention Type="Speech">
				<PersonSpeaking><Affiliation>Jane Doe (Test Riding)</Affiliation></PersonSpeaking>
				<ParaText>{speech}</ParaText>
			</Intervention>
		</Hansard>"#
	)
}

/// Mirrors the debates pipeline's fetch-hash-compare-decode sequence,
/// minus the HTTP fetch itself: the parent upsert and the child
/// replacement share one transaction, the way `pipelines::debates::run`
/// does.
async fn ingest_if_changed(pool: &sqlx::PgPool, url: &str, xml: &str) -> bool {
	let hash = source_hash(xml);
	let existing = debates_repo::get_by_document_url(pool, url).await.unwrap();
	if let Some(existing) = &existing {
		if unchanged(Some(&existing.source_hash), &hash) {
			return false;
		}
	}
	let decoded = hansard_xml::decode(xml).unwrap();
	let mut tx = pool.begin().await.unwrap();
	let debate = debates_repo::upsert(&mut *tx, &decoded, Language::En, Some(44), Some(1), Some(1), url, &hash).await.unwrap();
	debates_repo::replace_interventions(&mut *tx, debate.id, &decoded.interventions, Language::En).await.unwrap();
	tx.commit().await.unwrap();
	true
}

#[tokio::test]
async fn unchanged_payload_is_a_no_op_on_reingest() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let url = format!("https://example.test/hansard/{suffix}.xml");
	let xml = sitting_xml("Hello there.");

	assert!(ingest_if_changed(pool, &url, &xml).await, "first ingest must write");
	let first = debates_repo::get_by_document_url(pool, &url).await.unwrap().unwrap();
	let first_interventions = debates_repo::interventions_for_debate(pool, first.id).await.unwrap();
	assert_eq!(first_interventions.len(), 1);

	assert!(!ingest_if_changed(pool, &url, &xml).await, "reingesting the identical payload must short-circuit");
	let second = debates_repo::get_by_document_url(pool, &url).await.unwrap().unwrap();
	assert_eq!(second.source_hash, first.source_hash);
	let second_interventions = debates_repo::interventions_for_debate(pool, second.id).await.unwrap();
	assert_eq!(second_interventions.len(), 1, "interventions must not be duplicated by a no-op reingest");
	assert_eq!(second_interventions[0].text, first_interventions[0].text);
}

#[tokio::test]
async fn changed_payload_replaces_the_intervention_set_atomically() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let url = format!("https://example.test/hansard/{suffix}.xml");

	assert!(ingest_if_changed(pool, &url, &sitting_xml("First version.")).await);
	let debate = debates_repo::get_by_document_url(pool, &url).await.unwrap().unwrap();
	let before = debates_repo::interventions_for_debate(pool, debate.id).await.unwrap();
	assert_eq!(before[0].text, "First version.");

	assert!(ingest_if_changed(pool, &url, &sitting_xml("Revised version.")).await, "a changed payload must not be skipped");
	let after = debates_repo::interventions_for_debate(pool, debate.id).await.unwrap();
	assert_eq!(after.len(), 1, "the old intervention row must be gone, not appended to");
	assert_eq!(after[0].text, "Revised version.");

	let refreshed_debate = debates_repo::get_by_document_url(pool, &url).await.unwrap().unwrap();
	assert_ne!(refreshed_debate.source_hash, debate.source_hash);
}

/// Guards the transaction fix directly: if the child write fails after
/// the parent upsert has run but before either is committed, the whole
/// transaction must roll back, so the parent keeps its old `source_hash`
/// rather than committing a hash for an intervention set it never wrote.
#[tokio::test]
async fn failed_intervention_write_rolls_back_the_parent_hash_update() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let url = format!("https://example.test/hansard/{suffix}.xml");

	assert!(ingest_if_changed(pool, &url, &sitting_xml("Original version.")).await);
	let original = debates_repo::get_by_document_url(pool, &url).await.unwrap().unwrap();

	let new_xml = sitting_xml("Attempted update.");
	let new_hash = source_hash(&new_xml);
	let decoded = hansard_xml::decode(&new_xml).unwrap();

	let mut tx = pool.begin().await.unwrap();
	let debate =
		debates_repo::upsert(&mut *tx, &decoded, Language::En, Some(44), Some(1), Some(1), &url, &new_hash).await.unwrap();
	// A debate id that doesn't exist trips the foreign key on
	// debate_interventions, forcing the same kind of mid-sequence failure
	// a crash or a dropped connection would produce.
	let bogus_debate_id = debate.id + 1_000_000;
	let result = debates_repo::replace_interventions(&mut *tx, bogus_debate_id, &decoded.interventions, Language::En).await;
	assert!(result.is_err(), "the forced foreign key violation must surface as an error");
	tx.rollback().await.unwrap();

	let after = debates_repo::get_by_document_url(pool, &url).await.unwrap().unwrap();
	assert_eq!(after.source_hash, original.source_hash, "a rolled-back child write must not leave the new hash committed");
	let interventions = debates_repo::interventions_for_debate(pool, original.id).await.unwrap();
	assert_eq!(interventions.len(), 1, "the original intervention must survive the rolled-back re-ingest attempt");
	assert_eq!(interventions[0].text, "Original version.");
}
