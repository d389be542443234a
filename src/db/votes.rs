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

//! Vote and VoteMember repositories. Natural key for a vote is
//! `(parliament, session, vote_number)`; vote members are
//! replaced wholesale per vote on re-ingestion since the ballot detail
//! page carries no per-member identifier of its own.

use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::{Vote, VoteMember};
use crate::error::Result;
use crate::types::{VoteDetailRecord, VoteListRecord};

#[allow(clippy::too_many_arguments)]
pub async fn upsert(
	executor: impl PgExecutor<'_>,
	list_record: &VoteListRecord,
	detail: Option<&VoteDetailRecord>,
	parliament: Option<i32>,
	session: Option<i32>,
	source_url: &str,
	source_hash: &str,
) -> Result<Vote> {
	let (motion_text, sitting) = match detail {
		Some(d) => (d.motion_text.clone(), d.sitting),
		None => (None, None),
	};
	let vote = sqlx::query_as::<_, Vote>(
		"INSERT INTO votes \
		 (vote_number, parliament, session, vote_date, subject, decision, yeas, nays, paired, bill_number, \
		  motion_text, sitting, source_url, source_hash) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
		 ON CONFLICT (parliament, session, vote_number) DO UPDATE SET \
		   vote_date = EXCLUDED.vote_date, subject = EXCLUDED.subject, decision = EXCLUDED.decision, \
		   yeas = EXCLUDED.yeas, nays = EXCLUDED.nays, paired = EXCLUDED.paired, \
		   bill_number = EXCLUDED.bill_number, motion_text = COALESCE(EXCLUDED.motion_text, votes.motion_text), \
		   sitting = COALESCE(EXCLUDED.sitting, votes.sitting), source_url = EXCLUDED.source_url, \
		   source_hash = EXCLUDED.source_hash \
		 RETURNING id, vote_number, parliament, session, vote_date, subject, decision, yeas, nays, paired, \
		   bill_number, motion_text, sitting, source_url, source_hash",
	)
	.bind(list_record.vote_number)
	.bind(parliament)
	.bind(session)
	.bind(list_record.vote_date)
	.bind(&list_record.subject)
	.bind(&list_record.decision)
	.bind(list_record.yeas)
	.bind(list_record.nays)
	.bind(list_record.paired)
	.bind(&list_record.bill_number)
	.bind(motion_text)
	.bind(sitting)
	.bind(source_url)
	.bind(source_hash)
	.fetch_one(executor)
	.await?;
	Ok(vote)
}

pub async fn replace_members(
	conn: &mut sqlx::PgConnection,
	vote_id: i64,
	members: &[(crate::types::VoteMemberRecord, Option<i64>)],
) -> Result<()> {
	// Takes the connection directly, rather than a generic executor, because
	// the delete and the inserts below must share whatever transaction the
	// caller (the parent vote upsert) is already in, not open their own.
	sqlx::query("DELETE FROM vote_members WHERE vote_id = $1").bind(vote_id).execute(&mut *conn).await?;
	for (record, representative_id) in members {
		let position = if record.paired { Some("Paired".to_string()) } else { record.position.clone() };
		sqlx::query(
			"INSERT INTO vote_members \
			 (vote_id, representative_id, hoc_id, member_name, party_name, riding_name, position) \
			 VALUES ($1, $2, $3, $4, $5, $6, $7)",
		)
		.bind(vote_id)
		.bind(representative_id)
		.bind(record.external_id)
		.bind(&record.name)
		.bind(&record.party)
		.bind(&record.riding_name)
		.bind(position)
		.execute(&mut *conn)
		.await?;
	}
	Ok(())
}

pub async fn get_by_number(
	executor: impl PgExecutor<'_>,
	parliament: i32,
	session: i32,
	vote_number: i32,
) -> Result<Option<Vote>> {
	let vote = sqlx::query_as::<_, Vote>(
		"SELECT id, vote_number, parliament, session, vote_date, subject, decision, yeas, nays, paired, \
		 bill_number, motion_text, sitting, source_url, source_hash FROM votes \
		 WHERE parliament = $1 AND session = $2 AND vote_number = $3",
	)
	.bind(parliament)
	.bind(session)
	.bind(vote_number)
	.fetch_optional(executor)
	.await?;
	Ok(vote)
}

pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<Vote>> {
	let vote = sqlx::query_as::<_, Vote>(
		"SELECT id, vote_number, parliament, session, vote_date, subject, decision, yeas, nays, paired, \
		 bill_number, motion_text, sitting, source_url, source_hash FROM votes WHERE id = $1",
	)
	.bind(id)
	.fetch_optional(executor)
	.await?;
	Ok(vote)
}

pub async fn members_for_vote(executor: impl PgExecutor<'_>, vote_id: i64) -> Result<Vec<VoteMember>> {
	let members = sqlx::query_as::<_, VoteMember>(
		"SELECT id, vote_id, representative_id, hoc_id, member_name, party_name, riding_name, position \
		 FROM vote_members WHERE vote_id = $1 ORDER BY member_name",
	)
	.bind(vote_id)
	.fetch_all(executor)
	.await?;
	Ok(members)
}

pub async fn list(executor: impl PgExecutor<'_>, parliament: Option<i32>, page: Page) -> Result<ListResult<Vote>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		vote_number: i32,
		parliament: Option<i32>,
		session: Option<i32>,
		vote_date: Option<chrono::NaiveDate>,
		subject: Option<String>,
		decision: Option<String>,
		yeas: Option<i32>,
		nays: Option<i32>,
		paired: Option<i32>,
		bill_number: Option<String>,
		motion_text: Option<String>,
		sitting: Option<i32>,
		source_url: Option<String>,
		source_hash: Option<String>,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, vote_number, parliament, session, vote_date, subject, decision, yeas, nays, paired, \
		 bill_number, motion_text, sitting, source_url, source_hash, COUNT(*) OVER() AS total FROM votes \
		 WHERE ($1::int IS NULL OR parliament = $1) ORDER BY vote_date DESC NULLS LAST LIMIT $2 OFFSET $3",
	)
	.bind(parliament)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| Vote {
			id: r.id,
			vote_number: r.vote_number,
			parliament: r.parliament,
			session: r.session,
			vote_date: r.vote_date,
			subject: r.subject,
			decision: r.decision,
			yeas: r.yeas,
			nays: r.nays,
			paired: r.paired,
			bill_number: r.bill_number,
			motion_text: r.motion_text,
			sitting: r.sitting,
			source_url: r.source_url,
			source_hash: r.source_hash,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
