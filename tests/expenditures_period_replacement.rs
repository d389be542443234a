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

//! Invariant 10: re-ingesting the same disclosure period deletes and
//! re-inserts, never appends, so the row count for that period is
//! identical after any number of ingests.

mod common;

use chrono::{Duration, NaiveDate};
use parl_archive::db::expenditures;
use parl_archive::types::{ExpenditureCategory, ExpenditureRecord};
use rust_decimal::Decimal;

/// A period far outside any real disclosure quarter, placed at a
/// pseudo-random offset so concurrent test runs never share rows.
fn unique_period() -> (NaiveDate, NaiveDate) {
	let offset_days = (uuid::Uuid::new_v4().as_u128() % 3650) as i64;
	let start = NaiveDate::from_ymd_opt(2100, 1, 1).unwrap() + Duration::days(offset_days);
	(start, start + Duration::days(89))
}

async fn ingest_period(
	pool: &sqlx::PgPool,
	period_start: NaiveDate,
	period_end: NaiveDate,
	members: &[(&str, i64)],
) {
	expenditures::delete_member_period(pool, period_start, period_end).await.unwrap();
	for (name, amount) in members {
		let record = ExpenditureRecord {
			member_or_officer: name.to_string(),
			category: ExpenditureCategory::Travel,
			amount: Decimal::new(*amount, 2),
			period_start,
			period_end,
			fiscal_year: "2100-2101".to_string(),
		};
		expenditures::upsert_member(pool, &record, None, None, "https://example.test/disclosure").await.unwrap();
	}
}

async fn count_for_period(pool: &sqlx::PgPool, period_start: NaiveDate, period_end: NaiveDate) -> i64 {
	let row: (i64,) =
		sqlx::query_as("SELECT COUNT(*) FROM member_expenditures WHERE period_start = $1 AND period_end = $2")
			.bind(period_start)
			.bind(period_end)
			.fetch_one(pool)
			.await
			.unwrap();
	row.0
}

#[tokio::test]
async fn reingesting_the_same_period_replaces_rather_than_appends() {
	let pool = common::pool().await;
	let (period_start, period_end) = unique_period();
	let suffix = common::unique_suffix();

	let members = vec![(format!("Member A {suffix}"), 10_050i64), (format!("Member B {suffix}"), 20_075i64)];
	let members_ref: Vec<(&str, i64)> = members.iter().map(|(n, a)| (n.as_str(), *a)).collect();

	ingest_period(pool, period_start, period_end, &members_ref).await;
	assert_eq!(count_for_period(pool, period_start, period_end).await, 2);

	ingest_period(pool, period_start, period_end, &members_ref).await;
	assert_eq!(count_for_period(pool, period_start, period_end).await, 2, "re-ingesting the identical period must not append duplicate rows");

	// A disclosure that drops a member between publications must shrink the row count.
	ingest_period(pool, period_start, period_end, &members_ref[..1]).await;
	assert_eq!(count_for_period(pool, period_start, period_end).await, 1, "a member dropped from the new disclosure must not survive as a stale row");
}
