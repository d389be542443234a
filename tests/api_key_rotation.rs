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

//! Scenario 4 and invariant 7: rotating a user's key deactivates the
//! old one and leaves exactly one active key behind.

mod common;

use parl_archive::db::{api_keys, billing, users};
use parl_archive::keys;

const SECRET: &str = "test-secret";

async fn count_active_keys(pool: &sqlx::PgPool, user_id: uuid::Uuid) -> i64 {
	let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM api_keys WHERE user_id = $1 AND active = true")
		.bind(user_id)
		.fetch_one(pool)
		.await
		.unwrap();
	row.0
}

#[tokio::test]
async fn rotation_deactivates_the_old_key_and_mints_exactly_one_active_key() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();

	let user = users::upsert_by_subject(pool, "test-provider", &format!("rotate-{suffix}"), None).await.unwrap();
	billing::upsert(pool, user.id, Some(&format!("cus_{suffix}")), None, Some("active"), None, None, None).await.unwrap();

	let (k1_plaintext, k1_prefix, k1_hash) = keys::generate(SECRET).unwrap();
	let k1 = api_keys::create(pool, user.id, &k1_prefix, &k1_hash, true).await.unwrap();
	assert!(k1.active);
	assert_eq!(count_active_keys(pool, user.id).await, 1);

	// Rotation: deactivate-all, then insert — mirrors `account::rotate_key`.
	let mut tx = pool.begin().await.unwrap();
	api_keys::deactivate_all_for_user(&mut *tx, user.id).await.unwrap();
	let (k2_plaintext, k2_prefix, k2_hash) = keys::generate(SECRET).unwrap();
	let k2 = api_keys::create(&mut *tx, user.id, &k2_prefix, &k2_hash, true).await.unwrap();
	tx.commit().await.unwrap();

	assert_ne!(k1_plaintext, k2_plaintext);

	let refreshed_k1 = api_keys::get_by_hash(pool, &k1_hash).await.unwrap().expect("old key row still exists");
	assert!(!refreshed_k1.active, "the pre-rotation key must be deactivated");

	let refreshed_k2 = api_keys::get_by_hash(pool, &k2_hash).await.unwrap().expect("new key row exists");
	assert!(refreshed_k2.active);
	assert_eq!(k2.id, refreshed_k2.id);

	assert_eq!(count_active_keys(pool, user.id).await, 1, "exactly one active key must remain after rotation");
}
