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

//! Scenario 1/2 and invariant 9: `get_by_point` matches a point
//! strictly inside a riding's polygon and excludes a point exactly on
//! its boundary.
//!
//! Each riding gets its own small, non-overlapping box keyed off its
//! (monotonically increasing) row id, so parallel test functions
//! sharing one database never contend over the same geography.

mod common;

use parl_archive::db::{representatives, ridings};

struct SeededRiding {
	id: i64,
	name: String,
	lat_min: f64,
	lng_min: f64,
}

const BOX_SIDE: f64 = 0.001;

async fn seed_polygon_riding(pool: &sqlx::PgPool, name: &str) -> SeededRiding {
	let riding = ridings::get_or_create(pool, name, "Ontario").await.unwrap();
	let lat_min = -80.0 + (riding.id as f64) * 0.01;
	let lng_min = -75.0;
	let lat_max = lat_min + BOX_SIDE;
	let lng_max = lng_min + BOX_SIDE;
	let wkt = format!(
		"POLYGON(({lng_min} {lat_min}, {lng_max} {lat_min}, {lng_max} {lat_max}, {lng_min} {lat_max}, {lng_min} {lat_min}))"
	);
	sqlx::query("UPDATE ridings SET geometry = ST_GeomFromText($1, 4326) WHERE id = $2")
		.bind(&wkt)
		.bind(riding.id)
		.execute(pool)
		.await
		.unwrap();
	SeededRiding { id: riding.id, name: riding.name, lat_min, lng_min }
}

#[tokio::test]
async fn point_inside_polygon_resolves_riding_and_representative() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let seeded = seed_polygon_riding(pool, &format!("Polygon Riding {suffix}")).await;

	let hoc_id = (uuid::Uuid::new_v4().as_u128() % 900_000) as i32 + 1;
	representatives::upsert_by_hoc_id(
		pool, hoc_id, Some("PostGIS"), Some("Rep"), "PostGIS Rep", None, None, None, None, None, None, Some(seeded.id),
	)
	.await
	.unwrap();

	let mid_lat = seeded.lat_min + BOX_SIDE / 2.0;
	let mid_lng = seeded.lng_min + BOX_SIDE / 2.0;
	let found = ridings::get_by_point(pool, mid_lat, mid_lng).await.unwrap().expect("point inside polygon should match");
	assert_eq!(found.id, seeded.id);
	assert_eq!(found.name, seeded.name);

	let rep = representatives::get_by_riding_id(pool, seeded.id).await.unwrap().expect("riding has an active representative");
	assert_eq!(rep.hoc_id, hoc_id);
}

#[tokio::test]
async fn point_on_polygon_boundary_is_rejected() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let seeded = seed_polygon_riding(pool, &format!("Boundary Riding {suffix}")).await;

	// The southwest corner is itself a polygon vertex: on the boundary.
	let found = ridings::get_by_point(pool, seeded.lat_min, seeded.lng_min).await.unwrap();
	assert!(found.is_none(), "a boundary point must not match, per ST_Contains semantics");
}
