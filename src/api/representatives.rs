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

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::PageQuery;
use crate::db::filters::ListResult;
use crate::db::models::Representative;
use crate::db::{representatives, ridings, roles, expenditures};
use crate::error::{ArchiveError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
	#[serde(flatten)]
	page: PageQuery,
	party_id: Option<i64>,
	riding_id: Option<i64>,
}

pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<ListResult<Representative>>> {
	let page = q.page.validate()?;
	let result = representatives::list_with_filters(&state.pool, q.party_id, q.riding_id, page).await?;
	Ok(Json(result))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Representative>> {
	let rep = representatives::get(&state.pool, id).await?.ok_or(ArchiveError::NotFound)?;
	Ok(Json(rep))
}

pub async fn roles(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Vec<crate::db::models::RepresentativeRole>>> {
	let rows = roles::list_for_representative(&state.pool, id).await?;
	Ok(Json(rows))
}

pub async fn expenditures(
	State(state): State<AppState>,
	Path(id): Path<i64>,
	Query(page): Query<PageQuery>,
) -> Result<Json<ListResult<crate::db::models::MemberExpenditure>>> {
	let page = page.validate()?;
	let result = expenditures::list_for_member(&state.pool, id, page).await?;
	Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
	postal_code: Option<String>,
	lat: Option<f64>,
	lng: Option<f64>,
}

/// Resolves the representative for a location, given either `postal_code`
/// or both `lat` and `lng`; any other combination is a validation error.
pub async fn lookup(State(state): State<AppState>, Query(q): Query<LookupQuery>) -> Result<Json<Value>> {
	let has_postal = q.postal_code.as_deref().is_some_and(|s| !s.trim().is_empty());
	let has_lat = q.lat.is_some();
	let has_lng = q.lng.is_some();

	let (lat, lng) = if has_postal && (has_lat || has_lng) {
		return Err(ArchiveError::Validation("provide either postal_code or lat/lng, not both".into()));
	} else if has_postal {
		let postal_code = q.postal_code.as_deref().unwrap().trim();
		state.geocoder.resolve(postal_code).await?.ok_or(ArchiveError::NotFound)?
	} else if has_lat && has_lng {
		(q.lat.unwrap(), q.lng.unwrap())
	} else {
		return Err(ArchiveError::Validation("provide postal_code or both lat and lng".into()));
	};

	if !(-90.0..=90.0).contains(&lat) {
		return Err(ArchiveError::Validation("lat must be between -90 and 90".into()));
	}
	if !(-180.0..=180.0).contains(&lng) {
		return Err(ArchiveError::Validation("lng must be between -180 and 180".into()));
	}

	let riding = ridings::get_by_point(&state.pool, lat, lng).await?.ok_or(ArchiveError::NotFound)?;
	let representative = representatives::get_by_riding_id(&state.pool, riding.id).await?;

	Ok(Json(json!({ "riding": riding, "representative": representative })))
}
