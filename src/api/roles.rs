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

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::PageQuery;
use crate::db::filters::ListResult;
use crate::db::models::RepresentativeRole;
use crate::db::roles;
use crate::error::{ArchiveError, Result};
use crate::state::AppState;
use crate::types::RoleType;

#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
	#[serde(flatten)]
	page: PageQuery,
	role_type: String,
}

/// Every current-holder row for a role type has no natural pagination
/// column either, so the full set is sliced in memory like party
/// standings; committee/caucus membership is bounded by the size of
/// Parliament.
pub async fn current(State(state): State<AppState>, Query(q): Query<CurrentQuery>) -> Result<Json<ListResult<RepresentativeRole>>> {
	let page = q.page.validate()?;
	let role_type = RoleType::parse(&q.role_type)
		.ok_or_else(|| ArchiveError::Validation(format!("unknown role_type: {}", q.role_type)))?;
	let all = roles::list_current_by_type(&state.pool, role_type).await?;
	let total = all.len() as i64;
	let start = (page.offset as usize).min(all.len());
	let end = (start + page.limit as usize).min(all.len());
	let items = all[start..end].to_vec();
	Ok(Json(ListResult { items, total, limit: page.limit, offset: page.offset }))
}
