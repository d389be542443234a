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

use crate::api::PageQuery;
use crate::db::filters::ListResult;
use crate::db::party_standings;
use crate::error::Result;
use crate::state::AppState;

/// The seat-count snapshot has no natural pagination column to push
/// `LIMIT`/`OFFSET` into, so the full snapshot is fetched and sliced
/// in memory; a sitting Parliament has a few hundred seats at most.
pub async fn list(
	State(state): State<AppState>,
	Query(page): Query<PageQuery>,
) -> Result<Json<ListResult<crate::db::models::PartyStanding>>> {
	let page = page.validate()?;
	let all = party_standings::latest(&state.pool).await?;
	let total = all.len() as i64;
	let start = (page.offset as usize).min(all.len());
	let end = (start + page.limit as usize).min(all.len());
	let items = all[start..end].to_vec();
	Ok(Json(ListResult { items, total, limit: page.limit, offset: page.offset }))
}
