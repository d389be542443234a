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

use crate::api::PageQuery;
use crate::db::filters::ListResult;
use crate::db::models::Petition;
use crate::db::petitions;
use crate::error::{ArchiveError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
	#[serde(flatten)]
	page: PageQuery,
	status: Option<String>,
}

pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<ListResult<Petition>>> {
	let page = q.page.validate()?;
	let result = petitions::list(&state.pool, q.status.as_deref(), page).await?;
	Ok(Json(result))
}

pub async fn get(State(state): State<AppState>, Path(petition_number): Path<String>) -> Result<Json<Petition>> {
	let petition = petitions::get_by_number(&state.pool, &petition_number).await?.ok_or(ArchiveError::NotFound)?;
	Ok(Json(petition))
}
