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
use crate::db::debates;
use crate::db::filters::ListResult;
use crate::db::models::{Debate, DebateIntervention};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
	#[serde(flatten)]
	page: PageQuery,
	parliament: Option<i32>,
	language: Option<String>,
}

pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<ListResult<Debate>>> {
	let page = q.page.validate()?;
	let result = debates::list(&state.pool, q.parliament, q.language.as_deref(), page).await?;
	Ok(Json(result))
}

pub async fn interventions(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Vec<DebateIntervention>>> {
	let rows = debates::interventions_for_debate(&state.pool, id).await?;
	Ok(Json(rows))
}
