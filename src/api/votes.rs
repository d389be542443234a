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
use serde::{Deserialize, Serialize};

use crate::api::PageQuery;
use crate::db::filters::ListResult;
use crate::db::models::{Vote, VoteMember};
use crate::db::votes;
use crate::error::{ArchiveError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
	#[serde(flatten)]
	page: PageQuery,
	parliament: Option<i32>,
}

pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<ListResult<Vote>>> {
	let page = q.page.validate()?;
	let result = votes::list(&state.pool, q.parliament, page).await?;
	Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct VoteDetail {
	#[serde(flatten)]
	vote: Vote,
	members: Vec<VoteMember>,
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<VoteDetail>> {
	let vote = votes::get(&state.pool, id).await?.ok_or(ArchiveError::NotFound)?;
	let members = votes::members_for_vote(&state.pool, id).await?;
	Ok(Json(VoteDetail { vote, members }))
}
