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

use axum::extract::{Path, State};
use axum::Json;

use crate::db::models::Riding;
use crate::db::ridings;
use crate::error::{ArchiveError, Result};
use crate::state::AppState;

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Riding>> {
	let riding = ridings::get(&state.pool, id).await?.ok_or(ArchiveError::NotFound)?;
	Ok(Json(riding))
}
