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
use crate::db::expenditures;
use crate::db::filters::ListResult;
use crate::db::models::HouseOfficerExpenditure;
use crate::error::Result;
use crate::state::AppState;

pub async fn house_officers(
	State(state): State<AppState>,
	Query(page): Query<PageQuery>,
) -> Result<Json<ListResult<HouseOfficerExpenditure>>> {
	let page = page.validate()?;
	let result = expenditures::list_house_officers(&state.pool, page).await?;
	Ok(Json(result))
}
