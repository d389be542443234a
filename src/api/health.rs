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

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::db;
use crate::state::AppState;

/// Pings the database; never returns an error status itself so callers
/// always get a body to inspect, even when `database` reports `"error"`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
	let database = match db::ping(&state.pool).await {
		Ok(()) => "ok",
		Err(e) => {
			log::warn!("health check database ping failed: {e}");
			"error"
		}
	};
	let status = if database == "ok" { "ok" } else { "degraded" };
	Json(json!({ "status": status, "database": database }))
}
