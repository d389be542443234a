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

//! Thin HTTP handlers: validate query parameters, delegate to a
//! repository, serialize the result. No business logic lives here.

pub mod account;
pub mod bills;
pub mod billing_webhook;
pub mod debates;
pub mod expenditures;
pub mod health;
pub mod parties;
pub mod party_standings;
pub mod petitions;
pub mod representatives;
pub mod ridings;
pub mod roles;
pub mod votes;

use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::access_control;
use crate::config::Environment;
use crate::db::filters::Page;
use crate::error::{ArchiveError, Result};
use crate::state::AppState;

/// `limit`/`offset` as they arrive on the query string, unvalidated.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

impl PageQuery {
	/// `limit` defaults to 20 and must be in `1..=100`; `offset` defaults
	/// to 0 and must be non-negative.
	pub fn validate(self) -> Result<Page> {
		let limit = self.limit.unwrap_or(20);
		let offset = self.offset.unwrap_or(0);
		if !(1..=100).contains(&limit) {
			return Err(ArchiveError::Validation("limit must be between 1 and 100".into()));
		}
		if offset < 0 {
			return Err(ArchiveError::Validation("offset must be >= 0".into()));
		}
		Ok(Page { limit, offset })
	}
}

/// Assembles the full router: the health check and billing webhook sit
/// outside the access-control layer, every data endpoint sits behind it.
pub fn router(state: AppState) -> Router {
	let data_routes = Router::new()
		.route("/representatives", get(representatives::list))
		.route("/representatives/lookup", get(representatives::lookup))
		.route("/representatives/:id", get(representatives::get))
		.route("/representatives/:id/roles", get(representatives::roles))
		.route("/representatives/:id/expenditures", get(representatives::expenditures))
		.route("/ridings/:id", get(ridings::get))
		.route("/parties", get(parties::list))
		.route("/party-standings", get(party_standings::list))
		.route("/bills", get(bills::list))
		.route("/bills/:bill_number", get(bills::get))
		.route("/votes", get(votes::list))
		.route("/votes/:id", get(votes::get))
		.route("/petitions", get(petitions::list))
		.route("/petitions/:petition_number", get(petitions::get))
		.route("/debates", get(debates::list))
		.route("/debates/:id/interventions", get(debates::interventions))
		.route("/house-officer-expenditures", get(expenditures::house_officers))
		.route("/roles/current", get(roles::current))
		.route_layer(axum::middleware::from_fn_with_state(state.clone(), access_control::middleware));

	let account_routes = Router::new()
		.route("/account/api-key", get(account::get_key))
		.route("/account/api-key/rotate", post(account::rotate_key));

	let unauthenticated_routes =
		Router::new().route("/health", get(health::health)).route("/billing/webhook", post(billing_webhook::webhook));

	let cors = match state.config.environment {
		Environment::Production => CorsLayer::new(),
		_ => CorsLayer::permissive(),
	};

	Router::new().merge(unauthenticated_routes).merge(account_routes).merge(data_routes).layer(cors).with_state(state)
}
