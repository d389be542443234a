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

//! Process-wide handler state: the database pool, the counter store,
//! and configuration, constructed once at startup and shared by
//! `Arc`/`Clone` rather than through globals.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenVerifier;
use crate::billing_webhook::SubscriptionProvider;
use crate::config::Config;
use crate::counter::CounterStore;
use crate::geocoding::PostalCodeResolver;

#[derive(Clone)]
pub struct AppState {
	pub pool: PgPool,
	pub counters: Arc<dyn CounterStore>,
	pub config: Arc<Config>,
	pub identity: Arc<dyn TokenVerifier>,
	pub geocoder: Arc<dyn PostalCodeResolver>,
	pub subscriptions: Arc<dyn SubscriptionProvider>,
}

impl AppState {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		pool: PgPool,
		counters: Arc<dyn CounterStore>,
		config: Arc<Config>,
		identity: Arc<dyn TokenVerifier>,
		geocoder: Arc<dyn PostalCodeResolver>,
		subscriptions: Arc<dyn SubscriptionProvider>,
	) -> Self {
		Self { pool, counters, config, identity, geocoder, subscriptions }
	}
}
