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

//! Canadian parliamentary data ingestion and a metered HTTP read API
//! over the result.

pub mod access_control;
pub mod api;
pub mod auth;
pub mod billing_webhook;
pub mod config;
pub mod counter;
pub mod db;
pub mod decoders;
pub mod error;
pub mod geocoding;
pub mod hash;
pub mod http_client;
pub mod keys;
pub mod logging;
pub mod metering;
pub mod orchestrator;
pub mod pipelines;
pub mod state;
pub mod types;
