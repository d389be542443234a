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

//! Command-line entrypoint: `serve` runs the HTTP API, `ingest` runs
//! the pipelines once, `migrate` applies pending database migrations.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use parl_archive::api;
use parl_archive::auth::UnconfiguredTokenVerifier;
use parl_archive::billing_webhook::NullSubscriptionProvider;
use parl_archive::config::Config;
use parl_archive::counter::{InProcessCounterStore, RedisCounterStore};
use parl_archive::db;
use parl_archive::geocoding::UnconfiguredPostalCodeResolver;
use parl_archive::http_client::HttpClient;
use parl_archive::logging;
use parl_archive::orchestrator;
use parl_archive::state::AppState;

#[derive(Parser)]
#[command(name = "parl-archive", about = "Canadian parliamentary data ingestion and API")]
struct Cli {
	/// Optional TOML config file overlaying environment variables.
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Runs the HTTP API server.
	Serve {
		#[arg(long, default_value = "0.0.0.0:8080")]
		bind: SocketAddr,
	},
	/// Runs the ingestion pipelines once and exits.
	Ingest {
		/// Restrict the run to these pipeline names (repeatable); all
		/// enabled pipelines run when omitted.
		#[arg(long = "only")]
		only: Vec<String>,
	},
	/// Applies pending database migrations and exits.
	Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let cfg = Config::load(cli.config.as_deref())?;
	logging::init(if cfg.environment.allows_in_process_counters() { log::LevelFilter::Debug } else { log::LevelFilter::Info })
		.ok();

	let pool = db::connect(&cfg.database_url).await?;

	match cli.command {
		Command::Migrate => {
			db::migrate(&pool).await?;
			log::info!("migrations applied");
		}
		Command::Ingest { only } => {
			let http = HttpClient::new(cfg.hoc_max_concurrency, cfg.hoc_min_request_interval_ms, Duration::from_secs(cfg.hoc_api_timeout_secs));
			let only = if only.is_empty() { None } else { Some(only.as_slice()) };
			let report = orchestrator::run_enabled(&pool, &http, &cfg, only).await;
			log::info!("ingestion report: {}", serde_json::Value::Object(report));
		}
		Command::Serve { bind } => {
			db::migrate(&pool).await?;

			let counters: Arc<dyn parl_archive::counter::CounterStore> = match &cfg.redis_url {
				Some(url) => Arc::new(RedisCounterStore::connect(url).await?),
				None => Arc::new(InProcessCounterStore::default()),
			};

			let state = AppState::new(
				pool,
				counters,
				Arc::new(cfg),
				Arc::new(UnconfiguredTokenVerifier),
				Arc::new(UnconfiguredPostalCodeResolver),
				Arc::new(NullSubscriptionProvider),
			);

			let app = api::router(state).into_make_service_with_connect_info::<SocketAddr>();
			log::info!("listening on {bind}");
			let listener = tokio::net::TcpListener::bind(bind).await?;
			axum::serve(listener, app).await?;
		}
	}

	Ok(())
}
