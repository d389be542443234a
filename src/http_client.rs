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

//! Bounded-concurrency outbound fetcher with per-host minimum-interval
//! throttling and uniform error mapping onto
//! [`ArchiveError::FetchFailed`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Semaphore};
use tokio::time::Instant;

use crate::error::{ArchiveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

struct Inner {
	client: reqwest::Client,
	semaphore: Semaphore,
	/// process-local mutable state: last request start time per host,
	/// guarded by a mutex.
	last_start: Mutex<HashMap<String, Instant>>,
	min_interval: Duration,
}

/// Bounded concurrent outbound fetcher. Cheaply cloneable; clones share
/// the same semaphore and per-host throttle table.
#[derive(Clone)]
pub struct HttpClient {
	inner: Arc<Inner>,
}

impl HttpClient {
	pub fn new(max_concurrency: usize, min_request_interval_ms: u64, timeout: Duration) -> Self {
		let client = reqwest::Client::builder()
			.user_agent(concat!("parl-archive/", env!("CARGO_PKG_VERSION")))
			.timeout(timeout)
			.build()
			.expect("failed to build reqwest client");

		Self {
			inner: Arc::new(Inner {
				client,
				semaphore: Semaphore::new(max_concurrency.max(1)),
				last_start: Mutex::new(HashMap::new()),
				min_interval: Duration::from_millis(min_request_interval_ms),
			}),
		}
	}

	/// Fetch `url`, returning the response body as text. Any transport
	/// error or non-2xx status maps to [`ArchiveError::FetchFailed`]; this
	/// layer never retries.
	pub async fn fetch(&self, url: &str, method: Method, body: Option<String>) -> Result<String> {
		let _permit = self
			.inner
			.semaphore
			.acquire()
			.await
			.map_err(|e| ArchiveError::fetch_failed(url, e))?;

		self.throttle(url).await;

		let mut builder = match method {
			Method::Get => self.inner.client.get(url),
			Method::Post => self.inner.client.post(url),
		};
		builder = builder.header("Accept", "*/*");
		if let Some(b) = body {
			builder = builder.header("Content-Type", "application/x-www-form-urlencoded").body(b);
		}

		let response = builder.send().await.map_err(|e| ArchiveError::fetch_failed(url, e))?;
		let status = response.status();
		if !status.is_success() {
			return Err(ArchiveError::fetch_failed(url, format!("HTTP {status}")));
		}
		response.text().await.map_err(|e| ArchiveError::fetch_failed(url, e))
	}

	pub async fn fetch_json(&self, url: &str, body: String) -> Result<String> {
		let _permit = self.inner.semaphore.acquire().await.map_err(|e| ArchiveError::fetch_failed(url, e))?;
		self.throttle(url).await;

		let response = self
			.inner
			.client
			.post(url)
			.header("Content-Type", "application/json")
			.header("Accept", "application/json")
			.body(body)
			.send()
			.await
			.map_err(|e| ArchiveError::fetch_failed(url, e))?;
		let status = response.status();
		if !status.is_success() {
			return Err(ArchiveError::fetch_failed(url, format!("HTTP {status}")));
		}
		response.text().await.map_err(|e| ArchiveError::fetch_failed(url, e))
	}

	async fn throttle(&self, url: &str) {
		let host = reqwest::Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_owned)).unwrap_or_default();

		let mut last_start = self.inner.last_start.lock().await;
		let now = Instant::now();
		if let Some(previous) = last_start.get(&host) {
			let elapsed = now.saturating_duration_since(*previous);
			if elapsed < self.inner.min_interval {
				let wait = self.inner.min_interval - elapsed;
				tokio::time::sleep(wait).await;
			}
		}
		last_start.insert(host, Instant::now());
	}
}
