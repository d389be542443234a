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

//! Ephemeral counter store: `INCR`/`EXPIRE`/`GET`/`SET`/`DEL` over
//! short-lived string keys, backed by a remote store when configured
//! or an in-process fallback in development/test.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::Mutex;

use crate::error::{ArchiveError, Result};

#[async_trait]
pub trait CounterStore: Send + Sync {
	/// Atomically increments `key` by 1, creating it at 1 if absent.
	async fn incr(&self, key: &str) -> Result<i64>;

	/// Sets a TTL on `key`. A no-op if `key` doesn't exist in the remote
	/// store; the in-process fallback remembers the TTL and applies it
	/// as soon as the key is next set.
	async fn expire(&self, key: &str, ttl_seconds: i64) -> Result<()>;

	async fn get(&self, key: &str) -> Result<Option<String>>;

	async fn set(&self, key: &str, value: &str, ttl_seconds: Option<i64>) -> Result<()>;

	async fn del(&self, key: &str) -> Result<()>;
}

/// Remote counter store over a Redis-compatible connection.
#[derive(Clone)]
pub struct RedisCounterStore {
	conn: ConnectionManager,
}

impl RedisCounterStore {
	pub async fn connect(url: &str) -> Result<Self> {
		let client = redis::Client::open(url).map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
		let conn = client.get_connection_manager().await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
		Ok(Self { conn })
	}
}

#[async_trait]
impl CounterStore for RedisCounterStore {
	async fn incr(&self, key: &str) -> Result<i64> {
		let mut conn = self.conn.clone();
		// `INCR` on a missing key creates it at 0 then returns 1, which is
		// exactly the contract this store promises.
		let value: i64 = conn.incr(key, 1).await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
		Ok(value)
	}

	async fn expire(&self, key: &str, ttl_seconds: i64) -> Result<()> {
		let mut conn = self.conn.clone();
		let _: () = conn.expire(key, ttl_seconds).await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
		Ok(())
	}

	async fn get(&self, key: &str) -> Result<Option<String>> {
		let mut conn = self.conn.clone();
		let value: Option<String> = conn.get(key).await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
		Ok(value)
	}

	async fn set(&self, key: &str, value: &str, ttl_seconds: Option<i64>) -> Result<()> {
		let mut conn = self.conn.clone();
		match ttl_seconds {
			Some(ttl) => {
				let _: () =
					conn.set_ex(key, value, ttl as u64).await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
			}
			None => {
				let _: () = conn.set(key, value).await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
			}
		}
		Ok(())
	}

	async fn del(&self, key: &str) -> Result<()> {
		let mut conn = self.conn.clone();
		let _: () = conn.del(key).await.map_err(|e| ArchiveError::CounterStore(e.to_string()))?;
		Ok(())
	}
}

/// Single-process, mutex-guarded map with lazy TTL expiry on access.
/// Only permitted in development/test — outside those environments,
/// absence of a configured store URL is a fatal startup error.
#[derive(Clone, Default)]
pub struct InProcessCounterStore {
	inner: Arc<Mutex<InProcessState>>,
}

#[derive(Default)]
struct InProcessState {
	values: HashMap<String, String>,
	expiry: HashMap<String, Instant>,
}

impl InProcessState {
	fn cleanup(&mut self, key: &str) {
		if let Some(expires_at) = self.expiry.get(key) {
			if *expires_at <= Instant::now() {
				self.values.remove(key);
				self.expiry.remove(key);
			}
		}
	}
}

impl InProcessCounterStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl CounterStore for InProcessCounterStore {
	async fn incr(&self, key: &str) -> Result<i64> {
		let mut state = self.inner.lock().await;
		state.cleanup(key);
		let next = state.values.get(key).and_then(|v| v.parse::<i64>().ok()).unwrap_or(0) + 1;
		state.values.insert(key.to_string(), next.to_string());
		Ok(next)
	}

	async fn expire(&self, key: &str, ttl_seconds: i64) -> Result<()> {
		let mut state = self.inner.lock().await;
		state.expiry.insert(key.to_string(), Instant::now() + Duration::from_secs(ttl_seconds.max(0) as u64));
		Ok(())
	}

	async fn get(&self, key: &str) -> Result<Option<String>> {
		let mut state = self.inner.lock().await;
		state.cleanup(key);
		Ok(state.values.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str, ttl_seconds: Option<i64>) -> Result<()> {
		let mut state = self.inner.lock().await;
		state.values.insert(key.to_string(), value.to_string());
		if let Some(ttl) = ttl_seconds {
			state.expiry.insert(key.to_string(), Instant::now() + Duration::from_secs(ttl.max(0) as u64));
		}
		Ok(())
	}

	async fn del(&self, key: &str) -> Result<()> {
		let mut state = self.inner.lock().await;
		state.values.remove(key);
		state.expiry.remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn incr_on_missing_key_returns_one() {
		let store = InProcessCounterStore::new();
		assert_eq!(store.incr("k").await.unwrap(), 1);
		assert_eq!(store.incr("k").await.unwrap(), 2);
	}

	#[tokio::test]
	async fn expire_applies_on_next_access() {
		let store = InProcessCounterStore::new();
		store.expire("k", 0).await.unwrap();
		store.set("k", "v", None).await.unwrap();
		tokio::time::sleep(Duration::from_millis(5)).await;
		assert_eq!(store.get("k").await.unwrap(), None);
	}

	#[tokio::test]
	async fn set_with_ttl_expires() {
		let store = InProcessCounterStore::new();
		store.set("k", "v", Some(0)).await.unwrap();
		tokio::time::sleep(Duration::from_millis(5)).await;
		assert_eq!(store.get("k").await.unwrap(), None);
	}

	#[tokio::test]
	async fn del_removes_value_and_expiry() {
		let store = InProcessCounterStore::new();
		store.set("k", "v", Some(60)).await.unwrap();
		store.del("k").await.unwrap();
		assert_eq!(store.get("k").await.unwrap(), None);
	}

	#[tokio::test]
	async fn unexpired_value_survives_cleanup() {
		let store = InProcessCounterStore::new();
		store.set("k", "v", Some(60)).await.unwrap();
		assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
	}
}
