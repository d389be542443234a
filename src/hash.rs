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

//! Content-hash idempotency: stable digests of raw upstream payloads,
//! compared against a persisted `source_hash` to skip no-op writes.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// `sha256(raw_payload)` as lowercase hex, the canonical form stored in
/// every `source_hash` column.
pub fn source_hash(raw_payload: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(raw_payload.as_bytes());
	hex::encode(hasher.finalize())
}

/// `sha256` of a JSON value serialized with sorted object keys, so that
/// field-order differences between upstream responses don't change the
/// hash (used by the bills pipeline).
pub fn canonical_json_hash(value: &Value) -> String {
	source_hash(&canonical_json(value))
}

fn canonical_json(value: &Value) -> String {
	match value {
		Value::Object(map) => {
			let mut keys: Vec<&String> = map.keys().collect();
			keys.sort();
			let entries: Vec<String> =
				keys.into_iter().map(|k| format!("{}:{}", serde_json::to_string(k).unwrap(), canonical_json(&map[k]))).collect();
			format!("{{{}}}", entries.join(","))
		}
		Value::Array(items) => format!("[{}]", items.iter().map(canonical_json).collect::<Vec<_>>().join(",")),
		other => serde_json::to_string(other).unwrap(),
	}
}

/// True when `new_hash` matches the row's existing `source_hash`, meaning
/// the upstream payload has not changed and the write can be skipped.
pub fn unchanged(existing: Option<&str>, new_hash: &str) -> bool {
	existing.map(|h| h == new_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_is_stable() {
		assert_eq!(source_hash("hello"), source_hash("hello"));
		assert_ne!(source_hash("hello"), source_hash("world"));
	}

	#[test]
	fn canonical_json_hash_ignores_key_order() {
		let a: Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
		let b: Value = serde_json::from_str(r#"{"a": 2, "b": 1}"#).unwrap();
		assert_eq!(canonical_json_hash(&a), canonical_json_hash(&b));
	}

	#[test]
	fn unchanged_requires_existing_match() {
		let h = source_hash("payload");
		assert!(unchanged(Some(&h), &h));
		assert!(!unchanged(None, &h));
		assert!(!unchanged(Some("deadbeef"), &h));
	}
}
