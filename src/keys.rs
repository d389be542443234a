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

//! API key generation and HMAC hashing. Plaintext keys are random
//! tokens prefixed `cpk_live_`; only their HMAC-SHA256 digest is
//! persisted, so a leaked database never yields usable keys.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::error::{ArchiveError, Result};

pub const KEY_PREFIX: &str = "cpk_live_";
pub const KEY_PREFIX_LEN: usize = 12;

type HmacSha256 = Hmac<Sha256>;

/// Generates a new key, returning `(plaintext, key_prefix, key_hash)`.
pub fn generate(secret: &str) -> Result<(String, String, String)> {
	let mut token_bytes = [0u8; 32];
	rand::thread_rng().fill_bytes(&mut token_bytes);
	let token = base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, token_bytes);
	let plaintext = format!("{KEY_PREFIX}{token}");
	let key_prefix = plaintext.chars().take(KEY_PREFIX_LEN).collect::<String>();
	let key_hash = hash(&plaintext, secret)?;
	Ok((plaintext, key_prefix, key_hash))
}

/// `HMAC-SHA256(secret, plaintext)` as lowercase hex, stored as
/// `ApiKey.key_hash`.
pub fn hash(plaintext: &str, secret: &str) -> Result<String> {
	let mut mac =
		HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| ArchiveError::Configuration(e.to_string()))?;
	mac.update(plaintext.as_bytes());
	Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn mask(key_prefix: &str) -> String {
	format!("{key_prefix}...")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_key_hashes_consistently() {
		let (plaintext, prefix, key_hash) = generate("secret").unwrap();
		assert!(plaintext.starts_with(KEY_PREFIX));
		assert_eq!(prefix.len(), KEY_PREFIX_LEN);
		assert_eq!(hash(&plaintext, "secret").unwrap(), key_hash);
	}

	#[test]
	fn different_secrets_produce_different_hashes() {
		let (plaintext, _, _) = generate("secret").unwrap();
		assert_ne!(hash(&plaintext, "secret").unwrap(), hash(&plaintext, "other").unwrap());
	}
}
