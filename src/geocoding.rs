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

//! Postal-code-to-coordinate resolution for the representative lookup
//! endpoint. The geocoder itself — and the civic-context cache in front
//! of it — is a thin wrapper over a third-party service and a key-value
//! store; only the seam it plugs into lives here.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait PostalCodeResolver: Send + Sync {
	/// Resolves a Canadian postal code to `(lat, lng)`, or `None` if the
	/// code is unrecognized.
	async fn resolve(&self, postal_code: &str) -> Result<Option<(f64, f64)>>;
}

/// Resolves nothing. A real deployment wires in the geocoding proxy
/// here; until then every postal-code lookup reports as unknown.
pub struct UnconfiguredPostalCodeResolver;

#[async_trait]
impl PostalCodeResolver for UnconfiguredPostalCodeResolver {
	async fn resolve(&self, _postal_code: &str) -> Result<Option<(f64, f64)>> {
		Ok(None)
	}
}
