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

//! Shared pagination types for `list_with_filters`/`count_with_filters`.

/// `limit`/`offset` as validated by the read-endpoint handlers
/// (1..=100 default 20; offset >= 0 default 0).
#[derive(Debug, Clone, Copy)]
pub struct Page {
	pub limit: i64,
	pub offset: i64,
}

impl Default for Page {
	fn default() -> Self {
		Self { limit: 20, offset: 0 }
	}
}

/// `{items, total, limit, offset}` shape shared by every list endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListResult<T> {
	pub items: Vec<T>,
	pub total: i64,
	pub limit: i64,
	pub offset: i64,
}
