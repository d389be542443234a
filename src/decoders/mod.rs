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

//! Format decoders: stateless, total functions from raw upstream
//! payloads to the tagged records in [`crate::types`].

pub mod bills_json;
pub mod dates;
pub mod expenditures_csv;
pub mod hansard_xml;
pub mod petitions;
pub mod votes_html;
pub mod xml_members;
pub mod xml_party_standings;
pub mod xml_roles;
