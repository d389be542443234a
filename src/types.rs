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

//! Tagged record types produced by `src/decoders/`. Each upstream source
//! gets its own struct rather than a dynamically-typed map; missing-field
//! tolerance is expressed with `Option<_>`, never with runtime key checks.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// One `MemberOfParliament` element from the all-MPs XML registry.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
	pub hoc_id: i32,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub name: String,
	pub honorific: Option<String>,
	pub constituency_name: String,
	pub province: String,
	pub caucus_short_name: Option<String>,
	pub email: Option<String>,
	pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleType {
	Caucus,
	ParliamentaryPosition,
	Committee,
	Association,
}

impl RoleType {
	pub fn as_str(self) -> &'static str {
		match self {
			RoleType::Caucus => "caucus",
			RoleType::ParliamentaryPosition => "parliamentary_position",
			RoleType::Committee => "committee",
			RoleType::Association => "association",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"caucus" => Some(RoleType::Caucus),
			"parliamentary_position" => Some(RoleType::ParliamentaryPosition),
			"committee" => Some(RoleType::Committee),
			"association" => Some(RoleType::Association),
			_ => None,
		}
	}
}

/// One role entry from a per-MP roles XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
	pub role_name: String,
	pub role_type: RoleType,
	pub organization: Option<String>,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub start_date: Option<DateTime<Utc>>,
	pub end_date: Option<DateTime<Utc>>,
}

impl RoleRecord {
	pub fn is_current(&self) -> bool {
		self.end_date.is_none()
	}
}

/// One caucus total from the party-standings XML, summed across its
/// constituent `PartyStanding` items.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyStandingRecord {
	pub party_name: String,
	pub seat_count: i32,
}

/// One row of the votes list HTML table.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteListRecord {
	pub vote_number: i32,
	pub detail_href: String,
	pub subject: String,
	pub yeas: Option<i32>,
	pub nays: Option<i32>,
	pub paired: Option<i32>,
	pub decision: Option<String>,
	pub vote_date: Option<NaiveDate>,
	pub bill_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoteMemberRecord {
	pub external_id: Option<i32>,
	pub name: String,
	pub riding_name: Option<String>,
	pub party: Option<String>,
	pub position: Option<String>,
	pub paired: bool,
}

/// Parsed content of a single vote detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteDetailRecord {
	pub subject: Option<String>,
	pub motion_text: Option<String>,
	pub bill_text: Option<String>,
	pub sitting: Option<i32>,
	pub members: Vec<VoteMemberRecord>,
}

/// One `tr.Pub` row of the petitions search result HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct PetitionListRecord {
	pub petition_number: String,
	pub title: String,
	pub status: Option<String>,
	pub sponsor_name: Option<String>,
	pub signatures: Option<i32>,
	pub detail_href: Option<String>,
}

/// Additional fields read from a petition's detail page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PetitionDetailRecord {
	pub sponsor_external_id: Option<i32>,
	pub presentation_date: Option<NaiveDate>,
	pub closing_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
	En,
	Fr,
}

impl Language {
	pub fn as_str(self) -> &'static str {
		match self {
			Language::En => "en",
			Language::Fr => "fr",
		}
	}

	pub fn upstream_letter(self) -> char {
		match self {
			Language::En => 'E',
			Language::Fr => 'F',
		}
	}
}

/// One `Intervention` element, emitted in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionRecord {
	pub sequence: i32,
	pub order_of_business: Option<String>,
	pub subject_of_business: Option<String>,
	pub timestamp: Option<String>,
	pub speaker_name: Option<String>,
	pub speaker_affiliation: Option<String>,
	pub text: String,
	pub intervention_type: Option<String>,
}

/// A fully-decoded Hansard sitting document.
#[derive(Debug, Clone, PartialEq)]
pub struct HansardRecord {
	pub debate_date: Option<NaiveDate>,
	pub volume: Option<String>,
	pub number: Option<String>,
	pub speaker_name: Option<String>,
	pub interventions: Vec<InterventionRecord>,
}

/// One entry of the LEGISinfo bills JSON feed.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRecord {
	pub bill_number: String,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub legisinfo_id: Option<i32>,
	pub title_en: Option<String>,
	pub title_fr: Option<String>,
	pub status: Option<String>,
	pub introduced_date: Option<NaiveDate>,
	pub latest_activity_date: Option<NaiveDate>,
	pub sponsor_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenditureCategory {
	Salaries,
	Travel,
	Hospitality,
	Contracts,
	Other,
}

impl ExpenditureCategory {
	pub fn as_str(self) -> &'static str {
		match self {
			ExpenditureCategory::Salaries => "Salaries",
			ExpenditureCategory::Travel => "Travel",
			ExpenditureCategory::Hospitality => "Hospitality",
			ExpenditureCategory::Contracts => "Contracts",
			ExpenditureCategory::Other => "Other",
		}
	}
}

/// One `(member_or_officer, category)` row of an expenditure disclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenditureRecord {
	pub member_or_officer: String,
	pub category: ExpenditureCategory,
	pub amount: Decimal,
	pub period_start: NaiveDate,
	pub period_end: NaiveDate,
	pub fiscal_year: String,
}
