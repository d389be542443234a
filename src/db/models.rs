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

//! Row types returned by the repositories, one struct per entity.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
	pub id: Uuid,
	pub auth_provider: String,
	pub auth_subject_id: String,
	pub email: Option<String>,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Billing {
	pub user_id: Uuid,
	pub customer_id: Option<String>,
	pub subscription_id: Option<String>,
	pub status: Option<String>,
	pub price_id: Option<String>,
	pub current_period_start: Option<DateTime<Utc>>,
	pub current_period_end: Option<DateTime<Utc>>,
}

impl Billing {
	pub fn is_active(&self) -> bool {
		matches!(self.status.as_deref(), Some("active") | Some("trialing"))
	}
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApiKey {
	pub id: Uuid,
	pub user_id: Uuid,
	pub key_prefix: String,
	#[serde(skip_serializing)]
	pub key_hash: String,
	pub active: bool,
	pub revoked_at: Option<DateTime<Utc>>,
	pub last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Party {
	pub id: i64,
	pub name: String,
	pub short_name: Option<String>,
	pub color: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Riding {
	pub id: i64,
	pub name: String,
	pub province: String,
	pub fed_number: Option<i32>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Representative {
	pub id: i64,
	pub hoc_id: i32,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub name: String,
	pub honorific: Option<String>,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub photo_url: Option<String>,
	pub profile_url: Option<String>,
	pub is_active: bool,
	pub party_id: Option<i64>,
	pub riding_id: Option<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct RepresentativeRole {
	pub id: i64,
	pub representative_id: i64,
	pub role_name: String,
	pub role_type: String,
	pub organization: Option<String>,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub start_date: Option<DateTime<Utc>>,
	pub end_date: Option<DateTime<Utc>>,
	pub is_current: bool,
	pub source_url: String,
	pub source_hash: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PartyStanding {
	pub id: i64,
	pub party_name: String,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub as_of_date: Option<NaiveDate>,
	pub seat_count: i32,
	pub party_id: Option<i64>,
	pub source_url: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Bill {
	pub id: i64,
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
	pub source_url: String,
	pub source_hash: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Vote {
	pub id: i64,
	pub vote_number: i32,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub vote_date: Option<NaiveDate>,
	pub subject: Option<String>,
	pub decision: Option<String>,
	pub yeas: Option<i32>,
	pub nays: Option<i32>,
	pub paired: Option<i32>,
	pub bill_number: Option<String>,
	pub motion_text: Option<String>,
	pub sitting: Option<i32>,
	pub source_url: Option<String>,
	pub source_hash: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct VoteMember {
	pub id: i64,
	pub vote_id: i64,
	pub representative_id: Option<i64>,
	pub hoc_id: Option<i32>,
	pub member_name: String,
	pub party_name: Option<String>,
	pub riding_name: Option<String>,
	pub position: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Petition {
	pub id: i64,
	pub petition_number: String,
	pub title_en: String,
	pub status: Option<String>,
	pub presentation_date: Option<NaiveDate>,
	pub closing_date: Option<NaiveDate>,
	pub signatures: Option<i32>,
	pub sponsor_hoc_id: Option<i32>,
	pub sponsor_name: Option<String>,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub source_url: Option<String>,
	pub source_hash: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Debate {
	pub id: i64,
	pub parliament: Option<i32>,
	pub session: Option<i32>,
	pub sitting: Option<i32>,
	pub language: String,
	pub debate_date: Option<NaiveDate>,
	pub volume: Option<String>,
	pub number: Option<String>,
	pub speaker_name: Option<String>,
	pub document_url: String,
	pub source_hash: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DebateIntervention {
	pub id: i64,
	pub debate_id: i64,
	pub sequence: i32,
	pub speaker_name: Option<String>,
	pub speaker_affiliation: Option<String>,
	pub floor_language: Option<String>,
	pub timestamp: Option<String>,
	pub order_of_business: Option<String>,
	pub subject_title: Option<String>,
	pub intervention_type: Option<String>,
	pub text: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MemberExpenditure {
	pub id: i64,
	pub representative_id: Option<i64>,
	pub hoc_id: Option<i32>,
	pub member_name: String,
	pub category: String,
	pub amount: Decimal,
	pub period_start: NaiveDate,
	pub period_end: NaiveDate,
	pub fiscal_year: Option<String>,
	pub source_url: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct HouseOfficerExpenditure {
	pub id: i64,
	pub officer_name: String,
	pub role_title: Option<String>,
	pub category: String,
	pub amount: Decimal,
	pub period_start: NaiveDate,
	pub period_end: NaiveDate,
	pub fiscal_year: Option<String>,
	pub source_url: String,
}
