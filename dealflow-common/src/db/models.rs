//! Database models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A property record as stored in the `properties` table
///
/// Properties are never hard-deleted by API flows; delete requests map to
/// a status change so analysis history stays resolvable.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<f64>,
    pub lot_size: Option<f64>,
    pub year_built: Option<i64>,
    pub garage_spaces: Option<i64>,
    pub listing_price: Option<f64>,
    pub sale_price: Option<f64>,
    /// ISO-8601 date of the most recent sale, when known
    pub sale_date: Option<String>,
    /// ISO-8601 date the property was listed, when known
    pub listed_date: Option<String>,
    pub assessed_value: Option<f64>,
    pub tax_amount: Option<f64>,
    /// Condition score in [0,1]; 1.0 is move-in ready
    pub condition_score: Option<f64>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Property record lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Active,
    UnderContract,
    Sold,
    Inactive,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "active",
            PropertyStatus::UnderContract => "under_contract",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PropertyStatus::Active),
            "under_contract" => Ok(PropertyStatus::UnderContract),
            "sold" => Ok(PropertyStatus::Sold),
            "inactive" => Ok(PropertyStatus::Inactive),
            other => Err(format!("Unknown property status: {}", other)),
        }
    }
}

/// A lead record as stored in the `leads` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: String,
    pub property_id: Option<String>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub status: String,
    pub lead_score: Option<i64>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Lead lifecycle status
///
/// Transitions are driven by manual status changes and campaign activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    Qualified,
    UnderContract,
    Closed,
    NotInterested,
    DoNotContact,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Interested => "interested",
            LeadStatus::Qualified => "qualified",
            LeadStatus::UnderContract => "under_contract",
            LeadStatus::Closed => "closed",
            LeadStatus::NotInterested => "not_interested",
            LeadStatus::DoNotContact => "do_not_contact",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "interested" => Ok(LeadStatus::Interested),
            "qualified" => Ok(LeadStatus::Qualified),
            "under_contract" => Ok(LeadStatus::UnderContract),
            "closed" => Ok(LeadStatus::Closed),
            "not_interested" => Ok(LeadStatus::NotInterested),
            "do_not_contact" => Ok(LeadStatus::DoNotContact),
            other => Err(format!("Unknown lead status: {}", other)),
        }
    }
}

/// An outreach campaign as stored in the `campaigns` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub campaign_type: String,
    pub status: String,
    pub target_criteria: Option<String>,
    pub message_template: Option<String>,
    pub sent_count: i64,
    pub response_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            other => Err(format!("Unknown campaign status: {}", other)),
        }
    }
}

/// A logged communication with a lead
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Communication {
    pub id: String,
    pub lead_id: String,
    /// "inbound" or "outbound"
    pub direction: String,
    /// "call", "sms", "email", or "mail"
    pub channel: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub outcome: Option<String>,
    pub occurred_at: String,
}

/// A scheduled appointment with a lead
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: String,
    pub lead_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub scheduled_at: String,
    pub duration_minutes: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            other => Err(format!("Unknown appointment status: {}", other)),
        }
    }
}

/// A persisted valuation run against a property
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalysisRecord {
    pub id: String,
    pub property_id: String,
    pub estimated_value: f64,
    pub confidence_score: f64,
    pub comp_count: i64,
    /// Strategy metrics JSON, when a strategy run was attached
    pub strategy: Option<String>,
    pub created_at: String,
}

/// A settings table row (key-value store)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
}
