//! Consultation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Consultation entity: a coaching call scheduled by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Owning user ID
    pub user_id: i64,
    /// When the consultation takes place
    pub scheduled_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: ConsultationStatus,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Lifecycle status of a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationStatus::Scheduled => write!(f, "scheduled"),
            ConsultationStatus::Completed => write!(f, "completed"),
            ConsultationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for ConsultationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ConsultationStatus::Scheduled),
            "completed" => Ok(ConsultationStatus::Completed),
            "cancelled" => Ok(ConsultationStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid consultation status: {}", s)),
        }
    }
}

/// Input for creating a consultation. The owner id comes from the
/// authenticated session, never from the request body.
#[derive(Debug, Clone)]
pub struct NewConsultation {
    pub user_id: i64,
    pub scheduled_date: DateTime<Utc>,
    pub status: ConsultationStatus,
    pub notes: Option<String>,
}
