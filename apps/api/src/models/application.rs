use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeardAboutUs {
    Linkedin,
    FriendReferral,
    EmployeeReferral,
    OtherSocial,
    GoogleSearch,
    Other,
}

impl HeardAboutUs {
    pub const ALL: [HeardAboutUs; 6] = [
        HeardAboutUs::Linkedin,
        HeardAboutUs::FriendReferral,
        HeardAboutUs::EmployeeReferral,
        HeardAboutUs::OtherSocial,
        HeardAboutUs::GoogleSearch,
        HeardAboutUs::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeardAboutUs::Linkedin => "linkedin",
            HeardAboutUs::FriendReferral => "friend_referral",
            HeardAboutUs::EmployeeReferral => "employee_referral",
            HeardAboutUs::OtherSocial => "other_social",
            HeardAboutUs::GoogleSearch => "google_search",
            HeardAboutUs::Other => "other",
        }
    }

    /// Human-readable label shown in the wizard select and the admin detail panel.
    pub fn label(&self) -> &'static str {
        match self {
            HeardAboutUs::Linkedin => "LinkedIn",
            HeardAboutUs::FriendReferral => "Friend referral",
            HeardAboutUs::EmployeeReferral => "Referral by one of our employees",
            HeardAboutUs::OtherSocial => "Other social platform",
            HeardAboutUs::GoogleSearch => "Google search",
            HeardAboutUs::Other => "Other",
        }
    }
}

impl FromStr for HeardAboutUs {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeardAboutUs::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Badge color classes keyed by status.
    pub fn badge_class(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "bg-yellow-100 text-yellow-800",
            ApplicationStatus::Reviewed => "bg-blue-100 text-blue-800",
            ApplicationStatus::Approved => "bg-green-100 text-green-800",
            ApplicationStatus::Rejected => "bg-red-100 text-red-800",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

/// Everything an applicant submits. The store adds id, submission time and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub heard_about_us: HeardAboutUs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heard_about_us_other: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<String>,
    pub motivation: String,
    pub proud_project: String,
    pub dream_project: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

/// A persisted application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: NewApplication,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub heard_about_us: String,
    pub heard_about_us_other: Option<String>,
    pub cv_url: Option<String>,
    pub cv_file_name: Option<String>,
    pub motivation: String,
    pub proud_project: String,
    pub dream_project: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = UnknownVariant;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            id: row.id,
            details: NewApplication {
                name: row.name,
                email: row.email,
                phone: row.phone,
                country: row.country,
                heard_about_us: row.heard_about_us.parse()?,
                heard_about_us_other: row.heard_about_us_other,
                cv_url: row.cv_url,
                cv_file_name: row.cv_file_name,
                motivation: row.motivation,
                proud_project: row.proud_project,
                dream_project: row.dream_project,
                technologies: row.technologies,
                github_url: row.github_url,
                linkedin_url: row.linkedin_url,
                portfolio_url: row.portfolio_url,
            },
            submitted_at: row.submitted_at,
            status: row.status.parse()?,
        })
    }
}

/// Removes blank entries and duplicates while keeping first-seen order.
pub fn normalize_technologies(technologies: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(technologies.len());
    for tech in technologies {
        let tech = tech.trim().to_string();
        if !tech.is_empty() && !seen.contains(&tech) {
            seen.push(tech);
        }
    }
    seen
}
