use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A resident-filed work order scoped to a residency. Created by the
/// resident-facing flow; managers only ever move it through the status
/// machine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub residency_id: Uuid,
    pub resident_name: Option<String>,
    pub unit_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn status(&self) -> Option<MaintenanceStatus> {
        MaintenanceStatus::parse(&self.status)
    }
}

/// Closed status enumeration for maintenance requests. Stored as text;
/// every read and write goes through `parse`/`as_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(MaintenanceStatus::Pending),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "completed" => Some(MaintenanceStatus::Completed),
            "cancelled" => Some(MaintenanceStatus::Cancelled),
            _ => None,
        }
    }

    /// Allowed successor states. Terminal states have none; skipping an
    /// intermediate state is never allowed.
    pub fn successors(self) -> &'static [MaintenanceStatus] {
        match self {
            MaintenanceStatus::Pending => {
                &[MaintenanceStatus::InProgress, MaintenanceStatus::Cancelled]
            }
            MaintenanceStatus::InProgress => {
                &[MaintenanceStatus::Completed, MaintenanceStatus::Cancelled]
            }
            MaintenanceStatus::Completed | MaintenanceStatus::Cancelled => &[],
        }
    }

    pub fn allows(self, next: MaintenanceStatus) -> bool {
        self.successors().contains(&next)
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(MaintenanceStatus::parse("pending"), Some(MaintenanceStatus::Pending));
        assert_eq!(
            MaintenanceStatus::parse("in_progress"),
            Some(MaintenanceStatus::InProgress)
        );
        assert_eq!(MaintenanceStatus::parse("done"), None);
        assert_eq!(MaintenanceStatus::parse(""), None);
    }

    #[test]
    fn pending_advances_to_in_progress_or_cancelled() {
        assert!(MaintenanceStatus::Pending.allows(MaintenanceStatus::InProgress));
        assert!(MaintenanceStatus::Pending.allows(MaintenanceStatus::Cancelled));
        assert!(!MaintenanceStatus::Pending.allows(MaintenanceStatus::Completed));
        assert!(!MaintenanceStatus::Pending.allows(MaintenanceStatus::Pending));
    }

    #[test]
    fn in_progress_advances_to_completed_or_cancelled() {
        assert!(MaintenanceStatus::InProgress.allows(MaintenanceStatus::Completed));
        assert!(MaintenanceStatus::InProgress.allows(MaintenanceStatus::Cancelled));
        assert!(!MaintenanceStatus::InProgress.allows(MaintenanceStatus::Pending));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        assert!(MaintenanceStatus::Completed.successors().is_empty());
        assert!(MaintenanceStatus::Cancelled.successors().is_empty());
    }
}
