use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Informational content package for a residency, one per residency. The
/// version counter is bumped on every item write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResidencyTemplate {
    pub id: Uuid,
    pub residency_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateItem {
    pub id: Uuid,
    pub template_id: Uuid,
    pub category: String,
    pub label: String,
    pub content: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of template item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateCategory {
    Utilities,
    EmergencyContacts,
    Rules,
    Amenities,
    Security,
    GeneralInfo,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 6] = [
        TemplateCategory::Utilities,
        TemplateCategory::EmergencyContacts,
        TemplateCategory::Rules,
        TemplateCategory::Amenities,
        TemplateCategory::Security,
        TemplateCategory::GeneralInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateCategory::Utilities => "Utilities",
            TemplateCategory::EmergencyContacts => "Emergency Contacts",
            TemplateCategory::Rules => "Rules",
            TemplateCategory::Amenities => "Amenities",
            TemplateCategory::Security => "Security",
            TemplateCategory::GeneralInfo => "General Info",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_round_trip_through_parse() {
        for category in TemplateCategory::ALL {
            assert_eq!(TemplateCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert_eq!(TemplateCategory::parse("Parking"), None);
        assert_eq!(TemplateCategory::parse("utilities"), None);
    }
}
