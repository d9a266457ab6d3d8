use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_STATUS: &str = "Applied";

fn default_status() -> Option<String> {
    Some(DEFAULT_STATUS.to_string())
}

/// Create / full-replace payload for an application.
/// An omitted `status` becomes "Applied"; an explicit `null` is kept as NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub job_link: Option<String>,
    #[serde(default = "default_status")]
    pub status: Option<String>,
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub job_link: Option<String>,
    pub status: Option<String>,
    pub applied_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl ApplicationRow {
    pub fn from_input(id: i64, input: ApplicationInput) -> Self {
        Self {
            id,
            company: input.company,
            position: input.position,
            job_link: input.job_link,
            status: input.status,
            applied_date: input.applied_date,
            notes: input.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_status_defaults_to_applied() {
        let input: ApplicationInput =
            serde_json::from_str(r#"{"company": "Acme", "position": "Engineer"}"#).unwrap();
        assert_eq!(input.status.as_deref(), Some("Applied"));
        assert!(input.job_link.is_none());
        assert!(input.applied_date.is_none());
    }

    #[test]
    fn test_explicit_null_status_is_kept() {
        let input: ApplicationInput = serde_json::from_str(
            r#"{"company": "Acme", "position": "Engineer", "status": null}"#,
        )
        .unwrap();
        assert!(input.status.is_none());
    }

    #[test]
    fn test_applied_date_parses_iso_date() {
        let input: ApplicationInput = serde_json::from_str(
            r#"{"company": "Acme", "position": "Engineer", "applied_date": "2024-03-15"}"#,
        )
        .unwrap();
        assert_eq!(
            input.applied_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_company_is_required() {
        let result = serde_json::from_str::<ApplicationInput>(r#"{"position": "Engineer"}"#);
        assert!(result.is_err());
    }
}
