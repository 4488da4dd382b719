use serde::{Deserialize, Serialize};

use crate::de::{null_as_default, string_or_number};

/// One job-offer compensation record, linked to its job.
///
/// Every compensation field is optional: placement offers fill the CTC
/// breakdown, intern offers fill the stipend/PPO fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: String,
    #[serde(default, rename = "totalCTC")]
    pub total_ctc: Option<f64>,
    #[serde(default)]
    pub stipend: Option<f64>,
    #[serde(default)]
    pub base_salary: Option<f64>,
    #[serde(default)]
    pub take_home_salary: Option<f64>,
    #[serde(default)]
    pub gross_salary: Option<f64>,
    #[serde(default)]
    pub other_compensations: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub salary_period: Option<String>,
    #[serde(default)]
    pub joining_bonus: Option<f64>,
    #[serde(default)]
    pub performance_bonus: Option<f64>,
    #[serde(default)]
    pub relocation: Option<f64>,
    #[serde(default)]
    pub bond_amount: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub bond_duration: Option<String>,
    #[serde(default)]
    pub esop_amount: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub esop_vest_period: Option<String>,
    #[serde(default, rename = "firstYearCTC")]
    pub first_year_ctc: Option<f64>,
    #[serde(default)]
    pub retention_bonus: Option<f64>,
    #[serde(default)]
    pub deductions: Option<f64>,
    #[serde(default)]
    pub medical_allowance: Option<f64>,
    #[serde(default, rename = "foreignCurrencyCTC")]
    pub foreign_currency_ctc: Option<f64>,
    #[serde(default)]
    pub foreign_currency_code: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub foreign_currency_stipend: Option<String>,
    #[serde(default)]
    pub accommodation: Option<bool>,
    #[serde(default)]
    pub ppo_provision_on_performance: Option<bool>,
    #[serde(default, rename = "tentativeCTC")]
    pub tentative_ctc: Option<f64>,
    #[serde(default, rename = "PPOConfirmationDate")]
    pub ppo_confirmation_date: Option<String>,
    pub job: Job,
}

impl Salary {
    /// Returns true once the student has at least one application for this job.
    pub fn has_applied(&self) -> bool {
        !self.job.applications.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selection_procedure: SelectionProcedure,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<JobEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionProcedure {
    #[serde(default, deserialize_with = "null_as_default")]
    pub selection_mode: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shortlist_from_resume: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_discussion: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: Vec<SelectionRound>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interviews: Vec<SelectionRound>,
}

/// A test or interview round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRound {
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEvent {
    #[serde(default, deserialize_with = "string_or_number")]
    pub round_number: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub start_date_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume: ApplicationResume,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResume {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filepath: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "sal-1",
        "totalCTC": 2400000,
        "baseSalary": 1800000,
        "salaryPeriod": 12,
        "PPOConfirmationDate": "2025-01-05T15:04:05Z",
        "job": {
            "id": "job-7",
            "role": "SDE",
            "company": { "name": "Acme" },
            "selectionProcedure": {
                "selectionMode": "ONLINE",
                "shortlistFromResume": true,
                "groupDiscussion": false,
                "tests": [{ "type": "APTITUDE", "duration": "60" }],
                "interviews": [{ "type": "TECHNICAL", "duration": 45 }]
            },
            "events": [{ "roundNumber": 1, "type": "TEST", "startDateTime": "2025-01-05T15:04:05Z" }],
            "applications": []
        }
    }"#;

    #[test]
    fn test_salary_deserializes_backend_field_names() {
        let salary: Salary = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(salary.total_ctc, Some(2_400_000.0));
        assert_eq!(salary.base_salary, Some(1_800_000.0));
        assert_eq!(salary.salary_period.as_deref(), Some("12"));
        assert_eq!(
            salary.ppo_confirmation_date.as_deref(),
            Some("2025-01-05T15:04:05Z")
        );
        assert_eq!(salary.job.company.name, "Acme");
        assert!(salary.job.selection_procedure.shortlist_from_resume);
        assert_eq!(
            salary.job.selection_procedure.interviews[0].duration.as_deref(),
            Some("45")
        );
        assert_eq!(salary.job.events[0].round_number.as_deref(), Some("1"));
        assert!(!salary.has_applied());
    }

    #[test]
    fn test_explicit_nulls_decode_as_empty() {
        let salary: Salary = serde_json::from_str(
            r#"{
                "id": "s",
                "totalCTC": null,
                "job": {
                    "id": null,
                    "role": null,
                    "company": { "name": null },
                    "selectionProcedure": {
                        "selectionMode": null,
                        "shortlistFromResume": null,
                        "groupDiscussion": null,
                        "tests": null,
                        "interviews": [{ "type": null, "duration": null }]
                    },
                    "events": [{ "roundNumber": null, "type": null, "startDateTime": null }],
                    "applications": [{ "id": null, "resume": { "id": null, "filepath": null, "verified": null } }]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(salary.total_ctc, None);
        assert_eq!(salary.job.role, "");
        assert_eq!(salary.job.company.name, "");
        let procedure = &salary.job.selection_procedure;
        assert_eq!(procedure.selection_mode, "");
        assert!(!procedure.shortlist_from_resume);
        assert!(!procedure.group_discussion);
        assert!(procedure.tests.is_empty());
        assert_eq!(procedure.interviews[0].kind, "");
        assert_eq!(salary.job.events[0].kind, "");
        let resume = &salary.job.applications[0].resume;
        assert_eq!(resume.filepath, "");
        assert!(!resume.verified);
    }

    #[test]
    fn test_null_company_and_procedure_default() {
        let salary: Salary = serde_json::from_str(
            r#"{"id":"s","job":{"role":"SDE","company":null,"selectionProcedure":null,"events":null,"applications":null}}"#,
        )
        .unwrap();
        assert_eq!(salary.job.company, Company::default());
        assert_eq!(salary.job.selection_procedure, SelectionProcedure::default());
        assert!(!salary.has_applied());
    }

    #[test]
    fn test_missing_optional_fields_are_none() {
        let salary: Salary =
            serde_json::from_str(r#"{"id":"s","job":{"role":"Intern"}}"#).unwrap();
        assert_eq!(salary.stipend, None);
        assert_eq!(salary.foreign_currency_stipend, None);
        assert!(salary.job.events.is_empty());
    }
}
