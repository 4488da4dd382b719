//! View model for the salary/job card.
//!
//! Built by value from a [`Salary`] each time it is shown; nothing here is
//! cached between renders.

use std::fmt::Display;

use chrono::TimeZone;
use placeboard_types::{Salary, SeasonType, SelectionRound};

use crate::format::{
    format_amount, format_date_with, format_optional_amount, yes_no, yes_no_upper,
};

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

fn field(label: &'static str, value: impl Into<String>) -> Field {
    Field {
        label,
        value: value.into(),
    }
}

/// A simple table: header plus string rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTable {
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

/// A prior application, with the file path kept for opening the resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRow {
    pub filepath: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryCard {
    pub salary_id: String,
    pub season_type: SeasonType,
    pub company: String,
    pub applied: bool,
    /// "CTC Offered: ..." or "Stipend: ..."
    pub headline: String,
    pub primary: Vec<Field>,
    /// Placement-only compensation breakdown, one group per row of the card.
    pub compensation_groups: Vec<Vec<Field>>,
    pub selection: Vec<Field>,
    pub tests: CardTable,
    pub interviews: CardTable,
    pub events: CardTable,
    pub applications: Vec<ApplicationRow>,
}

impl SalaryCard {
    /// Builds the card with event dates in the local timezone.
    pub fn build(salary: &Salary, season_type: SeasonType) -> Self {
        Self::build_in(salary, season_type, &chrono::Local)
    }

    pub fn build_in<Tz>(salary: &Salary, season_type: SeasonType, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let headline = if season_type.is_placement() {
            format!("CTC Offered: {}", headline_amount(salary, season_type))
        } else {
            format!("Stipend: {}", headline_amount(salary, season_type))
        };

        let primary = if season_type.is_placement() {
            placement_fields(salary)
        } else {
            intern_fields(salary, tz)
        };

        let compensation_groups = if season_type.is_placement() {
            compensation_groups(salary)
        } else {
            Vec::new()
        };

        let procedure = &salary.job.selection_procedure;
        let selection = vec![
            field("Selection mode", procedure.selection_mode.clone()),
            field(
                "Shortlist from Resume",
                yes_no_upper(procedure.shortlist_from_resume),
            ),
            field("Group Discussion", yes_no_upper(procedure.group_discussion)),
        ];

        let round_rows = |rounds: &[SelectionRound]| -> Vec<Vec<String>> {
            rounds
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    vec![
                        (i + 1).to_string(),
                        r.kind.clone(),
                        r.duration.clone().unwrap_or_default(),
                    ]
                })
                .collect()
        };

        let events: Vec<Vec<String>> = salary
            .job
            .events
            .iter()
            .map(|e| {
                vec![
                    e.round_number.clone().unwrap_or_default(),
                    e.kind.clone(),
                    e.start_date_time
                        .as_deref()
                        .map(|d| format_date_with(d, tz))
                        .unwrap_or_default(),
                ]
            })
            .collect();

        Self {
            salary_id: salary.id.clone(),
            season_type,
            company: salary.job.company.name.clone(),
            applied: salary.has_applied(),
            headline,
            primary,
            compensation_groups,
            selection,
            tests: CardTable {
                title: "Tests",
                headers: &["Sr.", "Type", "Duration"],
                rows: round_rows(&procedure.tests),
            },
            interviews: CardTable {
                title: "Interviews",
                headers: &["Sr.", "Type", "Duration"],
                rows: round_rows(&procedure.interviews),
            },
            events: CardTable {
                title: "Events",
                headers: &["Round", "Type", "Date"],
                rows: events,
            },
            applications: salary
                .job
                .applications
                .iter()
                .map(|a| ApplicationRow {
                    filepath: a.resume.filepath.clone(),
                    verified: a.resume.verified,
                })
                .collect(),
        }
    }

    /// Prior applications as a table (Sr., Resume, Status).
    pub fn applications_table(&self) -> CardTable {
        CardTable {
            title: "Applications",
            headers: &["Sr.", "Resume", "Status"],
            rows: self
                .applications
                .iter()
                .enumerate()
                .map(|(i, a)| {
                    vec![
                        (i + 1).to_string(),
                        a.filepath.clone(),
                        verified_label(a.verified).to_string(),
                    ]
                })
                .collect(),
        }
    }
}

pub fn verified_label(verified: bool) -> &'static str {
    if verified { "Verified" } else { "Not Verified" }
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn placement_fields(salary: &Salary) -> Vec<Field> {
    vec![
        field("Role", salary.job.role.clone()),
        field("Base Salary", format_optional_amount(salary.base_salary)),
        field(
            "Take Home Salary",
            format_optional_amount(salary.take_home_salary),
        ),
        field("Gross Salary", format_optional_amount(salary.gross_salary)),
        field(
            "Other Compensations",
            format_optional_amount(salary.other_compensations),
        ),
        field("Duration", text(salary.salary_period.as_ref())),
    ]
}

fn intern_fields<Tz>(salary: &Salary, tz: &Tz) -> Vec<Field>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    vec![
        field("Role", salary.job.role.clone()),
        field(
            "Foreign Currency Stipend",
            text(salary.foreign_currency_stipend.as_ref()),
        ),
        field(
            "Accommodation",
            yes_no(salary.accommodation.unwrap_or(false)),
        ),
        field(
            "PPO Provision",
            yes_no(salary.ppo_provision_on_performance.unwrap_or(false)),
        ),
        field(
            "Tentative CTC for PPO Select",
            format_optional_amount(salary.tentative_ctc),
        ),
        field(
            "PPO Confirmation Date",
            salary
                .ppo_confirmation_date
                .as_deref()
                .map(|d| format_date_with(d, tz))
                .unwrap_or_default(),
        ),
        field("Duration", text(salary.salary_period.as_ref())),
    ]
}

fn compensation_groups(salary: &Salary) -> Vec<Vec<Field>> {
    let amount = format_optional_amount;
    let foreign_ctc = format!(
        "{} {}",
        salary
            .foreign_currency_ctc
            .filter(|n| *n != 0.0)
            .map(|n| n.to_string())
            .unwrap_or_default(),
        salary.foreign_currency_code.clone().unwrap_or_default()
    )
    .trim()
    .to_string();

    vec![
        vec![
            field("Joining Bonus", amount(salary.joining_bonus)),
            field("Performance Bonus", amount(salary.performance_bonus)),
            field("Relocation", amount(salary.relocation)),
            field("Bond Amount", amount(salary.bond_amount)),
        ],
        vec![
            field("ESOP Amount", amount(salary.esop_amount)),
            field("ESOP Vest Period", text(salary.esop_vest_period.as_ref())),
            field("First Year CTC", amount(salary.first_year_ctc)),
            field("Retention Bonus", amount(salary.retention_bonus)),
        ],
        vec![
            field("Deductions", amount(salary.deductions)),
            field("Medical Allowance", amount(salary.medical_allowance)),
            field("Bond Duration", text(salary.bond_duration.as_ref())),
            field("Foreign Currency CTC", foreign_ctc),
        ],
    ]
}

/// Headline amount without the label. A present zero renders as "₹0";
/// only an absent value is blank.
pub fn headline_amount(salary: &Salary, season_type: SeasonType) -> String {
    let value = if season_type.is_placement() {
        salary.total_ctc
    } else {
        salary.stipend
    };
    value.map(format_amount).unwrap_or_default()
}
