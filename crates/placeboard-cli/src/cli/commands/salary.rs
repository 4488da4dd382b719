//! `placeboard salary show|apply`.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use placeboard_core::api::ApiClient;
use placeboard_core::apply::{self, ApplyOutcome, ApplyRequest};
use placeboard_core::card::{CardTable, Field, SalaryCard};
use placeboard_core::config::Config;
use placeboard_types::SeasonType;

use super::table;

pub async fn show(
    config: &Config,
    salary_id: &str,
    season_type: SeasonType,
    details: bool,
) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let salary = client
        .salary(salary_id)
        .await
        .with_context(|| format!("load salary {salary_id}"))?;
    let card = SalaryCard::build(&salary, season_type);
    print!("{}", render(&card, details));
    Ok(())
}

pub async fn apply(config: &Config, salary_id: &str, resume: Option<&str>) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let resumes = if resume.is_some() {
        client.resumes().await.context("list resumes")?
    } else {
        Vec::new()
    };

    let outcome = apply::submit(
        &client,
        ApplyRequest {
            salary_id,
            selected_resume: resume,
            resumes: &resumes,
        },
    )
    .await?;

    println!("{}", ApplyOutcome::MESSAGE);
    if let Some(salary) = outcome.salary {
        println!(
            "{}: {} application(s) on record",
            salary.job.company.name,
            salary.job.applications.len()
        );
    }
    Ok(())
}

pub(crate) fn render(card: &SalaryCard, details: bool) -> String {
    let mut out = String::new();
    let title = if card.company.is_empty() {
        card.salary_id.clone()
    } else {
        card.company.clone()
    };
    if card.applied {
        let _ = writeln!(out, "{title}  [Applied]");
    } else {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "{}", card.headline);
    push_fields(&mut out, &card.primary);

    if !details {
        return out;
    }

    for group in &card.compensation_groups {
        let _ = writeln!(out);
        push_fields(&mut out, group);
    }
    let _ = writeln!(out);
    push_fields(&mut out, &card.selection);
    let _ = writeln!(out, "\nSelection Procedure");
    push_table(&mut out, &card.tests);
    push_table(&mut out, &card.interviews);
    push_table(&mut out, &card.events);
    push_table(&mut out, &card.applications_table());
    out
}

fn push_fields(out: &mut String, fields: &[Field]) {
    let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
    for f in fields {
        let _ = writeln!(out, "  {:<width$}  {}", f.label, f.value);
    }
}

fn push_table(out: &mut String, card_table: &CardTable) {
    if card_table.rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", card_table.title);
    let _ = writeln!(
        out,
        "{}",
        table(card_table.headers, card_table.rows.iter().cloned())
    );
}

#[cfg(test)]
mod tests {
    use placeboard_types::{Application, ApplicationResume, Company, Job, Salary};

    use super::*;

    fn salary(applied: bool) -> Salary {
        Salary {
            id: "sal-1".to_string(),
            total_ctc: Some(2_400_000.0),
            job: Job {
                role: "SDE".to_string(),
                company: Company {
                    name: "Acme".to_string(),
                },
                applications: if applied {
                    vec![Application {
                        id: "a1".to_string(),
                        resume: ApplicationResume {
                            id: "r1".to_string(),
                            filepath: "u1/cv.pdf".to_string(),
                            verified: true,
                        },
                    }]
                } else {
                    Vec::new()
                },
                ..Job::default()
            },
            ..Salary::default()
        }
    }

    #[test]
    fn test_summary_shows_headline_and_applied_badge() {
        let card = SalaryCard::build(&salary(true), SeasonType::Placement);
        let out = render(&card, false);
        assert!(out.starts_with("Acme  [Applied]"));
        assert!(out.contains("CTC Offered: ₹24.00 Lakhs"));
        assert!(!out.contains("Selection Procedure"));
    }

    #[test]
    fn test_details_include_applications() {
        let card = SalaryCard::build(&salary(true), SeasonType::Placement);
        let out = render(&card, true);
        assert!(out.contains("Selection Procedure"));
        assert!(out.contains("u1/cv.pdf"));
        assert!(out.contains("Verified"));
    }
}
