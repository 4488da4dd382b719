//! Job application flow.
//!
//! Client-side checks run before any request: a resume must be selected and
//! must be one of the student's resumes.

use std::fmt;

use placeboard_types::{Resume, Salary};
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub enum ApplyError {
    NoResumeSelected,
    ResumeNotFound,
    /// The backend answered without acknowledging the application.
    Rejected,
    NotAuthorized(ApiError),
    Failed(ApiError),
}

impl ApplyError {
    /// Message shown to the student.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApplyError::NoResumeSelected => "Please select a resume",
            ApplyError::ResumeNotFound => "Selected resume not found",
            ApplyError::Rejected => "Cannot Apply",
            ApplyError::NotAuthorized(_) => {
                "You are not authorized to apply for this position. Please check if you meet the eligibility criteria."
            }
            ApplyError::Failed(_) => "Failed to apply. Please try again or contact support.",
        }
    }

    fn from_api(err: ApiError) -> Self {
        if err.is_unauthorized() {
            ApplyError::NotAuthorized(err)
        } else {
            ApplyError::Failed(err)
        }
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplyError::NotAuthorized(e) | ApplyError::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// What the student picked on the card.
#[derive(Debug, Clone, Copy)]
pub struct ApplyRequest<'a> {
    pub salary_id: &'a str,
    pub selected_resume: Option<&'a str>,
    /// The student's resumes, as listed by the backend.
    pub resumes: &'a [Resume],
}

impl ApplyRequest<'_> {
    /// Resolves the selected resume without touching the network.
    ///
    /// # Errors
    /// `NoResumeSelected` or `ResumeNotFound`.
    pub fn validate(&self) -> Result<&Resume, ApplyError> {
        let selected = self
            .selected_resume
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ApplyError::NoResumeSelected)?;
        self.resumes
            .iter()
            .find(|r| r.id == selected)
            .ok_or(ApplyError::ResumeNotFound)
    }
}

#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// Refetched record; `None` if the refetch itself failed.
    pub salary: Option<Salary>,
}

impl ApplyOutcome {
    pub const MESSAGE: &str = "Applied Successfully";
}

/// Validates, posts the application, and refetches the salary on success.
///
/// # Errors
/// See [`ApplyError`]; validation failures never reach the backend.
pub async fn submit(
    client: &ApiClient,
    request: ApplyRequest<'_>,
) -> Result<ApplyOutcome, ApplyError> {
    let resume = request.validate()?;

    let acknowledged = client
        .apply(request.salary_id, &resume.id)
        .await
        .map_err(ApplyError::from_api)?;
    if !acknowledged {
        warn!(salary_id = request.salary_id, "Application not acknowledged");
        return Err(ApplyError::Rejected);
    }
    info!(
        salary_id = request.salary_id,
        resume_id = %resume.id,
        "Application submitted"
    );

    let salary = match client.salary(request.salary_id).await {
        Ok(salary) => Some(salary),
        Err(e) => {
            warn!(salary_id = request.salary_id, error = %e, "Refetch after apply failed");
            None
        }
    };
    Ok(ApplyOutcome { salary })
}
