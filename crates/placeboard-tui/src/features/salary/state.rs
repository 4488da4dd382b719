use placeboard_core::card::SalaryCard;
use placeboard_types::{Resume, Salary, SeasonType};

use crate::state::Load;

#[derive(Debug, Clone)]
pub struct SalaryState {
    pub salary_id: String,
    pub season_type: SeasonType,
    pub salary: Load<Salary>,
    pub resumes: Load<Vec<Resume>>,
    pub selected_resume: Option<String>,
    /// Details sections shown.
    pub expanded: bool,
    pub scroll: u16,
}

impl SalaryState {
    pub fn new(salary_id: String, season_type: SeasonType) -> Self {
        Self {
            salary_id,
            season_type,
            salary: Load::Idle,
            resumes: Load::Idle,
            selected_resume: None,
            expanded: false,
            scroll: 0,
        }
    }

    /// Card view model, rebuilt from the fetched record.
    pub fn card(&self) -> Option<SalaryCard> {
        self.salary
            .loaded()
            .map(|salary| SalaryCard::build(salary, self.season_type))
    }

    pub fn resume_list(&self) -> &[Resume] {
        self.resumes.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn selected_resume(&self) -> Option<&Resume> {
        let id = self.selected_resume.as_deref()?;
        self.resume_list().iter().find(|r| r.id == id)
    }

    /// File to open: the selected resume, else the latest application's.
    pub fn resume_to_open(&self) -> Option<String> {
        if let Some(resume) = self.selected_resume() {
            return Some(resume.filepath.clone());
        }
        self.salary
            .loaded()
            .and_then(|s| s.job.applications.last())
            .map(|a| a.resume.filepath.clone())
            .filter(|p| !p.is_empty())
    }
}
