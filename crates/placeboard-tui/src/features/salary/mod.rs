//! Salary/job card with resume selection and apply.

mod render;
mod state;

pub use render::render_salary;
pub use state::SalaryState;
