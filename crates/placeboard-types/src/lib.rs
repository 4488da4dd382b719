//! Records mirrored from the placement backend.
//!
//! These are plain serde types. They carry no invariants beyond their shape;
//! validation and shaping live in `placeboard-core`.

mod de;
pub mod resume;
pub mod salary;
pub mod season;
pub mod stats;

pub use resume::Resume;
pub use salary::{
    Application, ApplicationResume, Company, Job, JobEvent, Salary, SelectionProcedure,
    SelectionRound,
};
pub use season::{SeasonList, SeasonSummary, SeasonType};
pub use stats::{Dimension, SeasonData, StatBucket};
