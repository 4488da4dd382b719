use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// A resume uploaded by the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filepath: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
}

impl Resume {
    /// Picker label; verified resumes carry a check mark.
    pub fn label(&self) -> String {
        if self.verified {
            format!("{} ✓", self.name)
        } else {
            self.name.clone()
        }
    }
}
