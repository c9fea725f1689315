use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status
///
/// Wire codes are the historical ones and are kept verbatim, including
/// the Spanish `ANALISIS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Analysis,
    InProgress,
    Completed,
}

impl TaskStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use TaskStatus::*;
        match self {
            Analysis => "ANALISIS",
            InProgress => "IN_PROGRESS",
            Completed => "COMPLETED",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use TaskStatus::*;
        match code {
            "ANALISIS" => Some(Analysis),
            "IN_PROGRESS" => Some(InProgress),
            "COMPLETED" => Some(Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
