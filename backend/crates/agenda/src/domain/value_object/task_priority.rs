use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use TaskPriority::*;
        match self {
            Low => "LOW",
            Medium => "MEDIUM",
            High => "HIGH",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use TaskPriority::*;
        match code {
            "LOW" => Some(Low),
            "MEDIUM" => Some(Medium),
            "HIGH" => Some(High),
            _ => None,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
