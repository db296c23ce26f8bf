//! Progress status with severity ordering.

use serde::{Deserialize, Serialize};

/// Status of a batch or of one item within it.
///
/// Ordered by severity, `Failed > Cancelled > InProgress > Success`, so a
/// batch terminal status is the maximum over its per-item statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressStatus {
    InProgress,
    Success,
    Failed,
    Cancelled,
}

impl ProgressStatus {
    /// Severity rank used for aggregation.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::InProgress => 1,
            Self::Cancelled => 2,
            Self::Failed => 3,
        }
    }

    /// Whether this status is terminal for a batch.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// The worse of two statuses.
    pub fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl Ord for ProgressStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for ProgressStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Success => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}
