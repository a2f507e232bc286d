//! Order disciplines
//!
//! The discipline decides which element `remove` hands out next and is fixed
//! for the lifetime of a queue.

use crate::queue::error::QueueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::EnumIter;

/// Removal policy of a queue
///
/// Whatever the discipline, the element at the tail of the buffer is always
/// the one the next removal returns. Among equal priorities the oldest element
/// is removed first.
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderDiscipline {
    /// Tail holds the earliest surviving insertion
    Fifo,
    /// Tail holds the latest insertion
    Lifo,
    /// Tail holds the highest priority
    PriorityHigh,
    /// Tail holds the lowest priority
    PriorityLow,
    /// Fifo with a maximum length; inserting into a full queue evicts the oldest element
    FifoLimited,
}

impl OrderDiscipline {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::PriorityHigh => "priority-high",
            Self::PriorityLow => "priority-low",
            Self::FifoLimited => "fifo-limited",
        }
    }

    /// Stable numeric code of the discipline
    pub fn code(&self) -> i64 {
        match self {
            Self::Fifo => 0,
            Self::Lifo => 1,
            Self::PriorityHigh => 2,
            Self::PriorityLow => 3,
            Self::FifoLimited => 4,
        }
    }

    /// Whether the buffer is kept sorted by priority
    pub fn is_priority_ordered(&self) -> bool {
        matches!(self, Self::PriorityHigh | Self::PriorityLow)
    }

    /// True when an element with priority `candidate` must be removed before
    /// one with priority `other`. Only meaningful for priority-ordered disciplines.
    pub(crate) fn removes_before(&self, candidate: f64, other: f64) -> bool {
        let ordering = priority_key(candidate).total_cmp(&priority_key(other));
        match self {
            Self::PriorityHigh => ordering.is_gt(),
            Self::PriorityLow => ordering.is_lt(),
            Self::Fifo | Self::Lifo | Self::FifoLimited => false,
        }
    }
}

/// Comparison key for a priority: `-0.0` folds into `0.0`, NaN keeps its
/// `total_cmp` position
pub(crate) fn priority_key(priority: f64) -> f64 {
    if priority == 0.0 {
        0.0
    } else {
        priority
    }
}

/// Priority equality used for tie detection and priority updates
pub(crate) fn same_priority(a: f64, b: f64) -> bool {
    priority_key(a).total_cmp(&priority_key(b)).is_eq()
}

impl fmt::Display for OrderDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for OrderDiscipline {
    type Error = QueueError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Fifo),
            1 => Ok(Self::Lifo),
            2 => Ok(Self::PriorityHigh),
            3 => Ok(Self::PriorityLow),
            4 => Ok(Self::FifoLimited),
            _ => Err(QueueError::InvalidQueueType {
                value: code.to_string(),
            }),
        }
    }
}

impl FromStr for OrderDiscipline {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "fifo" => Ok(Self::Fifo),
            "lifo" => Ok(Self::Lifo),
            "priority-high" => Ok(Self::PriorityHigh),
            "priority-low" => Ok(Self::PriorityLow),
            "fifo-limited" => Ok(Self::FifoLimited),
            _ => Err(QueueError::InvalidQueueType {
                value: s.to_string(),
            }),
        }
    }
}
