use std::fmt;

/// Rank in the waitlist. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueuePosition(pub u64);

impl QueuePosition {
    /// Parses a string made only of ASCII decimal digits.
    pub fn from_digits(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok().map(QueuePosition)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueuePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionChange {
    FirstReading {
        current: QueuePosition,
    },
    Unchanged {
        current: QueuePosition,
    },
    Decreased {
        previous: QueuePosition,
        current: QueuePosition,
    },
    Increased {
        previous: QueuePosition,
        current: QueuePosition,
    },
}

impl PositionChange {
    pub fn classify(previous: Option<QueuePosition>, current: QueuePosition) -> Self {
        match previous {
            None => PositionChange::FirstReading { current },
            Some(previous) if current == previous => PositionChange::Unchanged { current },
            Some(previous) if current < previous => PositionChange::Decreased { previous, current },
            Some(previous) => PositionChange::Increased { previous, current },
        }
    }

    pub fn current(&self) -> QueuePosition {
        match *self {
            PositionChange::FirstReading { current }
            | PositionChange::Unchanged { current }
            | PositionChange::Decreased { current, .. }
            | PositionChange::Increased { current, .. } => current,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PositionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionChange::FirstReading { current } => {
                write!(f, "First reading: position {}", current)
            }
            PositionChange::Unchanged { current } => {
                write!(f, "No change: position remains {}", current)
            }
            PositionChange::Decreased { previous, current } => {
                write!(f, "Decreased from {} to {}", previous, current)
            }
            PositionChange::Increased { previous, current } => {
                write!(f, "Increased from {} to {}", previous, current)
            }
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub previous: Option<QueuePosition>,
    pub current: QueuePosition,
    pub change: PositionChange,
    pub message: String,
}
