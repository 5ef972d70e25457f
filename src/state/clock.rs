/// Time-of-day cycle. Day rollover behavior lives on the aggregate, which
/// owns the condition meters the rollover deteriorates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// The fixed cycle: dawn → day → dusk → night → dawn.
    pub fn next(self) -> TimeOfDay {
        match self {
            TimeOfDay::Dawn => TimeOfDay::Day,
            TimeOfDay::Day => TimeOfDay::Dusk,
            TimeOfDay::Dusk => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Dawn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps() {
        let mut t = TimeOfDay::Dawn;
        let seen: Vec<TimeOfDay> = (0..4)
            .map(|_| {
                t = t.next();
                t
            })
            .collect();
        assert_eq!(
            seen,
            vec![
                TimeOfDay::Day,
                TimeOfDay::Dusk,
                TimeOfDay::Night,
                TimeOfDay::Dawn
            ]
        );
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&TimeOfDay::Dusk).unwrap();
        assert_eq!(json, "\"dusk\"");
        let back: TimeOfDay = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(back, TimeOfDay::Night);
    }
}
