use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a patient is relative to their surgery date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SurgeryPhase {
    PreOperative { days_until: i64 },
    SurgeryDay,
    PostOperative { days_since: i64 },
}

impl SurgeryPhase {
    pub fn on(surgery_date: NaiveDate, today: NaiveDate) -> Self {
        let days = (surgery_date - today).num_days();
        match days {
            d if d > 0 => SurgeryPhase::PreOperative { days_until: d },
            0 => SurgeryPhase::SurgeryDay,
            d => SurgeryPhase::PostOperative { days_since: -d },
        }
    }

    /// Recovery tasks become relevant from surgery day on
    pub fn is_recovering(&self) -> bool {
        !matches!(self, SurgeryPhase::PreOperative { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn test_phases() {
        assert_eq!(
            SurgeryPhase::on(date(20), date(15)),
            SurgeryPhase::PreOperative { days_until: 5 }
        );
        assert_eq!(SurgeryPhase::on(date(15), date(15)), SurgeryPhase::SurgeryDay);
        assert_eq!(
            SurgeryPhase::on(date(1), date(15)),
            SurgeryPhase::PostOperative { days_since: 14 }
        );
        assert!(SurgeryPhase::SurgeryDay.is_recovering());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SurgeryPhase::PreOperative { days_until: 3 }).unwrap();
        assert_eq!(json, r#"{"phase":"pre_operative","days_until":3}"#);
    }
}
