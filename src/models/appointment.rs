use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Selection held by the slot picker until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub provider_id: String,
    pub date: NaiveDate,
    pub hour: u32,
}

impl BookingDraft {
    /// Wall-clock start of the booked hour; `None` when the hour is out of range.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.date.and_hms_opt(self.hour, 0, 0)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAppointment {
    pub provider_id: String,
    pub date: DateTime<FixedOffset>,
}

impl NewAppointment {
    /// Resolves the local wall-clock time to an instant. Times skipped by a
    /// DST jump have no instant and yield `None`.
    pub fn at_local(provider_id: &str, starts_at: NaiveDateTime) -> Option<Self> {
        let date = Local
            .from_local_datetime(&starts_at)
            .earliest()?
            .fixed_offset();
        Some(Self {
            provider_id: provider_id.to_string(),
            date,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub provider_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub date: DateTime<FixedOffset>,
}

impl Appointment {
    pub fn local_date(&self) -> NaiveDateTime {
        self.date.with_timezone(&Local).naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn draft(date: &str, hour: u32) -> BookingDraft {
        BookingDraft {
            provider_id: "p1".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            hour,
        }
    }

    #[test]
    fn test_starts_at_composes_day_and_hour() {
        let starts_at = draft("2024-03-10", 14).starts_at().unwrap();
        assert_eq!(
            starts_at,
            NaiveDateTime::parse_from_str("2024-03-10 14:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
        );
        assert_eq!(starts_at.minute(), 0);
        assert_eq!(starts_at.second(), 0);
        assert_eq!(starts_at.nanosecond(), 0);
    }

    #[test]
    fn test_starts_at_rejects_out_of_range_hour() {
        assert!(draft("2024-03-10", 24).starts_at().is_none());
    }

    #[test]
    fn test_new_appointment_keeps_local_wall_time() {
        let starts_at = draft("2024-03-10", 14).starts_at().unwrap();
        let appointment = NewAppointment::at_local("p1", starts_at).unwrap();
        assert_eq!(appointment.date.with_timezone(&Local).naive_local(), starts_at);

        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["provider_id"], "p1");
        assert!(json["date"].as_str().unwrap().starts_with("2024-03-"));
    }

    #[test]
    fn test_appointment_parses_utc_date() {
        let json = r#"{"id":"a1","provider_id":"p1","user_id":"u1","date":"2024-03-10T14:00:00.000Z"}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, "a1");
        assert_eq!(appointment.date.timestamp(), 1_710_079_200);
    }
}
