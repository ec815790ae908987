use chrono::NaiveDateTime;

use super::Navigation;
use crate::services::confirmation::format_appointment_date;

pub struct AppointmentCreated {
    date: NaiveDateTime,
}

impl AppointmentCreated {
    pub fn new(date: NaiveDateTime) -> Self {
        Self { date }
    }

    pub fn title(&self) -> &'static str {
        "Appointment created"
    }

    pub fn description(&self) -> String {
        format_appointment_date(&self.date)
    }

    pub fn ok(&self) -> Navigation {
        Navigation::Dashboard
    }
}
