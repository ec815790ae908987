use chrono::NaiveDateTime;

/// Long-form date shown after a booking, e.g. `Sunday, March 10, 2024 at 14:00`.
pub fn format_appointment_date(date: &NaiveDateTime) -> String {
    date.format("%A, %B %d, %Y at %H:%M").to_string()
}
