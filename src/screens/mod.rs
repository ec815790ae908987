pub mod appointment_created;
pub mod create_appointment;
pub mod dashboard;
pub mod profile;
pub mod sign_in;
pub mod sign_up;

use chrono::NaiveDateTime;

use crate::errors::{AppError, FieldErrors};
use crate::state::AppState;

pub const NETWORK_ERROR_MESSAGE: &str =
    "An error occurred while contacting the server, check your network connection.";

#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    SignIn,
    SignUp,
    Dashboard,
    Profile,
    CreateAppointment { provider_id: String },
    AppointmentCreated { date: NaiveDateTime },
    Back,
}

/// What a form submission asks the caller to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Navigate(Navigation),
    /// Field errors to show next to the inputs; nothing was sent.
    Invalid(FieldErrors),
    /// Stay on the screen; any alert has already been raised.
    Stay,
}

/// Raises the alert for a failed request. Expiry is announced by the
/// session guard, so it is not reported twice.
pub(crate) fn report(state: &AppState, err: &AppError, title: &str, message: &str) {
    tracing::warn!(error = %err, title, "request failed");
    match err {
        AppError::SessionExpired => {}
        e if e.is_network() => state.alert(title, NETWORK_ERROR_MESSAGE),
        _ => state.alert(title, message),
    }
}
