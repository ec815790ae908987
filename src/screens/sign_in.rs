use super::{report, FormOutcome, Navigation};
use crate::errors::AppError;
use crate::models::Credentials;
use crate::services::auth;
use crate::state::AppState;

pub async fn submit(state: &AppState, credentials: &Credentials) -> FormOutcome {
    match auth::sign_in(state, credentials).await {
        Ok(_) => FormOutcome::Navigate(Navigation::Dashboard),
        Err(AppError::Validation(errors)) => FormOutcome::Invalid(errors),
        Err(e) => {
            report(
                state,
                &e,
                "Authentication error",
                "An error occurred while trying to log in, check your credentials.",
            );
            FormOutcome::Stay
        }
    }
}

pub fn create_account() -> Navigation {
    Navigation::SignUp
}
