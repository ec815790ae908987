use super::{report, FormOutcome, Navigation};
use crate::errors::AppError;
use crate::models::SignUpForm;
use crate::services::auth;
use crate::state::AppState;

pub async fn submit(state: &AppState, form: &SignUpForm) -> FormOutcome {
    match auth::sign_up(state, form).await {
        Ok(_) => {
            state.alert("Registration successful", "You can now log in.");
            FormOutcome::Navigate(Navigation::SignIn)
        }
        Err(AppError::Validation(errors)) => FormOutcome::Invalid(errors),
        Err(e) => {
            report(
                state,
                &e,
                "Registration error",
                "An error occurred while creating your account, please try again.",
            );
            FormOutcome::Stay
        }
    }
}

pub fn back_to_sign_in() -> Navigation {
    Navigation::SignIn
}
