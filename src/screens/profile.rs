use super::{report, FormOutcome, Navigation};
use crate::errors::AppError;
use crate::models::{AvatarUpload, ProfileForm, ProfileUpdate};
use crate::services::auth;
use crate::services::validation::validate_profile;
use crate::state::AppState;

/// Form prefilled with the signed-in user.
pub fn initial_form(state: &AppState) -> Option<ProfileForm> {
    state.session.user().map(|user| ProfileForm::from_user(&user))
}

pub async fn submit(state: &AppState, form: &ProfileForm) -> FormOutcome {
    if let Err(errors) = validate_profile(form) {
        return FormOutcome::Invalid(errors);
    }

    let update = ProfileUpdate::from(form);
    let result = state
        .guard(state.api.update_profile(&update).await)
        .and_then(|user| auth::update_user(state, user));

    match result {
        Ok(_) => {
            state.alert("Profile successfully updated", "Your changes were saved.");
            FormOutcome::Navigate(Navigation::Back)
        }
        Err(AppError::SessionExpired) => FormOutcome::Navigate(Navigation::SignIn),
        Err(e) => {
            report(
                state,
                &e,
                "Profile updating error",
                "An error occurred while trying to update your account, please try again.",
            );
            FormOutcome::Stay
        }
    }
}

pub async fn update_avatar(state: &AppState, image: Vec<u8>) -> FormOutcome {
    let Some(user) = state.session.user() else {
        return FormOutcome::Navigate(Navigation::SignIn);
    };

    let upload = AvatarUpload::jpeg(&user.id, image);
    let result = state
        .guard(state.api.update_avatar(upload).await)
        .and_then(|user| auth::update_user(state, user));

    match result {
        Ok(_) => FormOutcome::Stay,
        Err(AppError::SessionExpired) => FormOutcome::Navigate(Navigation::SignIn),
        Err(e) => {
            report(
                state,
                &e,
                "Avatar error",
                "Error while trying to update your profile image.",
            );
            FormOutcome::Stay
        }
    }
}

pub fn sign_out(state: &AppState) -> Navigation {
    auth::sign_out(state);
    Navigation::SignIn
}
