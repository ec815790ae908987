use crate::errors::AppError;
use crate::models::{Credentials, Session, SessionEvent, SignUpForm, User};
use crate::services::validation::{validate_sign_in, validate_sign_up};
use crate::state::AppState;

/// Restores a persisted session at start-up and re-attaches its token.
pub fn restore(state: &AppState) -> Option<Session> {
    let session = state.session.restore()?;
    state.api.set_token(Some(session.token.clone()));
    tracing::info!(user_id = %session.user.id, "session restored");
    state.emit(SessionEvent::SignedIn {
        user_id: session.user.id.clone(),
    });
    Some(session)
}

pub async fn sign_in(state: &AppState, credentials: &Credentials) -> Result<Session, AppError> {
    validate_sign_in(credentials).map_err(AppError::Validation)?;

    // A 401 here means wrong credentials, not an expired session.
    let session = state.api.create_session(credentials).await?;
    state.session.establish(session.clone())?;
    state.api.set_token(Some(session.token.clone()));
    state.emit(SessionEvent::SignedIn {
        user_id: session.user.id.clone(),
    });
    Ok(session)
}

pub async fn sign_up(state: &AppState, form: &SignUpForm) -> Result<User, AppError> {
    validate_sign_up(form).map_err(AppError::Validation)?;
    let user = state.api.create_user(form).await?;
    tracing::info!(user_id = %user.id, "account created");
    Ok(user)
}

/// Returns `false` when there was no session to end.
pub fn sign_out(state: &AppState) -> bool {
    if !state.session.clear() {
        return false;
    }
    state.api.set_token(None);
    tracing::info!("signed out");
    state.emit(SessionEvent::SignedOut);
    true
}

/// Replaces the session user with a fresh copy from the server.
pub fn update_user(state: &AppState, user: User) -> Result<Session, AppError> {
    let session = state.session.update_user(user)?;
    state.emit(SessionEvent::Updated {
        user_id: session.user.id.clone(),
    });
    Ok(session)
}
