pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::models::{
    Appointment, AvailabilitySlot, AvatarUpload, Credentials, NewAppointment, ProfileUpdate,
    Provider, Session, SignUpForm, User,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote booking API. Every call after sign-in carries the attached bearer token.
#[async_trait]
pub trait BarberApi: Send + Sync {
    /// Attaches or detaches the bearer token sent with subsequent requests.
    fn set_token(&self, token: Option<String>);

    async fn create_session(&self, credentials: &Credentials) -> ApiResult<Session>;

    async fn create_user(&self, form: &SignUpForm) -> ApiResult<User>;

    async fn list_providers(&self) -> ApiResult<Vec<Provider>>;

    async fn day_availability(
        &self,
        provider_id: &str,
        day: NaiveDate,
    ) -> ApiResult<Vec<AvailabilitySlot>>;

    async fn create_appointment(&self, appointment: &NewAppointment) -> ApiResult<Appointment>;

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User>;

    async fn update_avatar(&self, avatar: AvatarUpload) -> ApiResult<User>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pulls a human message out of an error body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string())
}
