use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{error_message, ApiResult, BarberApi};
use crate::errors::ApiError;
use crate::models::{
    Appointment, AvailabilitySlot, AvatarUpload, Credentials, NewAppointment, ProfileUpdate,
    Provider, Session, SignUpForm, User,
};

pub struct HttpApi {
    base_url: String,
    token: RwLock<Option<String>>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct DayQuery {
    year: i32,
    month: u32,
    day: u32,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));
        match self.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, action: &str) -> ApiResult<T> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(action, error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::info!(action, "request rejected as unauthorized");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(action, status = status.as_u16(), "API returned error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("{action}: {e}")))
    }
}

#[async_trait]
impl BarberApi for HttpApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn create_session(&self, credentials: &Credentials) -> ApiResult<Session> {
        let req = self.request(Method::POST, "sessions").json(credentials);
        self.send(req, "create session").await
    }

    async fn create_user(&self, form: &SignUpForm) -> ApiResult<User> {
        let req = self.request(Method::POST, "users").json(form);
        self.send(req, "create user").await
    }

    async fn list_providers(&self) -> ApiResult<Vec<Provider>> {
        let req = self.request(Method::GET, "providers");
        self.send(req, "list providers").await
    }

    async fn day_availability(
        &self,
        provider_id: &str,
        day: NaiveDate,
    ) -> ApiResult<Vec<AvailabilitySlot>> {
        let query = DayQuery {
            year: day.year(),
            month: day.month(),
            day: day.day(),
        };
        let req = self
            .request(
                Method::GET,
                &format!("providers/{provider_id}/day-availability"),
            )
            .query(&query);
        self.send(req, "day availability").await
    }

    async fn create_appointment(&self, appointment: &NewAppointment) -> ApiResult<Appointment> {
        let req = self.request(Method::POST, "appointments").json(appointment);
        self.send(req, "create appointment").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        let req = self.request(Method::PUT, "profile").json(update);
        self.send(req, "update profile").await
    }

    async fn update_avatar(&self, avatar: AvatarUpload) -> ApiResult<User> {
        let part = reqwest::multipart::Part::bytes(avatar.bytes)
            .file_name(avatar.file_name)
            .mime_str(&avatar.mime)?;
        let form = reqwest::multipart::Form::new().part("avatar", part);
        let req = self.request(Method::PATCH, "users/avatar").multipart(form);
        self.send(req, "update avatar").await
    }
}
