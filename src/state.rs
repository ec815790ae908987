use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::errors::{ApiError, AppError};
use crate::models::{Alert, SessionEvent};
use crate::services::api::BarberApi;
use crate::services::session::{SessionStore, TokenStorage};

pub const SESSION_EXPIRED_TITLE: &str = "Session expired";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please sign in again.";

/// Context shared by every screen: API client, session and user-visible alerts.
pub struct AppState {
    pub config: AppConfig,
    pub api: Box<dyn BarberApi>,
    pub session: SessionStore,
    pub alerts: Mutex<Vec<Alert>>,
    pub events: broadcast::Sender<SessionEvent>,
}

impl AppState {
    pub fn new(config: AppConfig, api: Box<dyn BarberApi>, storage: Box<dyn TokenStorage>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            config,
            api,
            session: SessionStore::new(storage),
            alerts: Mutex::new(Vec::new()),
            events,
        }
    }

    pub fn alert(&self, title: &str, message: &str) {
        tracing::info!(title, message, "alert");
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Alert::new(title, message));
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take_alerts(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.alerts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Ends the session after the server rejected its token. Only the first
    /// caller performs the sign-out and raises the alert.
    pub fn expire_session(&self) -> bool {
        if !self.session.clear() {
            return false;
        }
        self.api.set_token(None);
        tracing::warn!("session expired, signed out");
        self.alert(SESSION_EXPIRED_TITLE, SESSION_EXPIRED_MESSAGE);
        self.emit(SessionEvent::Expired);
        true
    }

    /// Passes results of authenticated requests through, turning a 401 into a forced sign-out.
    pub fn guard<T, E: Into<AppError>>(&self, result: Result<T, E>) -> Result<T, AppError> {
        match result.map_err(Into::into) {
            Err(AppError::Api(ApiError::Unauthorized)) | Err(AppError::SessionExpired) => {
                self.expire_session();
                Err(AppError::SessionExpired)
            }
            other => other,
        }
    }
}
