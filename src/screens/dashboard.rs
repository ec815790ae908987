use super::{report, Navigation};
use crate::errors::AppError;
use crate::models::Provider;
use crate::services::booking::LoadState;
use crate::state::AppState;

/// What the profile button shows: the avatar, or the user's initial without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileBadge {
    Avatar(String),
    Initial(char),
}

pub struct Dashboard {
    providers: LoadState<Vec<Provider>>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            providers: LoadState::Idle,
        }
    }

    pub fn greeting(&self, state: &AppState) -> Option<String> {
        state
            .session
            .user()
            .map(|user| format!("Welcome,\n{}", user.name))
    }

    pub fn profile_badge(&self, state: &AppState) -> Option<ProfileBadge> {
        let user = state.session.user()?;
        match user.avatar_url {
            Some(url) => Some(ProfileBadge::Avatar(url)),
            None => user.initial().map(ProfileBadge::Initial),
        }
    }

    pub fn providers_state(&self) -> &LoadState<Vec<Provider>> {
        &self.providers
    }

    pub fn providers(&self) -> &[Provider] {
        self.providers.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub async fn load(&mut self, state: &AppState) -> Result<(), AppError> {
        self.providers = LoadState::Loading;
        match state.guard(state.api.list_providers().await) {
            Ok(providers) => {
                tracing::info!(count = providers.len(), "dashboard providers loaded");
                self.providers = LoadState::Loaded(providers);
                Ok(())
            }
            Err(e) => {
                report(
                    state,
                    &e,
                    "Error loading barbers",
                    "An error occurred while loading the barbers, please try again.",
                );
                self.providers = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn open_provider(&self, provider_id: &str) -> Navigation {
        Navigation::CreateAppointment {
            provider_id: provider_id.to_string(),
        }
    }

    pub fn open_profile(&self) -> Navigation {
        Navigation::Profile
    }
}
