use chrono::NaiveDate;

use super::{report, FormOutcome, Navigation};
use crate::errors::AppError;
use crate::services::booking::SlotPicker;
use crate::state::AppState;

pub const SELECT_SLOT_MESSAGE: &str = "Please select a time slot.";

/// Booking screen: barber list, day picker and hour grid.
pub struct CreateAppointment {
    picker: SlotPicker,
}

impl CreateAppointment {
    pub fn new(provider_id: &str, today: NaiveDate) -> Self {
        Self {
            picker: SlotPicker::new(Some(provider_id.to_string()), today),
        }
    }

    pub fn picker(&self) -> &SlotPicker {
        &self.picker
    }

    /// Loads the barber list and the routed barber's hours. A failed list does
    /// not block the hours; the first error is returned.
    pub async fn mount(&mut self, state: &AppState) -> Result<(), AppError> {
        let providers = self.load_providers(state).await;
        if let Err(AppError::SessionExpired) = providers {
            return providers;
        }
        let availability = self.load_availability(state).await;
        providers.and(availability)
    }

    async fn load_providers(&mut self, state: &AppState) -> Result<(), AppError> {
        self.picker.begin_providers();
        let result = state.guard(state.api.list_providers().await);
        self.picker.finish_providers(result).map_err(|e| {
            report(
                state,
                &e,
                "Error loading barbers",
                "An error occurred while loading the barbers, please try again.",
            );
            e
        })
    }

    async fn load_availability(&mut self, state: &AppState) -> Result<(), AppError> {
        let Some(request) = self.picker.request_availability() else {
            return Ok(());
        };
        let result = state.guard(
            state
                .api
                .day_availability(&request.provider_id, request.day)
                .await,
        );
        match self.picker.complete_availability(&request, result) {
            Ok(_) => Ok(()),
            Err(e) => {
                report(
                    state,
                    &e,
                    "Error loading schedule",
                    "An error occurred while loading the available hours, please try again.",
                );
                Err(e)
            }
        }
    }

    pub async fn select_provider(
        &mut self,
        state: &AppState,
        provider_id: &str,
    ) -> Result<(), AppError> {
        if self.picker.select_provider(provider_id) {
            self.load_availability(state).await?;
        }
        Ok(())
    }

    pub async fn select_date(&mut self, state: &AppState, date: NaiveDate) -> Result<(), AppError> {
        if self.picker.select_date(date) {
            self.load_availability(state).await?;
        }
        Ok(())
    }

    /// Returns `false` when the hour cannot be picked; the selection is unchanged.
    /// Hour 0 clears the selection.
    pub fn select_hour(&mut self, hour: u32) -> bool {
        self.picker.select_hour(hour).is_ok()
    }

    pub async fn submit(&self, state: &AppState) -> FormOutcome {
        match state.guard(self.picker.submit(state.api.as_ref()).await) {
            Ok((date, appointment)) => {
                tracing::info!(appointment_id = %appointment.id, %date, "appointment created");
                FormOutcome::Navigate(Navigation::AppointmentCreated { date })
            }
            Err(AppError::NoSlotSelected) => {
                state.alert("Booking error", SELECT_SLOT_MESSAGE);
                FormOutcome::Stay
            }
            Err(AppError::NoProviderSelected) => {
                state.alert("Booking error", "Please select a barber.");
                FormOutcome::Stay
            }
            Err(AppError::SessionExpired) => FormOutcome::Navigate(Navigation::SignIn),
            Err(e) => {
                report(
                    state,
                    &e,
                    "Error creating appointment",
                    "An error occurred while trying to create the appointment, please try again.",
                );
                FormOutcome::Stay
            }
        }
    }

    pub fn back(&self) -> Navigation {
        Navigation::Back
    }
}
