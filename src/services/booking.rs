use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::AppError;
use crate::models::{
    Appointment, AvailabilitySlot, BookingDraft, DayPeriods, NewAppointment, Provider,
};
use crate::services::api::BarberApi;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Ticket for one availability fetch. Only the ticket matching the latest
/// issued sequence number may write its result back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub seq: u64,
    pub provider_id: String,
    pub day: NaiveDate,
}

/// Provider, day and hour selection for a single booking.
/// Hour value meaning no slot is selected.
pub const NO_SLOT: u32 = 0;

#[derive(Debug)]
pub struct SlotPicker {
    providers: LoadState<Vec<Provider>>,
    availability: LoadState<Vec<AvailabilitySlot>>,
    selected_provider: Option<String>,
    selected_date: NaiveDate,
    selected_hour: Option<u32>,
    latest_seq: u64,
}

impl SlotPicker {
    pub fn new(provider_id: Option<String>, today: NaiveDate) -> Self {
        Self {
            providers: LoadState::Idle,
            availability: LoadState::Idle,
            selected_provider: provider_id,
            selected_date: today,
            selected_hour: None,
            latest_seq: 0,
        }
    }

    pub fn providers_state(&self) -> &LoadState<Vec<Provider>> {
        &self.providers
    }

    pub fn availability_state(&self) -> &LoadState<Vec<AvailabilitySlot>> {
        &self.availability
    }

    pub fn providers(&self) -> &[Provider] {
        self.providers.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn selected_provider(&self) -> Option<&str> {
        self.selected_provider.as_deref()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_hour(&self) -> Option<u32> {
        self.selected_hour
    }

    pub fn begin_providers(&mut self) {
        self.providers = LoadState::Loading;
    }

    pub fn finish_providers(
        &mut self,
        result: Result<Vec<Provider>, AppError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(providers) => {
                tracing::info!(count = providers.len(), "providers loaded");
                self.providers = LoadState::Loaded(providers);
                Ok(())
            }
            Err(e) => {
                self.providers = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Returns `true` when the selection changed and availability must be refetched.
    pub fn select_provider(&mut self, provider_id: &str) -> bool {
        if self.selected_provider.as_deref() == Some(provider_id) {
            return false;
        }
        self.selected_provider = Some(provider_id.to_string());
        self.reset_availability();
        true
    }

    /// Returns `true` when the selection changed and availability must be refetched.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.selected_date == date {
            return false;
        }
        self.selected_date = date;
        self.reset_availability();
        true
    }

    /// Selects an hour from the loaded availability. Unknown or unavailable
    /// hours leave the current selection untouched. Hour 0 is the "nothing
    /// selected" value and clears the selection.
    pub fn select_hour(&mut self, hour: u32) -> Result<(), AppError> {
        if hour == NO_SLOT {
            self.selected_hour = None;
            return Ok(());
        }
        let available = self
            .availability
            .loaded()
            .and_then(|slots| slots.iter().find(|s| s.hour == hour))
            .is_some_and(|s| s.available);
        if !available {
            return Err(AppError::SlotUnavailable(hour));
        }
        self.selected_hour = Some(hour);
        Ok(())
    }

    fn reset_availability(&mut self) {
        // Bumping the sequence orphans any fetch still in flight for the old key.
        self.latest_seq += 1;
        self.availability = LoadState::Idle;
        self.selected_hour = None;
    }

    /// Issues a ticket for the current (provider, day). `None` until a provider is chosen.
    pub fn request_availability(&mut self) -> Option<AvailabilityRequest> {
        let provider_id = self.selected_provider.clone()?;
        self.latest_seq += 1;
        self.availability = LoadState::Loading;
        tracing::info!(
            seq = self.latest_seq,
            provider_id = %provider_id,
            day = %self.selected_date,
            "requesting availability"
        );
        Some(AvailabilityRequest {
            seq: self.latest_seq,
            provider_id,
            day: self.selected_date,
        })
    }

    /// Applies a fetch result. Returns `Ok(false)` when the ticket was superseded
    /// and the result (success or failure) was dropped.
    pub fn complete_availability(
        &mut self,
        request: &AvailabilityRequest,
        result: Result<Vec<AvailabilitySlot>, AppError>,
    ) -> Result<bool, AppError> {
        let current = request.seq == self.latest_seq
            && self.selected_provider.as_deref() == Some(request.provider_id.as_str())
            && self.selected_date == request.day;
        if !current {
            tracing::warn!(
                seq = request.seq,
                latest = self.latest_seq,
                "discarding stale availability response"
            );
            return Ok(false);
        }

        match result {
            Ok(slots) => {
                if let Some(hour) = self.selected_hour {
                    if !slots.iter().any(|s| s.hour == hour && s.available) {
                        self.selected_hour = None;
                    }
                }
                self.availability = LoadState::Loaded(slots);
                Ok(true)
            }
            Err(e) => {
                self.availability = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Loaded availability split into morning and afternoon.
    pub fn periods(&self) -> DayPeriods {
        self.availability
            .loaded()
            .map(|slots| DayPeriods::partition(slots))
            .unwrap_or_default()
    }

    pub fn draft(&self) -> Result<BookingDraft, AppError> {
        let hour = self.selected_hour.ok_or(AppError::NoSlotSelected)?;
        let provider_id = self
            .selected_provider
            .clone()
            .ok_or(AppError::NoProviderSelected)?;
        Ok(BookingDraft {
            provider_id,
            date: self.selected_date,
            hour,
        })
    }

    /// Creates the appointment for the current draft. Fails locally, without
    /// touching the API, when the draft is incomplete.
    pub async fn submit(
        &self,
        api: &dyn BarberApi,
    ) -> Result<(NaiveDateTime, Appointment), AppError> {
        let draft = self.draft()?;
        let starts_at = draft.starts_at().ok_or(AppError::InvalidTime)?;
        let request =
            NewAppointment::at_local(&draft.provider_id, starts_at).ok_or(AppError::InvalidTime)?;

        tracing::info!(provider_id = %draft.provider_id, %starts_at, "creating appointment");
        let appointment = api.create_appointment(&request).await?;
        Ok((starts_at, appointment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slots(hours: &[(u32, bool)]) -> Vec<AvailabilitySlot> {
        hours
            .iter()
            .map(|&(hour, available)| AvailabilitySlot { hour, available })
            .collect()
    }

    fn loaded_picker() -> SlotPicker {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        let req = picker.request_availability().unwrap();
        picker
            .complete_availability(&req, Ok(slots(&[(8, true), (9, false), (14, true)])))
            .unwrap();
        picker
    }

    #[test]
    fn test_no_request_without_provider() {
        let mut picker = SlotPicker::new(None, day("2024-03-10"));
        assert!(picker.request_availability().is_none());
        assert_eq!(picker.availability_state(), &LoadState::Idle);
    }

    #[test]
    fn test_request_marks_availability_loading() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        assert!(!picker.availability_state().is_loading());
        picker.request_availability().unwrap();
        assert!(picker.availability_state().is_loading());

        picker.begin_providers();
        assert!(picker.providers_state().is_loading());
        picker.finish_providers(Ok(vec![])).unwrap();
        assert!(!picker.providers_state().is_loading());
    }

    #[test]
    fn test_select_available_hour() {
        let mut picker = loaded_picker();
        picker.select_hour(14).unwrap();
        assert_eq!(picker.selected_hour(), Some(14));
        picker.select_hour(8).unwrap();
        assert_eq!(picker.selected_hour(), Some(8));
    }

    #[test]
    fn test_unavailable_hour_keeps_selection() {
        let mut picker = loaded_picker();
        picker.select_hour(14).unwrap();

        assert!(matches!(picker.select_hour(9), Err(AppError::SlotUnavailable(9))));
        assert_eq!(picker.selected_hour(), Some(14));

        assert!(picker.select_hour(20).is_err());
        assert_eq!(picker.selected_hour(), Some(14));
    }

    #[test]
    fn test_hour_zero_means_no_selection() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        let req = picker.request_availability().unwrap();
        picker
            .complete_availability(&req, Ok(slots(&[(0, true), (8, true)])))
            .unwrap();

        picker.select_hour(8).unwrap();
        picker.select_hour(NO_SLOT).unwrap();
        assert_eq!(picker.selected_hour(), None);
        assert!(matches!(picker.draft(), Err(AppError::NoSlotSelected)));
    }

    #[test]
    fn test_cannot_select_before_availability_loads() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        assert!(picker.select_hour(8).is_err());
        assert_eq!(picker.selected_hour(), None);
    }

    #[test]
    fn test_changing_key_clears_hour() {
        let mut picker = loaded_picker();
        picker.select_hour(8).unwrap();
        assert!(picker.select_date(day("2024-03-11")));
        assert_eq!(picker.selected_hour(), None);
        assert_eq!(picker.availability_state(), &LoadState::Idle);

        assert!(!picker.select_date(day("2024-03-11")));
        assert!(!picker.select_provider("p1"));
        assert!(picker.select_provider("p2"));
    }

    #[test]
    fn test_latest_initiated_request_wins() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        let first = picker.request_availability().unwrap();
        let second = picker.request_availability().unwrap();
        assert!(second.seq > first.seq);

        // Newer request completes first, older one arrives late.
        assert!(picker
            .complete_availability(&second, Ok(slots(&[(10, true)])))
            .unwrap());
        assert!(!picker
            .complete_availability(&first, Ok(slots(&[(16, true)])))
            .unwrap());

        assert_eq!(picker.availability_state(), &LoadState::Loaded(slots(&[(10, true)])));
    }

    #[test]
    fn test_stale_response_after_provider_change_is_dropped() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        let old = picker.request_availability().unwrap();
        picker.select_provider("p2");

        assert!(!picker
            .complete_availability(&old, Ok(slots(&[(8, true)])))
            .unwrap());
        assert_eq!(picker.availability_state(), &LoadState::Idle);

        let fresh = picker.request_availability().unwrap();
        assert_eq!(fresh.provider_id, "p2");
        assert!(picker
            .complete_availability(&fresh, Ok(slots(&[(15, true)])))
            .unwrap());
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        let old = picker.request_availability().unwrap();
        let new = picker.request_availability().unwrap();
        picker
            .complete_availability(&new, Ok(slots(&[(8, true)])))
            .unwrap();

        let applied = picker
            .complete_availability(&old, Err(AppError::SessionExpired))
            .unwrap();
        assert!(!applied);
        assert!(picker.availability_state().loaded().is_some());
    }

    #[test]
    fn test_current_failure_is_reported() {
        let mut picker = SlotPicker::new(Some("p1".to_string()), day("2024-03-10"));
        let req = picker.request_availability().unwrap();
        assert!(picker
            .complete_availability(&req, Err(AppError::NotSignedIn))
            .is_err());
        assert!(matches!(picker.availability_state(), LoadState::Failed(_)));
    }

    #[test]
    fn test_periods_follow_loaded_slots() {
        let picker = loaded_picker();
        let periods = picker.periods();
        assert_eq!(periods.morning.len(), 2);
        assert_eq!(periods.afternoon.len(), 1);
        assert_eq!(periods.afternoon[0].label, "14:00");
    }

    #[test]
    fn test_draft_requires_hour() {
        let picker = loaded_picker();
        assert!(matches!(picker.draft(), Err(AppError::NoSlotSelected)));
    }

    #[test]
    fn test_draft_composes_selection() {
        let mut picker = loaded_picker();
        picker.select_hour(14).unwrap();
        let draft = picker.draft().unwrap();
        assert_eq!(draft.provider_id, "p1");
        assert_eq!(draft.date, day("2024-03-10"));
        assert_eq!(draft.hour, 14);
    }

    #[test]
    fn test_reload_drops_hour_that_became_unavailable() {
        let mut picker = loaded_picker();
        picker.select_hour(8).unwrap();
        let req = picker.request_availability().unwrap();
        picker
            .complete_availability(&req, Ok(slots(&[(8, false), (14, true)])))
            .unwrap();
        assert_eq!(picker.selected_hour(), None);
    }
}
