use serde::{Deserialize, Serialize};

/// Hours before this belong to the morning period.
pub const NOON: u32 = 12;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub hour: u32,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: u32,
    pub label: String,
    pub available: bool,
}

impl From<&AvailabilitySlot> for HourSlot {
    fn from(slot: &AvailabilitySlot) -> Self {
        Self {
            hour: slot.hour,
            label: format!("{:02}:00", slot.hour),
            available: slot.available,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPeriods {
    pub morning: Vec<HourSlot>,
    pub afternoon: Vec<HourSlot>,
}

impl DayPeriods {
    /// Splits a day's slots at noon, keeping the server's order inside each half.
    pub fn partition(slots: &[AvailabilitySlot]) -> Self {
        let (morning, afternoon): (Vec<&AvailabilitySlot>, Vec<&AvailabilitySlot>) =
            slots.iter().partition(|slot| slot.hour < NOON);
        Self {
            morning: morning.into_iter().map(HourSlot::from).collect(),
            afternoon: afternoon.into_iter().map(HourSlot::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
