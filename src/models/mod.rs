pub mod alert;
pub mod appointment;
pub mod availability;
pub mod provider;
pub mod user;

pub use alert::{Alert, SessionEvent};
pub use appointment::{Appointment, BookingDraft, NewAppointment};
pub use availability::{AvailabilitySlot, DayPeriods, HourSlot};
pub use provider::Provider;
pub use user::{AvatarUpload, Credentials, ProfileForm, ProfileUpdate, Session, SignUpForm, User};
