pub mod api;
pub mod auth;
pub mod booking;
pub mod confirmation;
pub mod session;
pub mod validation;
