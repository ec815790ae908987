pub mod config;
pub mod errors;
pub mod models;
pub mod screens;
pub mod services;
pub mod state;
