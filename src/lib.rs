//! Event listing and management: a key-value backed event store, a mock
//! session provider, and the screen-level state that sits on top of them.

pub mod config;
pub mod models;
pub mod screens;
pub mod services;
pub mod storage;
pub mod utils;

pub use utils::error::{AppError, AppResult};
