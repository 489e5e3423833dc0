//! Configuration module for the Dear Days conversion service.

mod settings;

pub use settings::{Config, LunarApiConfig, ServerConfig, SERVICE_KEY_ENV};
