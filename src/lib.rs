pub mod configuration;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;
