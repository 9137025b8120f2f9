pub mod cli;
pub mod configuration;
pub mod credentials;
pub mod domain;
pub mod email;
pub mod error;
pub mod sender;
pub mod telemetry;
