pub mod compat;
pub mod config;
pub mod logging;
pub mod manifest;
