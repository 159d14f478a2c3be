pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod router;
pub mod session;
pub mod utils;
