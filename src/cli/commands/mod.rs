pub mod api;
pub mod auth;
pub mod menu;
pub mod navigate;
pub mod routes;
