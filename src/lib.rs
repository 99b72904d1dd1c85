pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod templates_structs;
pub mod view_state;
