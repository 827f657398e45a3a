pub mod app_error;
pub mod health;
pub mod server;
pub mod state;
