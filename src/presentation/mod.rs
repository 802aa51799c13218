pub mod config;
pub mod handlers;
pub mod presenter;
pub mod router;
pub mod state;
