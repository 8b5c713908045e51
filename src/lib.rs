pub mod config;
pub mod content;
pub mod filters;
pub mod handlers;
pub mod paths;
pub mod player;
pub mod router;
pub mod session;
pub mod state;
