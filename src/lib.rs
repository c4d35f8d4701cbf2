pub mod config;
pub mod filters;
pub mod http_client;
pub mod logging;
pub mod player;
pub mod player_api;
pub mod player_store;
pub mod state;
pub mod validation;
pub mod worker;
