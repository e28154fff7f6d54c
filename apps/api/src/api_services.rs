mod audit;
mod database;
mod security;
mod state_builder;

pub use database::connect;
pub use state_builder::build_app_state;
