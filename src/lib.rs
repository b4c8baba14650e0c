// Week Calendar Library
// Layout engine, event store, HTTP API and client

pub mod api;
pub mod client;
pub mod config;
pub mod layout;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
