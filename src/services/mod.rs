// Service module exports

pub mod database;
pub mod event;
pub mod source;
