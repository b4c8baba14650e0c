// Shared helper modules

pub mod date;
