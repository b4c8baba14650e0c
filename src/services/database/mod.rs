// Database service module
// SQLite connection and schema management

mod connection;
mod schema;

pub use connection::Database;
