pub mod connection;

pub use connection::{ConnectionRecord, ConnectionRecordError, validate_endpoint};
