//! Reading and writing the tabular files the workflows consume and produce.
//!
//! Every format is a headed CSV table whose rows deserialize into one record
//! type. Formats share the [`traits::RecordFile`] interface, so callers can
//! read from any reader or straight from a path.

pub mod records;
pub mod table;
pub mod traits;
