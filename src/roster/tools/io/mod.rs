//! Adapters between the in-memory [`Table`](crate::model::Table) and the
//! outside world: byte retrieval, xlsx decoding, and xlsx persistence.

pub mod excel_read;
pub mod excel_write;
pub mod fetch;
