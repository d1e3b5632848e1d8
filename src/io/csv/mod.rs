//! CSV writing of metric tables.

mod write;

pub use write::*;
