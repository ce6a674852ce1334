//! File export formats.

pub mod export;
