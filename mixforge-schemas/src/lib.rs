//! Serializable data types shared by the mixforge crates.

pub mod classification;
pub mod feature;
pub mod file_formats;
pub mod mix;
pub mod model;
pub mod suggestion;
