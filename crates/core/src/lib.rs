//! Domain models and errors shared across the slotsync crates.

pub mod errors;
pub mod models;
