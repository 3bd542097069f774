//! JSON configuration for the tool binaries.

pub mod accuracy;
