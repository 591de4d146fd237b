//! Rendering layers for the setup wizard

pub mod console;
