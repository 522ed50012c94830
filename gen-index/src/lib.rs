//! gen-index: CLI glue for the gen-index-core pipeline.
//!
//! All generation logic lives in `gen-index-core`; this crate only parses
//! arguments, loads the YAML config and maps outcomes to exit codes.

pub mod cli;
pub mod load_config;
