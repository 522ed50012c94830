#![doc = "gen-index-core: core pipeline library for gen-index."]

//! This crate contains all logic for generating barrel index files: config
//! normalization, directory scanning, path filtering, code generation,
//! content assembly and the lifecycle-hook system that instruments every
//! stage of a task.
//!
//! # Usage
//! Build a [`config::RawConfig`] (programmatically or through an external
//! loader such as the `gen-index` CLI) and hand it to [`generate`].

pub mod codegen;
pub mod config;
pub mod error;
pub mod filter;
pub mod generate;
pub mod hooks;
pub mod scan;
pub mod task;

pub use generate::generate;
