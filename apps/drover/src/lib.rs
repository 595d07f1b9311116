//! # Drover
//!
//! The host side of Drover: configuration, the bootstrap sequencer and the
//! CLI. The binary in `main.rs` is a thin wrapper over [`cli::execute`].

pub mod cli;
pub mod config;
pub mod host;
