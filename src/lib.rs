//! Library crate root for the remoteplay launcher.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod commands;
pub mod runner;
pub mod session;
pub mod settings;
