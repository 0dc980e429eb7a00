//! Cisco 8000 extensions for the `show` command shell.
//!
//! Library exports for the binary and for integration testing.

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod process;
pub mod registry;
