// ABOUTME: Library root for maas-redeploy - exposes the upgrade core for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod types;
pub mod upgrade;
