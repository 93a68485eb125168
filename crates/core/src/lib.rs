//! Domain types and configuration loading for Bubble, the Poppit web
//! front-end.

pub mod command;
pub mod config;
pub mod error;
