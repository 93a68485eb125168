//! Request handlers for the button page and command dispatch.

pub mod execute;
pub mod index;
