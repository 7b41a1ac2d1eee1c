//! Command implementations

pub mod add;
pub mod check;
pub mod completions;
pub mod config;
pub mod export;
pub mod list;
