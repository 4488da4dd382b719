//! Core placeboard library (config, API client, data shaping, formatting).

pub mod api;
pub mod apply;
pub mod card;
pub mod config;
pub mod format;
pub mod logging;
pub mod resumes;
pub mod seasons;
pub mod stats;
pub mod trends;

pub use placeboard_types as types;
