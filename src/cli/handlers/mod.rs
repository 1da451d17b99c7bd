// src/cli/handlers/mod.rs

//! One module per CLI action.

pub mod chain;
pub mod commons;
pub mod paths;
pub mod run;
pub mod which;
