// Integration tests for tidemark

pub mod cli;
pub mod helpers;
pub mod security;
pub mod unit;
