//! Main module for outline parsing and querying

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod query;
pub mod testing;
pub mod transforms;
