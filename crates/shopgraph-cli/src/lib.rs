//! Command-line front end for the shopgraph query compiler.

pub mod cli;
pub mod commands;
pub mod output;
