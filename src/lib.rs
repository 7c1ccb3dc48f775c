pub mod cli;
pub mod derivation;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod logging;
pub mod parser;
pub mod session;
