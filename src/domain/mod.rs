// Domain module - Core types shared by the client and the CLI
pub mod config;
pub mod error;
pub mod name;
pub mod versions;
