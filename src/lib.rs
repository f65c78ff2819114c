pub mod config;
pub mod error;
pub mod options;
pub mod organization;
pub mod preview;
pub mod terminal;
pub mod types;
