pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod selection;
pub mod state;
pub mod tally;
pub mod views;
