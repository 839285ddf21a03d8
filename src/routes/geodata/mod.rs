pub mod aggregator;
pub mod clients;
pub mod models;
pub mod soil;
pub mod views;
