pub mod api;
pub mod app;
pub mod area;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod testing;
