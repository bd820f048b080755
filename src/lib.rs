pub mod cli;
pub mod config;
pub mod db;
pub mod forms;
pub mod models;
pub mod services;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use db::Database;
