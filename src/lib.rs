pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod paths;
pub mod prompts;
pub mod services;
pub mod state;

#[cfg(test)]
mod testing;
