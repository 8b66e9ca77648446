pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod store;


pub use config::Config;
pub use store::{DocumentStore, MemoryStore, SlugLookup};
