pub mod config;
pub mod edgelist;
pub mod error;
pub mod yaml;
