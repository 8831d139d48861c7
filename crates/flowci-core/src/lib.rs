pub mod cache;
pub mod config;
pub mod env_token;
pub mod exceptions;
pub mod flow;
pub mod navigator;
pub mod ordered_set;
pub mod snapshot;
pub mod transport;
