//! Configuration shared by every layer

pub mod config;
