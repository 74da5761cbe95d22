// Library exports for integration testing and binary
pub mod catalog;
pub mod config;
pub mod filter;
pub mod generator;
pub mod signal;
pub mod wav;
