pub mod filter;
pub mod metrics;
pub mod rank;
pub mod service;
pub mod universe;
