pub mod csv_service;
pub mod generator;
pub mod statistics;

pub use csv_service::*;
pub use generator::*;
pub use statistics::*;
