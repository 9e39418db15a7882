pub mod date;
pub mod logger;
pub mod rolling;

pub use date::*;
pub use logger::*;
pub use rolling::*;
