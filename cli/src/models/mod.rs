pub mod chart;
pub mod stats;
pub mod stock_data;
pub mod ticker;

pub use chart::*;
pub use stats::*;
pub use stock_data::*;
pub use ticker::*;
