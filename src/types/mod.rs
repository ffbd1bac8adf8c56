pub mod analytics;
pub mod indicators;
pub mod price;
pub mod ranking;
pub mod signals;

pub use analytics::*;
pub use indicators::*;
pub use price::*;
pub use ranking::*;
pub use signals::*;
