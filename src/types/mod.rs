pub mod fix;
pub mod flight;
pub mod header;

pub use fix::*;
pub use flight::*;
pub use header::*;
