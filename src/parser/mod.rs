pub mod assembler;
pub mod dispatcher;
pub mod fix;
pub mod header;
pub mod helpers;
pub mod main;

pub use assembler::*;
pub use dispatcher::*;
pub use fix::*;
pub use header::*;
pub use helpers::*;
pub use main::*;
