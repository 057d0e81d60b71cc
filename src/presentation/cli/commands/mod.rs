pub mod logger;
pub mod sync;

pub use logger::*;
pub use sync::*;
