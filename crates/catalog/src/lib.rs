pub mod date;
pub mod format;
pub mod listing;
pub mod manifest;

pub use date::*;
pub use format::*;
pub use manifest::*;
