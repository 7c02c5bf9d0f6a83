pub mod bounds;
pub mod bucket;
pub mod dem;
pub mod tile_index;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use bucket::*;
pub use dem::*;
pub use tile_index::*;
