pub mod grid;
pub mod links;
pub mod overlay;
pub mod symbology;

pub use grid::*;
pub use links::*;
pub use overlay::*;
pub use symbology::*;
