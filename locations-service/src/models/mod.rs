pub mod location;

pub use location::{LocationRow, LocationView};
