pub mod coordinate_loader;
pub mod error;
