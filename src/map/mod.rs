pub mod marker;
pub mod popup;
pub mod presenter;
pub mod surface;
