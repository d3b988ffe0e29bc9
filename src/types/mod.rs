pub mod reading;
pub mod station;
pub mod time_window;
