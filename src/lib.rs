// Dual Calendar Library
// Gregorian/Hebrew calendar with positional, URL-encoded day markings

pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use error::CalendarError;
