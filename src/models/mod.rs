pub mod booking;
pub mod catalog;
pub mod hostel;
pub mod image;
pub mod lenient;
pub mod profile;
