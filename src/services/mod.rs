pub mod api_client;
pub mod booking_service;
pub mod hostel_service;
pub mod image_service;
pub mod pricing_service;
pub mod profile_service;
