pub mod console_service;
pub mod converters;
