mod studio_handler;

pub use studio_handler::*;
