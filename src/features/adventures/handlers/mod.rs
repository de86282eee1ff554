mod adventure_handler;

pub use adventure_handler::*;
