mod adventure_service;

pub use adventure_service::{parse_adventures, AdventureService, ADVENTURE_COUNT};
