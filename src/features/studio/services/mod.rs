mod studio_service;

pub use studio_service::{StudioError, StudioService};
