mod studio_dto;

pub use studio_dto::*;
