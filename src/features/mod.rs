//! Features layer - one module per page area, each exposing `routes()`

pub mod adventures;
pub mod pages;
pub mod studio;
