pub mod engine;
pub mod fragments;

pub use engine::{render_template, TemplateError};
pub use fragments::{render_adventures, render_error, render_success, OperationKind};
