use minijinja::context;
use serde::Serialize;

use super::{render_template, TemplateError};

/// The three image operations exposed as htmx fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Figurine,
    Scene,
    Composition,
}

impl OperationKind {
    /// Element id the fragment replaces
    pub fn result_id(&self) -> &'static str {
        match self {
            OperationKind::Figurine => "figurine-result",
            OperationKind::Scene => "scene-result",
            OperationKind::Composition => "composition-result",
        }
    }

    fn success_template(&self) -> &'static str {
        match self {
            OperationKind::Figurine => "fragments/figurine_success.html",
            OperationKind::Scene => "fragments/scene_success.html",
            OperationKind::Composition => "fragments/composition_success.html",
        }
    }
}

pub fn render_success(kind: OperationKind, url: &str) -> Result<String, TemplateError> {
    render_template(kind.success_template(), context! { url => url })
}

pub fn render_error(kind: OperationKind, message: &str) -> Result<String, TemplateError> {
    render_template(
        "fragments/error.html",
        context! { result_id => kind.result_id(), message => message },
    )
}

/// One button per adventure, concatenated
pub fn render_adventures<T: Serialize>(adventures: &[T]) -> Result<String, TemplateError> {
    render_template(
        "fragments/adventures.html",
        context! { adventures => adventures },
    )
}
