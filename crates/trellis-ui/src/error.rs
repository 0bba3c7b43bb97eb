//! Error types for structural UI operations.

use crate::markup::MarkupError;
use crate::widget_id::WidgetId;
use std::fmt;

/// Errors returned by tree and markup operations.
///
/// Property misses, rejected lower-priority writes and illegal state
/// transitions are not errors; they are silent no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    /// The widget id does not resolve in this tree.
    NodeNotFound(WidgetId),

    /// The root widget cannot be removed, re-parented or destroyed.
    RootProtected,

    /// The widget already has a parent and must be detached first.
    AlreadyParented {
        child: WidgetId,
        parent: WidgetId,
    },

    /// Attaching would make a widget its own ancestor.
    WouldCreateCycle {
        parent: WidgetId,
        child: WidgetId,
    },

    /// The widget is not a child of the given parent.
    NotAChild {
        parent: WidgetId,
        child: WidgetId,
    },

    /// A markup tag names no registered widget type.
    UnknownWidgetType(String),

    /// A markup property value could not be interpreted.
    Markup(MarkupError),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::NodeNotFound(id) => write!(f, "Widget not found: {}", id),
            UiError::RootProtected => write!(f, "The root widget cannot be removed"),
            UiError::AlreadyParented { child, parent } => {
                write!(f, "{} is already a child of {}", child, parent)
            }
            UiError::WouldCreateCycle { parent, child } => {
                write!(f, "Attaching {} to {} would create a cycle", child, parent)
            }
            UiError::NotAChild { parent, child } => {
                write!(f, "{} is not a child of {}", child, parent)
            }
            UiError::UnknownWidgetType(name) => write!(f, "Unknown widget type: {}", name),
            UiError::Markup(err) => write!(f, "Markup error: {}", err),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::Markup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MarkupError> for UiError {
    fn from(err: MarkupError) -> Self {
        UiError::Markup(err)
    }
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
