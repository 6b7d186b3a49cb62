//! Per-user ephemeral state: selection, cursor and the in-progress pen stroke.
//!
//! Presence is not part of the durable document. It only enters undo history
//! when a mutation asks for it with [`PresenceOptions::add_to_history`].

use crate::layers::{Color, LayerId, StrokePoint};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ephemeral state of one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    /// Selected layer ids, in the order they were selected.
    pub selection: Vec<LayerId>,
    /// Pointer position in document coordinates, `None` when off-canvas.
    pub cursor: Option<Point>,
    /// Color of the stroke being drawn.
    pub pen_color: Option<Color>,
    /// Samples of the stroke being drawn, absolute coordinates.
    pub pencil_draft: Option<Vec<StrokePoint>>,
}

impl Presence {
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|selected| selected == id)
    }

    pub fn is_drawing(&self) -> bool {
        self.pencil_draft.is_some()
    }
}

/// A shallow patch over [`Presence`]. `None` leaves a field untouched.
///
/// Nullable fields take `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresencePatch {
    pub selection: Option<Vec<LayerId>>,
    pub cursor: Option<Option<Point>>,
    pub pen_color: Option<Option<Color>>,
    pub pencil_draft: Option<Option<Vec<StrokePoint>>>,
}

impl PresencePatch {
    pub fn selection(ids: Vec<LayerId>) -> Self {
        Self {
            selection: Some(ids),
            ..Default::default()
        }
    }

    pub fn cursor(cursor: Option<Point>) -> Self {
        Self {
            cursor: Some(cursor),
            ..Default::default()
        }
    }

    pub fn pencil_draft(draft: Option<Vec<StrokePoint>>) -> Self {
        Self {
            pencil_draft: Some(draft),
            ..Default::default()
        }
    }

    pub fn with_pen_color(mut self, color: Option<Color>) -> Self {
        self.pen_color = Some(color);
        self
    }

    /// Merge the patch into `presence`.
    pub fn apply(self, presence: &mut Presence) {
        if let Some(selection) = self.selection {
            presence.selection = selection;
        }
        if let Some(cursor) = self.cursor {
            presence.cursor = cursor;
        }
        if let Some(pen_color) = self.pen_color {
            presence.pen_color = pen_color;
        }
        if let Some(draft) = self.pencil_draft {
            presence.pencil_draft = draft;
        }
    }
}

/// How a presence change participates in history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenceOptions {
    /// Record the change as an undo step (e.g. an intentional selection change).
    pub add_to_history: bool,
}

impl PresenceOptions {
    /// Options that record the change in history.
    pub fn with_history() -> Self {
        Self {
            add_to_history: true,
        }
    }
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
}

/// A connected user: identity plus presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub connection_id: u32,
    pub info: UserInfo,
    pub presence: Presence,
}

impl User {
    pub fn new(connection_id: u32, name: impl Into<String>, presence: Presence) -> Self {
        Self {
            connection_id,
            info: UserInfo { name: name.into() },
            presence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_is_shallow() {
        let mut presence = Presence {
            selection: vec!["a".into()],
            cursor: Some(Point::new(1.0, 2.0)),
            pen_color: Some(Color::black()),
            pencil_draft: None,
        };
        PresencePatch::cursor(Some(Point::new(5.0, 5.0))).apply(&mut presence);

        assert_eq!(presence.selection, vec!["a".to_string()]);
        assert_eq!(presence.cursor, Some(Point::new(5.0, 5.0)));
        assert_eq!(presence.pen_color, Some(Color::black()));
    }

    #[test]
    fn test_patch_clears_nullable_fields() {
        let mut presence = Presence {
            cursor: Some(Point::new(1.0, 2.0)),
            pencil_draft: Some(vec![StrokePoint::new(0.0, 0.0, 0.5)]),
            ..Default::default()
        };
        PresencePatch {
            cursor: Some(None),
            pencil_draft: Some(None),
            ..Default::default()
        }
        .apply(&mut presence);

        assert!(presence.cursor.is_none());
        assert!(!presence.is_drawing());
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut presence = Presence {
            selection: vec!["x".into()],
            ..Default::default()
        };
        let before = presence.clone();
        PresencePatch::default().apply(&mut presence);
        assert_eq!(presence, before);
    }

    #[test]
    fn test_is_selected() {
        let presence = Presence {
            selection: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert!(presence.is_selected("b"));
        assert!(!presence.is_selected("c"));
    }

    #[test]
    fn test_pen_color_builder() {
        let patch = PresencePatch::pencil_draft(Some(Vec::new())).with_pen_color(Some(Color::white()));
        assert_eq!(patch.pen_color, Some(Some(Color::white())));
    }
}
