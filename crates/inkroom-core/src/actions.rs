//! Mutations the canvas tools issue, written against [`MutationContext`].
//!
//! Run them through [`Room::run_mutation`](crate::Room::run_mutation):
//!
//! ```ignore
//! let id = room.run_mutation(|ctx| actions::insert_layer(ctx, layer))?;
//! ```

use crate::layers::{Color, Layer, LayerId, LayerUpdate, PathLayer, StrokePoint, new_layer_id};
use crate::presence::{PresenceOptions, PresencePatch};
use crate::room::MutationContext;
use kurbo::{Point, Vec2};

/// A stroke needs this many samples to become a layer.
pub const MIN_STROKE_POINTS: usize = 2;

/// Make `id` the only selected layer, as an undo step.
pub fn select_layer(ctx: &mut MutationContext<'_>, id: &str) {
    ctx.set_presence(
        PresencePatch::selection(vec![id.to_string()]),
        PresenceOptions::with_history(),
    );
}

/// Deselect everything, as an undo step.
pub fn clear_selection(ctx: &mut MutationContext<'_>) {
    if !ctx.presence().selection.is_empty() {
        ctx.set_presence(PresencePatch::selection(Vec::new()), PresenceOptions::with_history());
    }
}

/// Add `layer` on top of the paint order and select it.
pub fn insert_layer(ctx: &mut MutationContext<'_>, layer: Layer) -> LayerId {
    let id = new_layer_id();
    ctx.storage_mut().insert_layer(id.clone(), layer);
    select_layer(ctx, &id);
    id
}

/// Delete every selected layer that still exists. Returns how many were removed.
pub fn delete_selected(ctx: &mut MutationContext<'_>) -> usize {
    let selection = ctx.presence().selection.clone();
    let removed = ctx.storage_mut().remove_layers(&selection);
    clear_selection(ctx);
    removed
}

/// Move every selected layer by `delta`.
pub fn translate_selected(ctx: &mut MutationContext<'_>, delta: Vec2) {
    let selection = ctx.presence().selection.clone();
    ctx.storage_mut().translate_layers(&selection, delta);
}

/// Apply `update` to the first selected layer.
///
/// Returns `false` when nothing is selected or the layer is gone.
pub fn update_selected(ctx: &mut MutationContext<'_>, update: &LayerUpdate) -> bool {
    match ctx.presence().selection.first().cloned() {
        Some(id) => ctx.storage_mut().update_layer(&id, update),
        None => false,
    }
}

pub fn set_background(ctx: &mut MutationContext<'_>, color: Color) {
    ctx.storage_mut().background_color = color;
}

/// Track the pointer. Presence only, never an undo step.
pub fn move_cursor(ctx: &mut MutationContext<'_>, cursor: Option<Point>) {
    ctx.set_presence(PresencePatch::cursor(cursor), PresenceOptions::default());
}

/// Begin a pen stroke at `start`.
pub fn start_drawing(ctx: &mut MutationContext<'_>, start: StrokePoint, pen_color: Color) {
    ctx.set_presence(
        PresencePatch::pencil_draft(Some(vec![start])).with_pen_color(Some(pen_color)),
        PresenceOptions::default(),
    );
}

/// Append a sample to the current stroke. Ignored when no stroke is in progress.
pub fn continue_drawing(ctx: &mut MutationContext<'_>, point: StrokePoint) {
    let Some(mut draft) = ctx.presence().pencil_draft.clone() else {
        return;
    };
    draft.push(point);
    ctx.set_presence(
        PresencePatch {
            cursor: Some(Some(point.point())),
            pencil_draft: Some(Some(draft)),
            ..Default::default()
        },
        PresenceOptions::default(),
    );
}

/// Turn the current stroke into a path layer and clear the draft.
///
/// Strokes shorter than [`MIN_STROKE_POINTS`] are discarded.
pub fn finish_drawing(ctx: &mut MutationContext<'_>) -> Option<LayerId> {
    let presence = ctx.presence();
    let draft = presence.pencil_draft.clone()?;
    let color = presence.pen_color.unwrap_or_else(Color::black);
    ctx.set_presence(PresencePatch::pencil_draft(None), PresenceOptions::default());

    if draft.len() < MIN_STROKE_POINTS {
        log::debug!("discarding stroke with {} point(s)", draft.len());
        return None;
    }
    let path = PathLayer::from_stroke(&draft, color)?;
    let id = new_layer_id();
    ctx.storage_mut().insert_layer(id.clone(), path.into());
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layers::{LayerKind, RectangleLayer};
    use crate::presence::Presence;
    use crate::room::Room;

    fn room() -> Room {
        Room::new(Document::default(), Presence::default())
    }

    fn rect() -> Layer {
        RectangleLayer::new(0.0, 0.0, 100.0, 50.0).into()
    }

    #[test]
    fn test_insert_selects_new_layer() {
        let mut room = room();
        let id = room.run_mutation(|ctx| insert_layer(ctx, rect())).unwrap();
        assert_eq!(room.presence().selection, vec![id.clone()]);
        assert_eq!(room.storage().layer_ids(), [id]);
        // Insert and selection land in one undo step.
        assert_eq!(room.history().past().len(), 1);
        assert!(room.undo());
        assert!(room.storage().is_empty());
        assert!(room.presence().selection.is_empty());
    }

    #[test]
    fn test_delete_selected() {
        let mut room = room();
        room.run_mutation(|ctx| {
            insert_layer(ctx, rect());
        })
        .unwrap();
        let removed = room.run_mutation(delete_selected).unwrap();
        assert_eq!(removed, 1);
        assert!(room.storage().is_empty());
        assert!(room.presence().selection.is_empty());
    }

    #[test]
    fn test_delete_selected_with_vanished_layer() {
        let mut room = room();
        room.set_presence(
            PresencePatch::selection(vec!["gone".into()]),
            PresenceOptions::default(),
        )
        .unwrap();
        let removed = room.run_mutation(delete_selected).unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_translate_and_update_selected() {
        let mut room = room();
        let id = room.run_mutation(|ctx| insert_layer(ctx, rect())).unwrap();
        room.run_mutation(|ctx| translate_selected(ctx, Vec2::new(3.0, 4.0)))
            .unwrap();
        let applied = room
            .run_mutation(|ctx| {
                update_selected(
                    ctx,
                    &LayerUpdate {
                        width: Some(-10.0),
                        ..Default::default()
                    },
                )
            })
            .unwrap();
        assert!(applied);

        let base = room.storage().layer(&id).unwrap().base();
        assert!((base.x - 3.0).abs() < f64::EPSILON);
        assert!((base.y - 4.0).abs() < f64::EPSILON);
        assert!((base.width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_without_selection() {
        let mut room = room();
        let version = room.version();
        let applied = room
            .run_mutation(|ctx| update_selected(ctx, &LayerUpdate::default()))
            .unwrap();
        assert!(!applied);
        assert_eq!(room.version(), version);
    }

    #[test]
    fn test_cursor_never_enters_history() {
        let mut room = room();
        room.run_mutation(|ctx| move_cursor(ctx, Some(Point::new(5.0, 5.0))))
            .unwrap();
        assert_eq!(room.presence().cursor, Some(Point::new(5.0, 5.0)));
        assert!(!room.can_undo());
    }

    #[test]
    fn test_drawing_lifecycle() {
        let mut room = room();
        room.pause_history();
        room.run_mutation(|ctx| start_drawing(ctx, StrokePoint::new(10.0, 10.0, 0.5), Color::white()))
            .unwrap();
        for i in 1..=3 {
            let step = f64::from(i) * 5.0;
            room.run_mutation(|ctx| continue_drawing(ctx, StrokePoint::new(10.0 + step, 10.0 + step, 0.5)))
                .unwrap();
        }
        assert_eq!(room.presence().pencil_draft.as_ref().map(Vec::len), Some(4));

        let id = room.run_mutation(finish_drawing).unwrap().unwrap();
        room.resume_history();

        assert!(!room.presence().is_drawing());
        let layer = room.storage().layer(&id).unwrap();
        assert_eq!(layer.kind(), LayerKind::Path);
        assert_eq!(layer.base().fill, Color::white());
        assert_eq!(layer.as_path().unwrap().len(), 4);
        assert_eq!(room.history().past().len(), 1);

        assert!(room.undo());
        assert!(room.storage().is_empty());
    }

    #[test]
    fn test_short_stroke_discarded() {
        let mut room = room();
        room.run_mutation(|ctx| start_drawing(ctx, StrokePoint::new(1.0, 1.0, 0.5), Color::black()))
            .unwrap();
        let id = room.run_mutation(finish_drawing).unwrap();
        assert!(id.is_none());
        assert!(room.storage().is_empty());
        assert!(!room.presence().is_drawing());
        assert!(!room.can_undo());
    }

    #[test]
    fn test_continue_without_stroke_is_ignored() {
        let mut room = room();
        let version = room.version();
        room.run_mutation(|ctx| continue_drawing(ctx, StrokePoint::new(1.0, 1.0, 0.5)))
            .unwrap();
        assert_eq!(room.version(), version);
        assert!(room.run_mutation(finish_drawing).unwrap().is_none());
    }

    #[test]
    fn test_set_background() {
        let mut room = room();
        room.run_mutation(|ctx| set_background(ctx, Color::white())).unwrap();
        assert_eq!(room.storage().background_color, Color::white());
        assert!(room.can_undo());
    }
}
