//! Point-in-time captures of document and presence, plus the canonical
//! serialization used to detect whether a mutation changed anything.

use crate::document::Document;
use crate::error::RoomResult;
use crate::presence::Presence;
use serde::{Deserialize, Serialize};

/// An owned copy of the document and the local presence at one instant.
///
/// Snapshots own every collection they hold; mutating live state afterwards
/// never reaches a captured snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    document: Document,
    presence: Presence,
}

impl Snapshot {
    /// Deep-copy the given state.
    pub fn capture(document: &Document, presence: &Presence) -> Self {
        Self {
            document: document.clone(),
            presence: presence.clone(),
        }
    }

    /// Independent live copies of the captured state.
    pub fn restore(&self) -> (Document, Presence) {
        (self.document.clone(), self.presence.clone())
    }

    /// Consume the snapshot, handing its state over without copying.
    pub fn into_parts(self) -> (Document, Presence) {
        (self.document, self.presence)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn digest(&self) -> RoomResult<StateDigest> {
        StateDigest::of(&self.document, &self.presence)
    }
}

/// Canonical string form of a document, for equality checks only.
///
/// Layers are keyed in sorted order, so equal documents serialize identically.
pub fn serialize_document(document: &Document) -> RoomResult<String> {
    Ok(serde_json::to_string(document)?)
}

/// Canonical string form of a presence record, for equality checks only.
pub fn serialize_presence(presence: &Presence) -> RoomResult<String> {
    Ok(serde_json::to_string(presence)?)
}

/// Serialized document and presence, compared before and after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDigest {
    pub document: String,
    pub presence: String,
}

impl StateDigest {
    pub fn of(document: &Document, presence: &Presence) -> RoomResult<Self> {
        Ok(Self {
            document: serialize_document(document)?,
            presence: serialize_presence(presence)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{Color, LayerUpdate, PathLayer, RectangleLayer, StrokePoint};
    use kurbo::Point;

    fn sample() -> (Document, Presence) {
        let mut doc = Document::new(Color::new(30, 30, 30));
        doc.insert_layer("r", RectangleLayer::new(0.0, 0.0, 100.0, 50.0).into());
        let stroke = [StrokePoint::new(0.0, 0.0, 0.5), StrokePoint::new(4.0, 4.0, 0.5)];
        if let Some(path) = PathLayer::from_stroke(&stroke, Color::white()) {
            doc.insert_layer("p", path.into());
        }
        let presence = Presence {
            selection: vec!["r".into()],
            cursor: Some(Point::new(3.0, 4.0)),
            pen_color: None,
            pencil_draft: Some(vec![StrokePoint::new(1.0, 1.0, 0.5)]),
        };
        (doc, presence)
    }

    #[test]
    fn test_capture_serializes_like_source() {
        let (doc, presence) = sample();
        let snapshot = Snapshot::capture(&doc, &presence);
        assert_eq!(
            snapshot.digest().unwrap(),
            StateDigest::of(&doc, &presence).unwrap()
        );
    }

    #[test]
    fn test_snapshot_isolation() {
        let (mut doc, mut presence) = sample();
        let snapshot = Snapshot::capture(&doc, &presence);
        let captured = snapshot.digest().unwrap();

        doc.update_layer(
            "r",
            &LayerUpdate {
                x: Some(500.0),
                ..Default::default()
            },
        );
        doc.remove_layer("p");
        doc.background_color = Color::white();
        presence.selection.push("p".into());
        if let Some(draft) = presence.pencil_draft.as_mut() {
            draft.push(StrokePoint::new(9.0, 9.0, 0.5));
        }

        assert_eq!(snapshot.digest().unwrap(), captured);
        assert_ne!(StateDigest::of(&doc, &presence).unwrap(), captured);
    }

    #[test]
    fn test_restore_is_independent() {
        let (doc, presence) = sample();
        let snapshot = Snapshot::capture(&doc, &presence);
        let (mut restored_doc, _) = snapshot.restore();
        restored_doc.clear();
        assert_eq!(snapshot.document().len(), 2);
        assert_eq!(snapshot.presence(), &presence);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let mut a = Document::default();
        let mut b = Document::default();
        a.insert_layer("x", RectangleLayer::new(0.0, 0.0, 1.0, 1.0).into());
        a.insert_layer("y", RectangleLayer::new(1.0, 1.0, 1.0, 1.0).into());
        b.insert_layer("x", RectangleLayer::new(0.0, 0.0, 1.0, 1.0).into());
        b.insert_layer("y", RectangleLayer::new(1.0, 1.0, 1.0, 1.0).into());
        assert_eq!(serialize_document(&a).unwrap(), serialize_document(&b).unwrap());

        // Z-order is part of the document.
        b.bring_to_front("x");
        assert_ne!(serialize_document(&a).unwrap(), serialize_document(&b).unwrap());
    }
}
