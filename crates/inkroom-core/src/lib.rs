//! InkRoom Core Library
//!
//! Room-scoped state for a collaborative design canvas: the layer document,
//! per-user presence, and an undo/redo history driven by state diffs.
//!
//! ```ignore
//! let mut room = Room::new(Document::default(), Presence::default());
//! room.run_mutation(|ctx| actions::insert_layer(ctx, RectangleLayer::new(0.0, 0.0, 100.0, 50.0).into()))?;
//! room.undo();
//! ```

pub mod actions;
pub mod config;
pub mod document;
pub mod error;
pub mod handle;
pub mod history;
pub mod layers;
pub mod presence;
pub mod room;
pub mod select;
pub mod snapshot;

pub use config::RoomConfig;
pub use document::Document;
pub use error::{RoomError, RoomResult};
pub use handle::RoomHandle;
pub use history::History;
pub use layers::{
    Color, EllipseLayer, FrameLayer, Layer, LayerBase, LayerId, LayerKind, LayerUpdate, PathLayer,
    RectangleLayer, Shadow, ShadowUpdate, StrokeAlign, StrokePoint, TextLayer,
};
pub use presence::{Presence, PresenceOptions, PresencePatch, User, UserInfo};
pub use room::{ListenerId, MutationContext, Room, RoomView};
pub use select::Selector;
pub use snapshot::{Snapshot, StateDigest};
