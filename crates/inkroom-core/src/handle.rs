//! Shared ownership of a room for UI code that reaches it from several places.

use crate::error::{RoomError, RoomResult};
use crate::presence::{PresenceOptions, PresencePatch};
use crate::room::{MutationContext, Room, RoomView};
use std::cell::RefCell;
use std::rc::Rc;

/// A cloneable handle to a room.
///
/// Every operation fails with [`RoomError::Reentrant`] instead of running when
/// it is issued while a mutation (or a listener it triggered) is executing on
/// the same room.
#[derive(Clone)]
pub struct RoomHandle {
    room: Rc<RefCell<Room>>,
}

impl RoomHandle {
    pub fn new(room: Room) -> Self {
        Self {
            room: Rc::new(RefCell::new(room)),
        }
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut Room) -> R) -> RoomResult<R> {
        let mut room = self.room.try_borrow_mut().map_err(|_| {
            log::warn!("room handle: rejected reentrant call");
            RoomError::Reentrant
        })?;
        Ok(f(&mut *room))
    }

    /// Read through a view of the room.
    pub fn read<R>(&self, f: impl FnOnce(&RoomView<'_>) -> R) -> RoomResult<R> {
        let room = self.room.try_borrow().map_err(|_| RoomError::Reentrant)?;
        Ok(f(&room.view()))
    }

    pub fn version(&self) -> RoomResult<u64> {
        self.read(|view| view.version())
    }

    pub fn run_mutation<T>(&self, f: impl FnOnce(&mut MutationContext<'_>) -> T) -> RoomResult<T> {
        self.with_mut(|room| room.run_mutation(f))?
    }

    pub fn try_mutation<T, E>(
        &self,
        f: impl FnOnce(&mut MutationContext<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RoomError>,
    {
        self.with_mut(|room| room.try_mutation(f))?
    }

    pub fn set_presence(&self, patch: PresencePatch, options: PresenceOptions) -> RoomResult<()> {
        self.with_mut(|room| room.set_presence(patch, options))?
    }

    pub fn pause_history(&self) -> RoomResult<()> {
        self.with_mut(Room::pause_history)
    }

    pub fn resume_history(&self) -> RoomResult<()> {
        self.with_mut(Room::resume_history)
    }

    pub fn undo(&self) -> RoomResult<bool> {
        self.with_mut(Room::undo)
    }

    pub fn redo(&self) -> RoomResult<bool> {
        self.with_mut(Room::redo)
    }

    pub fn can_undo(&self) -> RoomResult<bool> {
        self.read(|view| view.can_undo())
    }

    pub fn can_redo(&self) -> RoomResult<bool> {
        self.read(|view| view.can_redo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layers::{Color, RectangleLayer};
    use crate::presence::Presence;

    fn handle() -> RoomHandle {
        RoomHandle::new(Room::new(Document::default(), Presence::default()))
    }

    #[test]
    fn test_mutation_through_handle() {
        let room = handle();
        room.run_mutation(|ctx| {
            ctx.storage_mut()
                .insert_layer("a", RectangleLayer::new(0.0, 0.0, 1.0, 1.0).into());
        })
        .unwrap();
        assert_eq!(room.read(|view| view.storage().len()).unwrap(), 1);
        assert!(room.can_undo().unwrap());
        assert!(room.undo().unwrap());
        assert!(room.can_redo().unwrap());
        assert_eq!(room.version().unwrap(), 2);
    }

    #[test]
    fn test_reentrant_mutation_rejected() {
        let room = handle();
        let inner = room.clone();
        let nested = room
            .run_mutation(move |ctx| {
                ctx.storage_mut().background_color = Color::white();
                inner.run_mutation(|ctx| ctx.storage_mut().background_color = Color::black())
            })
            .unwrap();

        assert!(matches!(nested, Err(RoomError::Reentrant)));
        let background = room.read(|view| view.storage().background_color).unwrap();
        assert_eq!(background, Color::white());
    }

    #[test]
    fn test_history_calls_inside_mutation_rejected() {
        let room = handle();
        let inner = room.clone();
        let (undo, read) = room
            .run_mutation(move |_| (inner.undo(), inner.read(|view| view.version())))
            .unwrap();
        assert!(matches!(undo, Err(RoomError::Reentrant)));
        assert!(matches!(read, Err(RoomError::Reentrant)));
    }

    #[test]
    fn test_pause_resume_through_handle() {
        let room = handle();
        room.pause_history().unwrap();
        for i in 0..3u8 {
            room.run_mutation(|ctx| ctx.storage_mut().background_color = Color::new(i, i, i))
                .unwrap();
        }
        room.resume_history().unwrap();
        assert!(room.can_undo().unwrap());
        assert!(room.undo().unwrap());
        assert!(!room.can_undo().unwrap());
    }
}
