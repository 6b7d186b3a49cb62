//! Change-triggered reads.
//!
//! A [`Selector`] derives a value from a [`RoomView`] and caches it. The
//! selector function only runs again when the room version moved, and the
//! cached value is only replaced when the equality function says it differs.

use crate::room::{Room, RoomView};

type SelectFn<T> = Box<dyn Fn(&RoomView<'_>) -> T>;
type EqualFn<T> = Box<dyn Fn(&T, &T) -> bool>;

/// A cached projection of room state.
pub struct Selector<T> {
    select: SelectFn<T>,
    equal: EqualFn<T>,
    version: u64,
    value: T,
}

impl<T: PartialEq + 'static> Selector<T> {
    /// Select with `PartialEq` as the change test.
    pub fn new(room: &Room, select: impl Fn(&RoomView<'_>) -> T + 'static) -> Self {
        Self::with_equality(room, select, |a: &T, b: &T| a == b)
    }
}

impl<T> Selector<T> {
    /// Select with a custom equality; `equal(old, new) == true` keeps `old`.
    pub fn with_equality(
        room: &Room,
        select: impl Fn(&RoomView<'_>) -> T + 'static,
        equal: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        let view = room.view();
        let value = select(&view);
        Self {
            select: Box::new(select),
            equal: Box::new(equal),
            version: view.version(),
            value,
        }
    }

    /// Current value, recomputed if the room changed since the last read.
    pub fn get(&mut self, room: &Room) -> &T {
        self.refresh(&room.view());
        &self.value
    }

    /// Like [`Selector::get`], for use inside a room listener.
    pub fn get_in(&mut self, view: &RoomView<'_>) -> &T {
        self.refresh(view);
        &self.value
    }

    /// The new value if it changed since the last read, otherwise `None`.
    pub fn poll(&mut self, room: &Room) -> Option<&T> {
        if self.refresh(&room.view()) {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Last value handed out, without looking at the room.
    pub fn cached(&self) -> &T {
        &self.value
    }

    fn refresh(&mut self, view: &RoomView<'_>) -> bool {
        if view.version() == self.version {
            return false;
        }
        self.version = view.version();
        let next = (self.select)(view);
        if (self.equal)(&self.value, &next) {
            log::trace!("selector: version {} left value unchanged", self.version);
            return false;
        }
        self.value = next;
        true
    }
}
