//! Linear undo/redo over document snapshots, with pause batching.

use crate::snapshot::Snapshot;

/// Undo/redo stacks.
///
/// `past` holds the state before each committed change (oldest first);
/// `future` holds states undone from (oldest first). While paused, committed
/// changes collapse into one entry: the state captured when the pause began.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
    pause_depth: usize,
    paused_snapshot: Option<Snapshot>,
    paused_changed: bool,
    max_undo: Option<usize>,
}

impl History {
    /// Create an empty history keeping at most `max_undo` undo steps (at least one).
    pub fn new(max_undo: Option<usize>) -> Self {
        Self {
            max_undo: max_undo.map(|max| max.max(1)),
            ..Default::default()
        }
    }

    /// Record a history-qualifying change whose prior state is `before`.
    ///
    /// Outside a pause this pushes `before` and clears redo. During a pause it
    /// only marks the batch dirty; the pause-entry snapshot stays the entry.
    /// `before` may be `None` only while paused.
    pub fn commit(&mut self, before: Option<Snapshot>) {
        if self.pause_depth > 0 {
            if self.paused_snapshot.is_none() {
                self.paused_snapshot = before;
            }
            self.paused_changed = true;
            return;
        }
        match before {
            Some(snapshot) => {
                self.push_past(snapshot);
                self.future.clear();
                log::debug!("history: recorded step, {} to undo", self.past.len());
            }
            None => log::warn!("history: change committed without a prior snapshot"),
        }
    }

    /// Begin (or nest) a batch. `current` is only called on the outermost pause.
    pub fn pause(&mut self, current: impl FnOnce() -> Snapshot) {
        if self.pause_depth == 0 {
            self.paused_snapshot = Some(current());
            self.paused_changed = false;
            log::debug!("history: paused");
        }
        self.pause_depth += 1;
    }

    /// End a batch. Returns `true` when the outermost resume pushed an entry.
    pub fn resume(&mut self) -> bool {
        if self.pause_depth == 0 {
            log::debug!("history: resume without matching pause ignored");
            return false;
        }
        self.pause_depth -= 1;
        if self.pause_depth > 0 {
            return false;
        }

        let pending = self.paused_snapshot.take();
        let changed = std::mem::take(&mut self.paused_changed);
        match pending {
            Some(snapshot) if changed => {
                self.push_past(snapshot);
                self.future.clear();
                log::debug!("history: resumed, batch recorded as one step");
                true
            }
            _ => {
                log::debug!("history: resumed, nothing to record");
                false
            }
        }
    }

    /// Step back. `current` captures the live state for the redo stack.
    ///
    /// Returns the snapshot to install, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: impl FnOnce() -> Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop()?;
        self.future.push(current());
        log::debug!(
            "history: undo, {} to undo / {} to redo",
            self.past.len(),
            self.future.len()
        );
        Some(previous)
    }

    /// Step forward. `current` captures the live state for the undo stack.
    pub fn redo(&mut self, current: impl FnOnce() -> Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.push_past(current());
        log::debug!(
            "history: redo, {} to undo / {} to redo",
            self.past.len(),
            self.future.len()
        );
        Some(next)
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push(snapshot);
        if let Some(max) = self.max_undo {
            if self.past.len() > max {
                let excess = self.past.len() - max;
                self.past.drain(..excess);
                log::debug!("history: dropped {} oldest step(s)", excess);
            }
        }
    }

    /// Drop all undo/redo state and any pending batch.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.pause_depth = 0;
        self.paused_snapshot = None;
        self.paused_changed = false;
    }

    pub fn is_paused(&self) -> bool {
        self.pause_depth > 0
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past(&self) -> &[Snapshot] {
        &self.past
    }

    pub fn future(&self) -> &[Snapshot] {
        &self.future
    }
}
