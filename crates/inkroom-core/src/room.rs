//! A collaborative session: the live document, the local user, and history.
//!
//! Every change goes through [`Room::run_mutation`] (or [`Room::try_mutation`]),
//! which diffs the canonical serialization of document and presence around the
//! caller's closure to decide whether anything changed and whether the change
//! becomes an undo step.

use crate::config::RoomConfig;
use crate::document::Document;
use crate::error::{RoomError, RoomResult};
use crate::history::History;
use crate::presence::{Presence, PresenceOptions, PresencePatch, User};
use crate::snapshot::{Snapshot, StateDigest};

/// Handle returned by [`Room::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(u64, &RoomView<'_>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn notify(&mut self, version: u64, view: &RoomView<'_>) {
        for (_, listener) in &mut self.entries {
            listener(version, view);
        }
    }
}

/// Read-only projection of a room.
///
/// Views hand out shared references only; the borrow checker keeps readers
/// from mutating live state behind the mutation runner's back.
#[derive(Clone, Copy)]
pub struct RoomView<'a> {
    version: u64,
    document: &'a Document,
    me: &'a User,
    others: &'a [User],
    history: &'a History,
}

impl<'a> RoomView<'a> {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The shared document.
    pub fn storage(&self) -> &'a Document {
        self.document
    }

    /// The local user.
    pub fn self_user(&self) -> &'a User {
        self.me
    }

    pub fn presence(&self) -> &'a Presence {
        &self.me.presence
    }

    /// Remote users, as last reported by the transport.
    pub fn others(&self) -> &'a [User] {
        self.others
    }

    pub fn other(&self, connection_id: u32) -> Option<&'a User> {
        self.others
            .iter()
            .find(|user| user.connection_id == connection_id)
    }

    pub fn other_connection_ids(&self) -> Vec<u32> {
        self.others.iter().map(|user| user.connection_id).collect()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

/// What a mutation closure gets to work with.
pub struct MutationContext<'a> {
    document: &'a mut Document,
    me: &'a mut User,
    presence_wants_history: bool,
}

impl MutationContext<'_> {
    /// The live document.
    pub fn storage(&self) -> &Document {
        &*self.document
    }

    /// The live document, writable.
    pub fn storage_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    /// The local user's identity and presence.
    pub fn self_user(&self) -> &User {
        &*self.me
    }

    pub fn presence(&self) -> &Presence {
        &self.me.presence
    }

    /// Shallow-merge `patch` into the local presence.
    pub fn set_presence(&mut self, patch: PresencePatch, options: PresenceOptions) {
        patch.apply(&mut self.me.presence);
        if options.add_to_history {
            self.presence_wants_history = true;
        }
    }
}

/// A single local replica of a collaborative canvas.
pub struct Room {
    config: RoomConfig,
    document: Document,
    me: User,
    others: Vec<User>,
    history: History,
    version: u64,
    listeners: Listeners,
}

impl Room {
    /// Open a room with default configuration.
    pub fn new(initial_document: Document, initial_presence: Presence) -> Self {
        Self::with_config(RoomConfig::default(), initial_document, initial_presence)
    }

    /// Open a room. The initial state is taken as-is.
    pub fn with_config(
        config: RoomConfig,
        initial_document: Document,
        initial_presence: Presence,
    ) -> Self {
        if !initial_document.is_consistent() {
            log::warn!(
                "room {}: initial document has mismatched layers and layer ids",
                config.room_id
            );
        }
        let me = User::new(
            config.connection_id,
            config.user_name.clone(),
            initial_presence,
        );
        let history = History::new(config.max_undo_history);
        log::info!(
            "room {}: opened with {} layer(s)",
            config.room_id,
            initial_document.len()
        );
        Self {
            config,
            document: initial_document,
            me,
            others: Vec::new(),
            history,
            version: 0,
            listeners: Listeners::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.room_id
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Monotonic counter bumped on every observable change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn view(&self) -> RoomView<'_> {
        RoomView {
            version: self.version,
            document: &self.document,
            me: &self.me,
            others: &self.others,
            history: &self.history,
        }
    }

    pub fn storage(&self) -> &Document {
        &self.document
    }

    pub fn self_user(&self) -> &User {
        &self.me
    }

    pub fn presence(&self) -> &Presence {
        &self.me.presence
    }

    pub fn others(&self) -> &[User] {
        &self.others
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn past_len(&self) -> usize {
        self.history.past().len()
    }

    pub fn future_len(&self) -> usize {
        self.history.future().len()
    }

    /// Whether a `pause_history` batch is open.
    pub fn is_paused(&self) -> bool {
        self.history.is_paused()
    }

    /// Run `f` against the live state and record its effect.
    ///
    /// A closure that leaves document and presence serialization-equal has no
    /// effect on history or version. Document changes always become an undo
    /// step; presence-only changes only when requested through
    /// [`PresenceOptions::add_to_history`].
    pub fn run_mutation<T>(
        &mut self,
        f: impl FnOnce(&mut MutationContext<'_>) -> T,
    ) -> RoomResult<T> {
        self.try_mutation(|ctx| Ok::<T, RoomError>(f(ctx)))
    }

    /// Like [`Room::run_mutation`] for closures that can fail.
    ///
    /// An `Err` is returned unchanged and records no history entry. Whatever
    /// the closure already changed stays changed and is still announced to
    /// listeners.
    ///
    /// Non-finite numbers all serialize as `null`, so switching a field between
    /// NaN and an infinity is not detected as a change. Such writes are logged.
    pub fn try_mutation<T, E>(
        &mut self,
        f: impl FnOnce(&mut MutationContext<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RoomError>,
    {
        let before_digest = StateDigest::of(&self.document, &self.me.presence)?;
        let before = (!self.history.is_paused())
            .then(|| Snapshot::capture(&self.document, &self.me.presence));

        let mut ctx = MutationContext {
            document: &mut self.document,
            me: &mut self.me,
            presence_wants_history: false,
        };
        let result = f(&mut ctx);
        let presence_wants_history = ctx.presence_wants_history;

        if !self.document.is_finite() {
            log::warn!(
                "room {}: document holds non-finite values, changes to them may go unnoticed",
                self.config.room_id
            );
        }

        let after_digest = StateDigest::of(&self.document, &self.me.presence)?;
        let storage_changed = before_digest.document != after_digest.document;
        let presence_changed = before_digest.presence != after_digest.presence;

        if !storage_changed && !presence_changed {
            log::trace!("room {}: mutation changed nothing", self.config.room_id);
            return result;
        }

        if result.is_err() {
            log::debug!(
                "room {}: mutation failed after changing state, not recorded",
                self.config.room_id
            );
        } else if storage_changed || presence_wants_history {
            self.history.commit(before);
        }

        self.bump();
        result
    }

    /// Patch the local presence in a mutation of its own.
    pub fn set_presence(
        &mut self,
        patch: PresencePatch,
        options: PresenceOptions,
    ) -> RoomResult<()> {
        self.run_mutation(|ctx| ctx.set_presence(patch, options))
    }

    /// Start batching history. Pairs with [`Room::resume_history`]; nests.
    pub fn pause_history(&mut self) {
        let Self {
            history,
            document,
            me,
            ..
        } = &mut *self;
        history.pause(|| Snapshot::capture(document, &me.presence));
    }

    /// Close a batch. The outermost resume records one step if anything changed.
    pub fn resume_history(&mut self) {
        if self.history.resume() {
            self.bump();
        }
    }

    /// Restore the state before the last recorded change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Self {
            history,
            document,
            me,
            ..
        } = &mut *self;
        match history.undo(|| Snapshot::capture(document, &me.presence)) {
            Some(previous) => {
                self.install(previous);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Self {
            history,
            document,
            me,
            ..
        } = &mut *self;
        match history.redo(|| Snapshot::capture(document, &me.presence)) {
            Some(next) => {
                self.install(next);
                true
            }
            None => false,
        }
    }

    fn install(&mut self, snapshot: Snapshot) {
        let (document, presence) = snapshot.into_parts();
        self.document = document;
        self.me.presence = presence;
        self.bump();
    }

    /// Add or replace a remote user's record. Never enters history.
    pub fn upsert_other(&mut self, user: User) {
        if user.connection_id == self.me.connection_id {
            log::warn!(
                "room {}: ignoring remote record with local connection id {}",
                self.config.room_id,
                user.connection_id
            );
            return;
        }
        match self
            .others
            .iter_mut()
            .find(|other| other.connection_id == user.connection_id)
        {
            Some(existing) if *existing == user => return,
            Some(existing) => *existing = user,
            None => self.others.push(user),
        }
        self.bump();
    }

    /// Drop a remote user's record.
    pub fn remove_other(&mut self, connection_id: u32) -> Option<User> {
        let pos = self
            .others
            .iter()
            .position(|other| other.connection_id == connection_id)?;
        let removed = self.others.remove(pos);
        self.bump();
        Some(removed)
    }

    /// Register a callback run after every observable change.
    pub fn subscribe(&mut self, listener: impl FnMut(u64, &RoomView<'_>) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn bump(&mut self) {
        self.version += 1;
        let Self {
            version,
            document,
            me,
            others,
            history,
            listeners,
            ..
        } = self;
        let view = RoomView {
            version: *version,
            document: &*document,
            me: &*me,
            others: others.as_slice(),
            history: &*history,
        };
        listeners.notify(*version, &view);
    }
}
