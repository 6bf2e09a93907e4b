//! Event bus - synchronous multi-subscriber notifications
//!
//! Listeners run in registration order at the moment an event is emitted.
//! A listener may unsubscribe itself (or any other listener) while an emit is
//! in progress; removed listeners are not called again, and listeners added
//! mid-emit only see later events.

use std::cell::{Cell, RefCell};
use std::fmt;

use serde::Serialize;

/// Outbound notifications from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted { rows: u16, columns: u16 },
    PreviewEnded,
    ScoreChanged { score: u32 },
    ComboChanged { combo: u32 },
    /// A streak ended; carries the final combo value.
    ComboBroken { combo: u32 },
    MovesChanged { remaining: u32 },
    PairMatched { first: usize, second: usize },
    PairMismatched { first: usize, second: usize },
    GameWon,
    /// The move budget is exhausted.
    GameOver,
}

/// Discriminant of [`GameEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    RoundStarted,
    PreviewEnded,
    ScoreChanged,
    ComboChanged,
    ComboBroken,
    MovesChanged,
    PairMatched,
    PairMismatched,
    GameWon,
    GameOver,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::RoundStarted { .. } => EventKind::RoundStarted,
            GameEvent::PreviewEnded => EventKind::PreviewEnded,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::ComboChanged { .. } => EventKind::ComboChanged,
            GameEvent::ComboBroken { .. } => EventKind::ComboBroken,
            GameEvent::MovesChanged { .. } => EventKind::MovesChanged,
            GameEvent::PairMatched { .. } => EventKind::PairMatched,
            GameEvent::PairMismatched { .. } => EventKind::PairMismatched,
            GameEvent::GameWon => EventKind::GameWon,
            GameEvent::GameOver => EventKind::GameOver,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&GameEvent)>;

struct Listener {
    id: SubscriptionId,
    /// `None` listens to everything.
    kind: Option<EventKind>,
    /// Taken out while the callback runs.
    callback: Option<Callback>,
}

#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of event.
    pub fn subscribe(
        &self,
        kind: EventKind,
        callback: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.add(Some(kind), Box::new(callback))
    }

    /// Listen to every event.
    pub fn subscribe_all(&self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.add(None, Box::new(callback))
    }

    fn add(&self, kind: Option<EventKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            kind,
            callback: Some(callback),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to every matching listener, in registration order.
    pub fn emit(&self, event: GameEvent) {
        let kind = event.kind();
        let targets: Vec<SubscriptionId> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind.map_or(true, |k| k == kind))
            .map(|l| l.id)
            .collect();

        for id in targets {
            let taken = self
                .listeners
                .borrow_mut()
                .iter_mut()
                .find(|l| l.id == id)
                .and_then(|l| l.callback.take());
            let Some(mut callback) = taken else {
                continue;
            };

            callback(&event);

            // Put it back unless the listener was removed while running.
            if let Some(listener) = self
                .listeners
                .borrow_mut()
                .iter_mut()
                .find(|l| l.id == id)
            {
                listener.callback = Some(callback);
            }
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
