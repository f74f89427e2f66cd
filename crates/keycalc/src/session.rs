//! Calculator session: an engine plus its tape
//!
//! This is the surface a shell talks to. It forwards keys to the
//! [`Engine`] and records every completed evaluation on the [`Tape`].

use crate::core::{Engine, Snapshot};
use crate::keypad::Key;
use crate::tape::Tape;
use tracing::debug;

/// Engine and tape for one calculator session
#[derive(Debug, Clone, Default)]
pub struct Session {
    engine: Engine,
    tape: Tape,
}

impl Session {
    /// Creates a session with a default-sized tape
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose tape keeps at most `max_entries`
    #[must_use]
    pub fn with_tape_capacity(max_entries: usize) -> Self {
        Self {
            engine: Engine::new(),
            tape: Tape::with_capacity(max_entries),
        }
    }

    /// Sends one key and returns the new display
    pub fn press(&mut self, key: Key) -> &str {
        let before = matches!(key, Key::Equals | Key::Function(_))
            .then(|| self.engine.display().to_string());

        self.engine.press(key);

        if let Some(before) = before {
            self.record(key, before);
        }
        self.engine.display()
    }

    /// Sends every key in order and returns the final display
    pub fn press_all<I>(&mut self, keys: I) -> &str
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
        self.engine.display()
    }

    fn record(&mut self, key: Key, before: String) {
        if self.engine.is_error() {
            return;
        }
        let after = self.engine.display();
        let expression = match key {
            Key::Function(f) => format!("{} {before}", f.label()),
            _ if after != before => before,
            _ => return,
        };
        debug!(%expression, result = after, "recorded on tape");
        self.tape.record(expression, after);
    }

    /// Current display string
    #[must_use]
    pub fn display(&self) -> &str {
        self.engine.display()
    }

    /// The underlying engine
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Completed evaluations, oldest first
    #[must_use]
    pub const fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Empties the tape without touching the engine
    pub fn clear_tape(&mut self) {
        self.tape.clear();
    }

    /// Serializable view of the engine state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }
}
