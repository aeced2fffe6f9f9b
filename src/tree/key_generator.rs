use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tree::Key;

/// Strategy used for allocating node keys.
///
/// - `Uuid`: random v4 UUID strings.
/// - `Sequential`: `n1`, `n2`, ... drawn from a process-wide counter, handy
///   for readable debug dumps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum KeyKind {
    /// Use UUID string values as keys (default).
    #[default]
    Uuid,
    /// Use a process-wide incrementing counter.
    Sequential,
}

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    pub kind: KeyKind,
}

impl KeyGenerator {
    pub fn new(kind: KeyKind) -> Self {
        Self { kind }
    }

    pub fn next_key(&self) -> Key {
        match self.kind {
            KeyKind::Uuid => Key::from(Uuid::new_v4().to_string()),
            KeyKind::Sequential => {
                let id = SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1;
                Key::from(format!("n{id}"))
            }
        }
    }
}

impl Iterator for KeyGenerator {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_key())
    }
}
