//! Listener set notified after a pack has been installed.

use std::sync::{Arc, Mutex};

use datapack_state::ContentRecord;

pub type InstallListener = Arc<dyn Fn(&ContentRecord) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, InstallListener)>,
}

/// Observers of completed installs (UI refresh, cache invalidation, ...).
///
/// Listeners are called synchronously, after the metadata write for the
/// install has finished. Clones share the same listener set.
#[derive(Clone, Default)]
pub struct InstallEvents {
    listeners: Arc<Mutex<Listeners>>,
}

impl std::fmt::Debug for InstallEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl InstallEvents {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&self, listener: impl Fn(&ContentRecord) + Send + Sync + 'static) -> ListenerId {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.entries.len();
        listeners.entries.retain(|(existing, _)| *existing != id);
        listeners.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .map(|l| l.entries.len())
            .unwrap_or_default()
    }

    pub fn emit(&self, record: &ContentRecord) {
        // Snapshot so a listener may subscribe or unsubscribe without deadlocking.
        let snapshot: Vec<InstallListener> = {
            let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            listeners.entries.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in snapshot {
            listener(record);
        }
    }
}
