use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

/// At most one in-flight save per owner.
///
/// A second save for the same owner is refused while the first holds its ticket.
/// Tickets release on drop, so a save that errors or is cancelled frees the slot.
#[derive(Debug, Clone, Default)]
pub struct SaveGuard {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

#[derive(Debug)]
pub struct SaveTicket {
    owner_id: Uuid,
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

fn lock(set: &Mutex<HashSet<Uuid>>) -> MutexGuard<'_, HashSet<Uuid>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SaveGuard {
    pub fn try_begin(&self, owner_id: Uuid) -> Option<SaveTicket> {
        if !lock(&self.in_flight).insert(owner_id) {
            return None;
        }
        Some(SaveTicket {
            owner_id,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

impl Drop for SaveTicket {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.owner_id);
    }
}
