use std::sync::{Arc, PoisonError, RwLock};

use crossbeam_channel::{Receiver, unbounded};
use uuid::Uuid;

/// Handle returned by `Logger::subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

type Callback = Arc<dyn Fn(&str) + Send + Sync>;

/// Observers of accepted log lines, called in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: RwLock<Vec<(SubscriptionId, Callback)>>,
}

impl Subscribers {
    pub(crate) fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    pub(crate) fn subscribe_channel(&self) -> (SubscriptionId, Receiver<String>) {
        let (sender, receiver) = unbounded::<String>();
        let id = self.subscribe(move |payload| {
            sender.send(payload.to_string()).ok();
        });
        (id, receiver)
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Calls every subscriber with `payload`. The list is copied first so that a
    /// callback may itself log or (un)subscribe.
    pub(crate) fn publish(&self, payload: &str) {
        let snapshot: Vec<Callback> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(payload);
        }
    }
}
