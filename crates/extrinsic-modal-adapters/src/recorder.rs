use std::sync::{Arc, Mutex};

use extrinsic_modal_core::{ModalEvent, ModalObserver};

/// Observer that keeps every notification; cloned handles share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ModalEvent>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ModalEvent> {
        match self.events.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(ModalEvent::name).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut g) = self.events.lock() {
            g.clear();
        }
    }
}

impl ModalObserver for RecordingObserver {
    fn notify(&self, event: &ModalEvent) {
        tracing::debug!(event = event.name(), "modal notification");
        if let Ok(mut g) = self.events.lock() {
            g.push(event.clone());
        }
    }
}
