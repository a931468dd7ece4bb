use crate::state::screen::ScreenState;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Latest-value broadcast slot for [`ScreenState`].
///
/// A subscriber first receives the current value, then every later publish
/// in the order it happened. Publishing a value equal to the current one is
/// a no-op.
#[derive(Debug, Default)]
pub struct StatePublisher {
    inner: Mutex<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    current: ScreenState,
    listeners: Vec<mpsc::UnboundedSender<ScreenState>>,
}

impl StatePublisher {
    pub fn new(initial: ScreenState) -> Self {
        Self {
            inner: Mutex::new(Slot { current: initial, listeners: Vec::new() }),
        }
    }

    /// Returns whether the value changed and was broadcast.
    pub fn publish(&self, next: ScreenState) -> bool {
        let mut slot = self.inner.lock();
        if slot.current == next {
            return false;
        }
        // Dropped subscriptions are pruned here.
        slot.listeners.retain(|tx| tx.send(next.clone()).is_ok());
        slot.current = next;
        true
    }

    pub fn current(&self) -> ScreenState {
        self.inner.lock().current.clone()
    }

    pub fn subscribe(&self) -> StateSubscription {
        let mut slot = self.inner.lock();
        let (tx, rx) = mpsc::unbounded_channel();
        // Cannot fail: we hold the receiver.
        let _ = tx.send(slot.current.clone());
        slot.listeners.push(tx);
        StateSubscription { rx }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

/// Ordered stream of published states.
#[derive(Debug)]
pub struct StateSubscription {
    rx: mpsc::UnboundedReceiver<ScreenState>,
}

impl StateSubscription {
    /// Next state, or `None` once the publisher is gone and the backlog drained.
    pub async fn next(&mut self) -> Option<ScreenState> {
        self.rx.recv().await
    }

    /// Next already-published state without waiting.
    pub fn try_next(&mut self) -> Option<ScreenState> {
        self.rx.try_recv().ok()
    }

    /// Everything published so far and not yet consumed.
    pub fn drain(&mut self) -> Vec<ScreenState> {
        let mut states = Vec::new();
        while let Some(state) = self.try_next() {
            states.push(state);
        }
        states
    }
}
