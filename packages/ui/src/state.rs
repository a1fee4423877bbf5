use dioxus::prelude::*;
use store::StateHandle;

/// [`StateHandle`] over a Dioxus signal.
///
/// Actions read with `peek` so running one never subscribes the calling
/// component; views subscribe by reading the signal itself.
pub struct SignalHandle<S: 'static>(Signal<S>);

impl<S: 'static> SignalHandle<S> {
    pub fn new(signal: Signal<S>) -> Self {
        Self(signal)
    }

    pub fn signal(&self) -> Signal<S> {
        self.0
    }
}

impl<S: 'static> Clone for SignalHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SignalHandle<S> {}

impl<S: Clone + 'static> StateHandle<S> for SignalHandle<S> {
    fn snapshot(&self) -> S {
        self.0.peek().clone()
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        let mut signal = self.0;
        f(&mut signal.write());
    }
}
