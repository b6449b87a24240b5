use std::sync::atomic::{
    AtomicBool,
    Ordering,
};



#[derive(Default)]
pub struct SharedState {
    // While this is false the collector keeps walking the grid. Once set, the
    // collector stops before starting the next combination. A combination
    // that is already in flight, including its pauses, is finished first.
    shut_down: AtomicBool,
}



impl SharedState {
    pub fn request_shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }


    /// Relaxed load, we do not care on exact shut down timing, only that it
    /// happens at the next combination boundary.
    pub fn is_shutting_down(&self) -> bool {
        self.shut_down.load(Ordering::Relaxed)
    }
}
