use std::sync::atomic::{AtomicU8, Ordering};

/// Identify action state machine.
///
/// State transitions:
/// - Idle -> Requesting (identify action issued)
/// - Requesting -> Idle (result delivered, success or failure)
///
/// A second identify action while Requesting is refused rather than queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IdentifyState {
    /// No request outstanding.
    Idle = 0,
    /// A prediction request is in flight.
    Requesting = 1,
}

impl From<u8> for IdentifyState {
    fn from(value: u8) -> Self {
        match value {
            0 => IdentifyState::Idle,
            _ => IdentifyState::Requesting,
        }
    }
}

impl From<IdentifyState> for u8 {
    fn from(state: IdentifyState) -> Self {
        state as u8
    }
}

/// Atomic wrapper for IdentifyState for lock-free reads.
#[derive(Debug)]
pub struct AtomicIdentifyState(AtomicU8);

impl AtomicIdentifyState {
    pub fn new(state: IdentifyState) -> Self {
        Self(AtomicU8::new(state.into()))
    }

    pub fn load(&self) -> IdentifyState {
        self.0.load(Ordering::Acquire).into()
    }

    fn store(&self, state: IdentifyState) {
        self.0.store(state.into(), Ordering::Release);
    }

    /// Compare and swap, returns true if successful.
    fn compare_exchange(&self, current: IdentifyState, new: IdentifyState) -> bool {
        self.0
            .compare_exchange(current.into(), new.into(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Move Idle -> Requesting. The returned guard moves back to Idle when
    /// dropped, so an abandoned request future still releases the state.
    pub fn begin(&self) -> Option<RequestGuard<'_>> {
        if self.compare_exchange(IdentifyState::Idle, IdentifyState::Requesting) {
            Some(RequestGuard { state: self })
        } else {
            None
        }
    }
}

impl Default for AtomicIdentifyState {
    fn default() -> Self {
        Self::new(IdentifyState::Idle)
    }
}

/// Holds the Requesting state for the lifetime of one exchange.
#[derive(Debug)]
pub struct RequestGuard<'a> {
    state: &'a AtomicIdentifyState,
}

impl Drop for RequestGuard<'_> {
    fn drop(&mut self) {
        self.state.store(IdentifyState::Idle);
    }
}
