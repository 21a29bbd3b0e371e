//! Process-wide shutdown state.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start.
///
/// The handler only raises the shutdown flag: workers finish the key they are
/// on and the analyzer stops dispatching new ones.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(request_shutdown)?;
    Ok(())
}

/// Raise the shutdown flag. Analyses in progress stop dispatching keys.
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}
