//! Process-wide interrupt flag.
//!
//! The binary installs a Ctrl-C handler that sets the flag. The running child
//! receives the terminal's SIGINT on its own, so the handler never has to signal
//! it; the runner observes the flag once the child has exited.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Installs the Ctrl-C handler.
///
/// # Errors
///
/// * If a handler has already been installed for this process
pub fn install_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        log::debug!("Interrupt received");
        INTERRUPTED.store(true, Ordering::SeqCst);
    })
}

/// Whether an interrupt has been received.
#[must_use]
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}
