//! Native logger initialization, grounded on the teacher's `src/logger.rs`:
//! a one-shot `flexi_logger` setup behind the `log` facade, so evaluator
//! internals can emit `trace!`/`debug!`/`warn!` without pulling a concrete
//! backend into the library's public API.

use std::sync::atomic::{AtomicBool, Ordering};

static INIT: AtomicBool = AtomicBool::new(false);

/// Initializes the logger with debug mode, logging all messages including
/// scope-creation and deferred-operator trace output.
pub fn init_logger_debug() {
    if !INIT.swap(true, Ordering::SeqCst) {
        init("cantus_core=trace");
    }
}

/// Initializes the logger with default mode, only logging warnings and above.
pub fn init_logger() {
    if !INIT.swap(true, Ordering::SeqCst) {
        init("cantus_core=warn");
    }
}

fn init(spec: &str) {
    flexi_logger::Logger::try_with_env_or_str(spec)
        .expect("failed to initialize logger")
        .start()
        .expect("failed to start logger");
}
