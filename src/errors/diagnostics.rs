//! The single diagnostic channel.
//!
//! Every error, whatever its category, is surfaced through [`report`]. The
//! diagnostic line is emitted through `tracing`; aborting errors are handed
//! back to the caller so they can be propagated with `?`.

use tracing::{error, warn};

use super::errors::Error;

/// Reports a diagnostic and decides whether parsing stops.
///
/// Returns `Err(error)` when `abort` is set, `Ok(())` when the error is
/// tolerated (only lexical errors in edit mode are).
pub fn report(error: Error, abort: bool) -> Result<(), Error> {
    if abort {
        return fail(error);
    }

    warn!(kind = %error.kind(), "{}", error);
    Ok(())
}

/// Reports an error that always aborts.
pub fn fail<T>(error: Error) -> Result<T, Error> {
    error!(kind = %error.kind(), "{}", error);
    Err(error)
}
