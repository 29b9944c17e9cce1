//! Panic trapping for test cases.
//!
//! Raised assertion failures and unexpected panics both unwind out of user code. The trap catches the unwind and
//! keeps the default hook quiet while it is active, so the reporter is the only place a failure is printed.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::diagnostics::SourceLocation;

/// The payload of a caught panic plus where it was raised, when the hook saw it.
pub(crate) struct Caught {
    pub payload: Box<dyn Any + Send>,
    pub location: Option<SourceLocation>,
}

thread_local! {
    static TRAPPING: Cell<bool> = const { Cell::new(false) };
    static LAST_LOCATION: Cell<Option<SourceLocation>> = const { Cell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Wraps whatever hook is installed first; panics outside a trap still reach it.
fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if TRAPPING.with(Cell::get) {
                LAST_LOCATION.with(|slot| slot.set(info.location().map(SourceLocation::from)));
                return;
            }
            previous(info);
        }));
    });
}

/// Run `f`, turning a panic into `Err(Caught)`.
///
/// Traps nest: an inner trap restores the outer trap's state when it finishes.
pub(crate) fn trap<R>(f: impl FnOnce() -> R) -> Result<R, Caught> {
    install_hook();
    let was_trapping = TRAPPING.with(|t| t.replace(true));
    LAST_LOCATION.with(|slot| slot.set(None));

    let result = panic::catch_unwind(AssertUnwindSafe(f));

    TRAPPING.with(|t| t.set(was_trapping));
    result.map_err(|payload| Caught {
        payload,
        location: LAST_LOCATION.with(Cell::take),
    })
}

/// Keep unwinding with a caught panic.
///
/// `resume_unwind` skips the hook, so the location is put back for the next trap out to pick up.
pub(crate) fn resume(caught: Caught) -> ! {
    LAST_LOCATION.with(|slot| slot.set(caught.location));
    panic::resume_unwind(caught.payload)
}

/// Best-effort text of a panic payload (`panic!` produces `&str` or `String`).
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
