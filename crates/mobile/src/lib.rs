use std::panic::PanicHookInfo;

pub mod estimate;
pub mod logging;
pub mod state;

uniffi::setup_scaffolding!();

/// Initialize the library with proper panic handling
/// Call this once at startup from Kotlin/Swift
///
/// Any hook installed earlier (by the host app or [`logging::init_logging`])
/// still runs after this one.
#[uniffi::export]
pub fn init_panic_handler() {
    chain_panic_hook(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("=== RUST PANIC ===");
        eprintln!("{panic_info}");
        eprintln!("Backtrace:\n{backtrace}");
        eprintln!("=== END PANIC ===");
    });
}

/// Install `hook` in front of whatever panic hook is currently set
pub(crate) fn chain_panic_hook(hook: impl Fn(&PanicHookInfo<'_>) + Send + Sync + 'static) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        hook(info);
        previous(info);
    }));
}
