use std::{panic::PanicHookInfo, sync::Once};

use tracing_subscriber::{
    filter::FilterFn, fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt,
};

const MODULE_PREFIX: &str = "wayfarer";

/// Route `tracing` output to logcat (Android) or stderr, and panics into it
///
/// Safe to call more than once; only the first call installs anything.
#[uniffi::export]
pub fn init_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        if let Err(error) = install_subscriber() {
            eprintln!("failed to initialize logging: {error:?}");
            return;
        }
        crate::chain_panic_hook(panic_hook);
    })
}

fn module_filter() -> FilterFn<impl Fn(&tracing::Metadata<'_>) -> bool> {
    FilterFn::new(|meta| meta.module_path().unwrap_or_default().starts_with(MODULE_PREFIX))
}

#[cfg(target_os = "android")]
fn install_subscriber() -> eyre::Result<()> {
    use tracing_logcat::{LogcatMakeWriter, LogcatTag};

    let tag = LogcatTag::Fixed("Wayfarer-Rust".to_owned());
    let writer = LogcatMakeWriter::new(tag)?;
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().with_level(false).without_time())
        .with_writer(writer)
        .with_ansi(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(module_filter())
        .try_init()?;
    Ok(())
}

#[cfg(not(target_os = "android"))]
fn install_subscriber() -> eyre::Result<()> {
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().without_time())
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(module_filter())
        .try_init()?;
    Ok(())
}

fn panic_hook(info: &PanicHookInfo<'_>) {
    tracing::error!("{info}")
}
