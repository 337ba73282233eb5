pub mod config;
pub mod play;
pub mod timer;
pub mod trust;

/// Single-threaded runtime for commands that run a live countdown.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
}
