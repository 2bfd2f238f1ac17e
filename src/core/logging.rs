//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=canopy_gen=trace` to see every refused voxel write.
///
/// # Example
/// ```
/// canopy_gen::core::logging::init();
/// log::info!("Placing features");
/// ```
pub fn init() {
    // An embedding host may already have installed a logger
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
