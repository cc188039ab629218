//! Logging setup
//!
//! The library only emits through the `log` facade. Binaries pick the
//! backend; tests route it through `env_logger` with [`try_init`].

/// Install `env_logger`, ignoring a logger that is already installed
///
/// Safe to call from every test and from applications that may have set up
/// their own logger first.
pub fn try_init() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
