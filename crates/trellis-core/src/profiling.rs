//! Puffin scopes for the UI hot paths.
//!
//! Layout queries, the tree update and render walks and hit-testing open
//! `profile_function!` scopes. They cost next to nothing until scopes are
//! switched on with [`set_scopes_enabled`] or [`init_profiling`].

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Where recorded scopes are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Serve frames to `puffin_viewer` over HTTP.
    #[cfg(feature = "profiling")]
    PuffinHttp,
}

/// Address the puffin_http server listens on.
#[cfg(feature = "profiling")]
pub const PUFFIN_ADDRESS: &str = "0.0.0.0:8585";

#[cfg(feature = "profiling")]
static PUFFIN_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Switch scope recording on or off.
pub fn set_scopes_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
}

pub fn scopes_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Turn scopes on and start the given backend.
///
/// ```no_run
/// use trellis_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        #[cfg(feature = "profiling")]
        ProfilingBackend::PuffinHttp => {
            set_scopes_enabled(true);
            if PUFFIN_SERVER.get().is_some() {
                return;
            }
            match puffin_http::Server::new(PUFFIN_ADDRESS) {
                Ok(server) => {
                    tracing::info!("Puffin server listening on http://{}", PUFFIN_ADDRESS);
                    let _ = PUFFIN_SERVER.set(server);
                }
                Err(e) => tracing::error!("Failed to start puffin server: {}", e),
            }
        }
    }
}

/// Close the current profiler frame. Call once per frame, before `UiManager::update`.
#[inline]
pub fn new_frame() {
    GlobalProfiler::lock().new_frame();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_scopes() {
        set_scopes_enabled(true);
        assert!(scopes_enabled());
        {
            profile_scope!("test_scope");
        }
        new_frame();
        set_scopes_enabled(false);
        assert!(!scopes_enabled());
    }
}
