/// Engine-wide configuration for Trellis.
#[derive(Debug, Clone)]
pub struct Config {
    pub profiling: ProfilingMode,
    /// `tracing` filter directive handed to [`crate::logging::init_with_filter`].
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profiling: ProfilingMode::Off,
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Apply the logging and profiling settings to the running process.
    pub fn install(&self) {
        crate::logging::init_with_filter(&self.log_filter);
        match self.profiling {
            ProfilingMode::Off => {}
            ProfilingMode::On => crate::profiling::set_scopes_enabled(true),
            #[cfg(feature = "profiling")]
            ProfilingMode::WithWebserver => {
                crate::profiling::init_profiling(crate::profiling::ProfilingBackend::PuffinHttp)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to 'puffin_viewer' over HTTP
    #[cfg(feature = "profiling")]
    WithWebserver,
}
