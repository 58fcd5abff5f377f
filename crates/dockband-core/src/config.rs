//! Configuration for the dockband engine.

use crate::profiling::ProfilingBackend;

/// Default distance in pixels the pointer must travel before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: i32 = 5;

/// Dock host configuration.
#[derive(Debug, Clone)]
pub struct DockConfig {
    /// Pointer travel (pixels) before a press turns into a drag.
    pub drag_threshold: i32,
    /// Whether items may be torn off into the floating pool.
    pub allow_floating: bool,
    /// Profiling mode.
    pub profiling: ProfilingMode,
}

impl Default for DockConfig {
    fn default() -> Self {
        DockConfig {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            allow_floating: true,
            profiling: ProfilingMode::Off,
        }
    }
}

impl DockConfig {
    /// Set the drag threshold.
    pub fn drag_threshold(mut self, threshold: i32) -> Self {
        self.drag_threshold = threshold.max(0);
        self
    }

    /// Set whether undocking to the floating pool is allowed.
    pub fn allow_floating(mut self, allow: bool) -> Self {
        self.allow_floating = allow;
        self
    }

    /// Set the profiling mode.
    pub fn profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }

    /// Check whether a pointer offset exceeds the drag threshold.
    pub fn exceeds_threshold(&self, dx: i32, dy: i32) -> bool {
        let distance_sq = (dx as i64).pow(2) + (dy as i64).pow(2);
        distance_sq >= (self.drag_threshold as i64).pow(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to 'puffin_viewer'
    WithWebserver,
}

impl ProfilingMode {
    /// Backend to start for this mode, if any.
    pub fn backend(&self) -> Option<ProfilingBackend> {
        match self {
            ProfilingMode::Off => None,
            ProfilingMode::On => Some(ProfilingBackend::InProcess),
            #[cfg(feature = "profiling")]
            ProfilingMode::WithWebserver => Some(ProfilingBackend::PuffinHttp),
            #[cfg(not(feature = "profiling"))]
            ProfilingMode::WithWebserver => Some(ProfilingBackend::InProcess),
        }
    }
}
