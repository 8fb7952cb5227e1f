//! Per-context pipeline state tracking.
//!
//! A [`BindingStateCache`] mirrors what is currently bound to one rendering
//! context and forwards a [`StateCommand`](crate::backend::StateCommand) to its
//! [`CommandSink`](crate::backend::CommandSink) only when the requested value
//! differs from the cached one. The [`MemoryBarrierTracker`] it owns decides
//! when incoherent writes need a barrier before they are read.

mod barriers;
mod state_cache;

pub use barriers::MemoryBarrierTracker;
pub use state_cache::{BindingStateCache, BoundImageInfo};

use crate::device::DeviceCapabilities;

/// Capabilities a context consults before issuing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextCaps {
    /// Image units can be bound.
    pub image_load_store: bool,
    /// Memory barriers can be issued.
    pub memory_barriers: bool,
    /// Patch vertex count can be set.
    pub tessellation: bool,
    /// Wireframe rasterization is available.
    pub fill_mode_selection: bool,
    /// Number of texture units, which bounds texture unit indices.
    pub max_combined_texture_units: u32,
    /// Number of draw buffers that accept per-target blend state.
    pub max_draw_buffers: u32,
    /// Flush pending barriers on invalidation instead of dropping them.
    pub flush_barriers_on_invalidate: bool,
}

impl ContextCaps {
    /// Set the number of texture units.
    pub fn with_max_combined_texture_units(mut self, units: u32) -> Self {
        self.max_combined_texture_units = units;
        self
    }

    /// Set the number of draw buffers.
    pub fn with_max_draw_buffers(mut self, count: u32) -> Self {
        self.max_draw_buffers = count;
        self
    }

    /// Enable or disable image unit binding.
    pub fn with_image_load_store(mut self, supported: bool) -> Self {
        self.image_load_store = supported;
        self
    }

    /// Enable or disable memory barriers.
    pub fn with_memory_barriers(mut self, supported: bool) -> Self {
        self.memory_barriers = supported;
        self
    }

    /// Enable or disable patch vertex count.
    pub fn with_tessellation(mut self, supported: bool) -> Self {
        self.tessellation = supported;
        self
    }

    /// Enable or disable fill mode selection.
    pub fn with_fill_mode_selection(mut self, supported: bool) -> Self {
        self.fill_mode_selection = supported;
        self
    }

    /// Choose whether invalidation flushes or drops pending barriers.
    pub fn with_flush_barriers_on_invalidate(mut self, flush: bool) -> Self {
        self.flush_barriers_on_invalidate = flush;
        self
    }
}

impl From<&DeviceCapabilities> for ContextCaps {
    fn from(caps: &DeviceCapabilities) -> Self {
        Self {
            image_load_store: caps.image_load_store,
            memory_barriers: caps.memory_barriers,
            tessellation: caps.tessellation,
            fill_mode_selection: caps.fill_mode_selection,
            max_combined_texture_units: caps.max_combined_texture_units,
            max_draw_buffers: caps.max_draw_buffers,
            flush_barriers_on_invalidate: caps.flush_barriers_on_invalidate,
        }
    }
}

impl Default for ContextCaps {
    fn default() -> Self {
        Self::from(&DeviceCapabilities::default())
    }
}

/// Cached value of a boolean pipeline toggle.
///
/// `Unknown` compares unequal to both `true` and `false`, so the first call
/// after creation or invalidation always reaches the native API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnableState {
    #[default]
    Unknown,
    Enabled,
    Disabled,
}

impl EnableState {
    /// Known value of the toggle.
    pub fn get(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Enabled => Some(true),
            Self::Disabled => Some(false),
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl From<bool> for EnableState {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl PartialEq<bool> for EnableState {
    fn eq(&self, other: &bool) -> bool {
        self.get() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_matches_nothing() {
        assert_ne!(EnableState::Unknown, true);
        assert_ne!(EnableState::Unknown, false);
        assert_eq!(EnableState::from(true), true);
        assert_eq!(EnableState::from(false), false);
        assert_ne!(EnableState::Enabled, false);
    }

    #[test]
    fn test_caps_from_device() {
        let device_caps = DeviceCapabilities {
            max_combined_texture_units: 16,
            tessellation: false,
            ..DeviceCapabilities::default()
        };
        let caps = ContextCaps::from(&device_caps);
        assert_eq!(caps.max_combined_texture_units, 16);
        assert!(!caps.tessellation);
        assert!(caps.memory_barriers);
    }

    #[test]
    fn test_caps_builders() {
        let caps = ContextCaps::default()
            .with_max_draw_buffers(4)
            .with_flush_barriers_on_invalidate(false);
        assert_eq!(caps.max_draw_buffers, 4);
        assert!(!caps.flush_barriers_on_invalidate);
    }
}
