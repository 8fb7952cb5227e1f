//! # RedLilium HAL
//!
//! Hardware abstraction layer between the renderer and a native graphics API.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`BindingStateCache`] - Per-context cache that issues bind and set calls only when state changes
//! - [`MemoryBarrierTracker`] - Lazy insertion of barriers after incoherent writes
//! - [`validate_texture_desc`] - Defaulting and structural checks of texture descriptors
//! - [`correct_texture_view_desc`] - Defaulting and range checks of view descriptors
//! - [`GraphicsDevice`] - Texture and view creation with default views
//! - Format metadata and native token lookups in [`types`] and [`native`]
//!
//! ## Example
//!
//! ```ignore
//! use redlilium_hal::{BindFlags, DummyCommandSink, GraphicsDevice, TextureDescriptor, TextureFormat};
//!
//! let device = GraphicsDevice::new_dummy();
//! let texture = device.create_texture(
//!     &TextureDescriptor::new_2d(256, 256, TextureFormat::Rgba8Unorm, BindFlags::SHADER_RESOURCE)
//!         .with_mip_levels(0),
//! )?;
//!
//! let mut context = device.create_context(DummyCommandSink::new());
//! context.bind_texture(0, texture.bind_target().unwrap(), texture.handle())?;
//! ```

pub mod backend;
pub mod context;
pub mod device;
pub mod error;
pub mod native;
pub mod resources;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use backend::{CommandSink, DummyBackend, DummyCommandSink, GpuBackend, StateCommand};
pub use context::{BindingStateCache, ContextCaps, EnableState, MemoryBarrierTracker};
pub use device::{DeviceCapabilities, GraphicsDevice};
pub use error::{GraphicsError, TextureDescError, ViewDescError};
pub use resources::{Texture, TextureView};
pub use types::{
    BindFlags, MemoryBarrierFlags, ResourceDimension, TextureDescriptor, TextureFormat,
    TextureViewDescriptor, TextureViewType,
};
pub use validation::{correct_texture_view_desc, validate_texture_desc};

/// HAL library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the HAL.
///
/// Builds the format table so the first texture creation does not pay for it.
pub fn init() {
    let _ = TextureFormat::Unknown.info();
    log::info!("RedLilium HAL v{} initialized", VERSION);
}
