//! Graphics device.
//!
//! The [`GraphicsDevice`] is the main interface for creating GPU resources
//! and rendering contexts.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::backend::{CommandSink, GpuBackend, create_backend};
use crate::context::{BindingStateCache, ContextCaps};
use crate::error::{GraphicsError, TextureDescError, ViewDescError};
use crate::resources::{Texture, TextureView, default_view_descriptors};
use crate::types::{TextureDescriptor, TextureViewDescriptor};
use crate::validation::{correct_texture_view_desc, validate_texture_desc};

/// Capabilities of a graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Maximum texture dimension.
    pub max_texture_dimension: u32,
    /// Command queues available on the device, one bit per queue.
    pub command_queue_mask: u64,
    /// Whether image units can be bound.
    pub image_load_store: bool,
    /// Whether memory barriers can be issued.
    pub memory_barriers: bool,
    /// Whether tessellation is supported.
    pub tessellation: bool,
    /// Whether wireframe rasterization is supported.
    pub fill_mode_selection: bool,
    /// Number of combined texture image units.
    pub max_combined_texture_units: u32,
    /// Number of draw buffers.
    pub max_draw_buffers: u32,
    /// Whether contexts may flush pending barriers when invalidated.
    pub flush_barriers_on_invalidate: bool,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            command_queue_mask: 1,
            image_load_store: true,
            memory_barriers: true,
            tessellation: true,
            fill_mode_selection: true,
            max_combined_texture_units: 32,
            max_draw_buffers: 8,
            flush_barriers_on_invalidate: true,
        }
    }
}

/// A graphics device for creating GPU resources.
///
/// # Thread Safety
///
/// `GraphicsDevice` is `Send + Sync` and can be safely shared across threads.
/// Contexts created from it are driven by one thread each.
///
/// # Example
///
/// ```ignore
/// let device = GraphicsDevice::new_dummy();
///
/// let texture = device.create_texture(&TextureDescriptor::new_2d(
///     1920, 1080,
///     TextureFormat::Rgba8Unorm,
///     BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET,
/// ))?;
/// let mut context = device.create_context(DummyCommandSink::new());
/// ```
pub struct GraphicsDevice {
    name: String,
    capabilities: DeviceCapabilities,
    backend: Arc<dyn GpuBackend>,
    // Track allocated resources (weak references for cleanup/debugging)
    textures: RwLock<Vec<Weak<Texture>>>,
}

impl GraphicsDevice {
    /// Create a device on top of `backend`.
    pub fn new(
        name: impl Into<String>,
        capabilities: DeviceCapabilities,
        backend: Arc<dyn GpuBackend>,
    ) -> Arc<Self> {
        let device = Arc::new(Self {
            name: name.into(),
            capabilities,
            backend,
            textures: RwLock::new(Vec::new()),
        });
        log::info!(
            "GraphicsDevice: created '{}' on {}",
            device.name,
            device.backend.name()
        );
        device
    }

    /// Create a device on the default backend with default capabilities.
    pub fn new_dummy() -> Arc<Self> {
        Self::new("Dummy Device", DeviceCapabilities::default(), create_backend())
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Get the backend the device creates native objects with.
    pub fn backend(&self) -> &Arc<dyn GpuBackend> {
        &self.backend
    }

    fn invalid_description(descriptor: &TextureDescriptor, reason: TextureDescError) -> GraphicsError {
        log::error!("Texture \"{}\": {}", descriptor.name(), reason);
        GraphicsError::InvalidDescription {
            texture: descriptor.name().to_string(),
            reason,
        }
    }

    /// Create a GPU texture and its default views.
    ///
    /// The descriptor is validated first; mip count 0 becomes the full chain.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidDescription`] if the descriptor breaks a
    /// structural rule, names no command queue of this device, or exceeds the
    /// maximum texture dimension. Backend failures are passed through.
    pub fn create_texture(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError> {
        let mut descriptor = descriptor.clone();

        let queues = descriptor.command_queue_mask & self.capabilities.command_queue_mask;
        if queues == 0 {
            return Err(Self::invalid_description(
                &descriptor,
                TextureDescError::NoCommandQueue {
                    requested: descriptor.command_queue_mask,
                    available: self.capabilities.command_queue_mask,
                },
            ));
        }
        descriptor.command_queue_mask = queues;

        let max_dim = self.capabilities.max_texture_dimension;
        let size = descriptor
            .width
            .max(descriptor.height)
            .max(descriptor.depth());
        if size > max_dim {
            return Err(Self::invalid_description(
                &descriptor,
                TextureDescError::TooLarge { size, max: max_dim },
            ));
        }

        let descriptor = validate_texture_desc(&descriptor)?;
        let native = self.backend.create_texture(&descriptor)?;

        let mut default_views = Vec::new();
        for view_desc in default_view_descriptors(&descriptor)? {
            let native_view = self.backend.create_view(&native, &descriptor, &view_desc)?;
            default_views.push((view_desc, native_view));
        }

        let texture = Texture::new(Arc::clone(self), descriptor, native, default_views);

        // Track it
        self.textures.write().push(Arc::downgrade(&texture));

        log::debug!(
            "GraphicsDevice: created texture {:?}, {:?} {}x{}x{}, {} mips",
            texture.label(),
            texture.dimension(),
            texture.width(),
            texture.height(),
            texture.descriptor().depth_or_array_size,
            texture.mip_levels()
        );

        Ok(texture)
    }

    /// Create a view of `texture`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidView`] if the texture lacks the bind
    /// flag the view kind needs or the descriptor cannot be corrected.
    pub fn create_view(
        &self,
        texture: &Arc<Texture>,
        descriptor: &TextureViewDescriptor,
    ) -> Result<Arc<TextureView>, GraphicsError> {
        let texture_desc = texture.descriptor();

        let required = descriptor.view_type.required_bind_flag();
        if !required.is_empty() && !texture_desc.bind_flags.contains(required) {
            let reason = ViewDescError::MissingBindFlag(descriptor.view_type);
            log::error!(
                "Texture view \"{}\" of texture \"{}\": {}",
                descriptor.name(),
                texture_desc.name(),
                reason
            );
            return Err(GraphicsError::InvalidView {
                texture: texture_desc.name().to_string(),
                view: descriptor.name().to_string(),
                reason,
            });
        }

        let corrected = correct_texture_view_desc(texture_desc, descriptor)?;
        let native = self
            .backend
            .create_view(texture.native(), texture_desc, &corrected)?;

        log::debug!(
            "GraphicsDevice: created {} {:?} of texture {:?}",
            corrected.view_type.short_name(),
            corrected.label,
            texture.label()
        );

        Ok(Arc::new(TextureView::new(
            Arc::downgrade(texture),
            corrected,
            native,
        )))
    }

    /// Create a rendering context issuing its state commands to `sink`.
    pub fn create_context<S: CommandSink>(&self, sink: S) -> BindingStateCache<S> {
        BindingStateCache::new(sink, ContextCaps::from(&self.capabilities))
    }

    /// Get the number of live textures created by this device.
    pub fn texture_count(&self) -> usize {
        self.textures
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Clean up dead weak references to released resources.
    pub fn cleanup_dead_resources(&self) {
        self.textures.write().retain(|w| w.strong_count() > 0);
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("backend", &self.backend.name())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// Ensure GraphicsDevice is Send + Sync
static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyBackend;
    use crate::types::{BindFlags, TextureFormat, TextureViewType};

    fn create_test_device() -> Arc<GraphicsDevice> {
        GraphicsDevice::new_dummy()
    }

    #[test]
    fn test_device_name() {
        let device = create_test_device();
        assert_eq!(device.name(), "Dummy Device");
        assert_eq!(device.backend().name(), "Dummy Backend");
    }

    #[test]
    fn test_create_texture() {
        let device = create_test_device();
        let texture = device
            .create_texture(&TextureDescriptor::new_2d(
                512,
                512,
                TextureFormat::Rgba8Unorm,
                BindFlags::SHADER_RESOURCE,
            ))
            .unwrap();
        assert_eq!(texture.width(), 512);
        assert_eq!(texture.height(), 512);
        assert_eq!(device.texture_count(), 1);
    }

    #[test]
    fn test_create_texture_zero_size() {
        let device = create_test_device();
        let result = device.create_texture(&TextureDescriptor::new_2d(
            0,
            512,
            TextureFormat::Rgba8Unorm,
            BindFlags::SHADER_RESOURCE,
        ));
        assert!(matches!(
            result,
            Err(GraphicsError::InvalidDescription {
                reason: TextureDescError::ZeroWidth,
                ..
            })
        ));
    }

    #[test]
    fn test_create_texture_too_large() {
        let device = create_test_device();
        let result = device.create_texture(&TextureDescriptor::new_2d(
            32768,
            16,
            TextureFormat::Rgba8Unorm,
            BindFlags::SHADER_RESOURCE,
        ));
        assert!(matches!(
            result,
            Err(GraphicsError::InvalidDescription {
                reason: TextureDescError::TooLarge { size: 32768, max: 16384 },
                ..
            })
        ));
    }

    #[test]
    fn test_command_queue_mask_intersection() {
        let capabilities = DeviceCapabilities {
            command_queue_mask: 0b011,
            ..DeviceCapabilities::default()
        };
        let device = GraphicsDevice::new("Two Queues", capabilities, Arc::new(DummyBackend::new()));
        let desc = TextureDescriptor::new_2d(8, 8, TextureFormat::Rgba8Unorm, BindFlags::empty());

        let texture = device
            .create_texture(&desc.clone().with_command_queue_mask(0b110))
            .unwrap();
        assert_eq!(texture.descriptor().command_queue_mask, 0b010);

        let result = device.create_texture(&desc.with_command_queue_mask(0b100));
        assert!(matches!(
            result,
            Err(GraphicsError::InvalidDescription {
                reason: TextureDescError::NoCommandQueue { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_create_view_requires_bind_flag() {
        let device = create_test_device();
        let texture = device
            .create_texture(&TextureDescriptor::new_2d(
                64,
                64,
                TextureFormat::Rgba8Unorm,
                BindFlags::SHADER_RESOURCE,
            ))
            .unwrap();

        let result = device.create_view(
            &texture,
            &TextureViewDescriptor::new(TextureViewType::RenderTarget),
        );
        assert!(matches!(
            result,
            Err(GraphicsError::InvalidView {
                reason: ViewDescError::MissingBindFlag(TextureViewType::RenderTarget),
                ..
            })
        ));

        let view = device
            .create_view(
                &texture,
                &TextureViewDescriptor::new(TextureViewType::ShaderResource).with_label("custom"),
            )
            .unwrap();
        assert_eq!(view.descriptor().label.as_deref(), Some("custom"));
        assert!(Arc::ptr_eq(&view.texture().unwrap(), &texture));
    }

    #[test]
    fn test_view_outlives_texture() {
        let device = create_test_device();
        let texture = device
            .create_texture(&TextureDescriptor::new_2d(
                16,
                16,
                TextureFormat::Rgba8Unorm,
                BindFlags::SHADER_RESOURCE,
            ))
            .unwrap();
        let view = Arc::clone(
            texture
                .default_view(TextureViewType::ShaderResource)
                .unwrap(),
        );
        drop(texture);
        assert!(view.texture().is_none());
    }

    #[test]
    fn test_resource_cleanup() {
        let device = create_test_device();
        {
            let _texture = device
                .create_texture(&TextureDescriptor::new_2d(
                    4,
                    4,
                    TextureFormat::R8Unorm,
                    BindFlags::SHADER_RESOURCE,
                ))
                .unwrap();
            assert_eq!(device.texture_count(), 1);
        }
        // Texture dropped
        device.cleanup_dead_resources();
        assert_eq!(device.texture_count(), 0);
    }
}
