//! GPU texture resource.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use crate::backend::{NativeTexture, NativeView};
use crate::device::GraphicsDevice;
use crate::resources::TextureView;
use crate::types::{
    BindFlags, MemoryBarrierFlags, MipLevelProperties, ResourceDimension, ResourceState,
    TextureBindTarget, TextureDescriptor, TextureFormat, TextureViewDescriptor, TextureViewType,
};
use crate::validation;

/// A GPU texture resource.
///
/// Textures are created by [`GraphicsDevice::create_texture`] and are reference-counted.
/// They hold a strong reference to their parent device, keeping it alive.
///
/// A texture owns the default views implied by its bind flags, the memory
/// barriers still pending after incoherent writes into it, and its current
/// resource state.
///
/// # Example
///
/// ```ignore
/// let texture = device.create_texture(&TextureDescriptor::new_2d(
///     1920, 1080,
///     TextureFormat::Rgba8Unorm,
///     BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET,
/// ))?;
/// let srv = texture.default_view(TextureViewType::ShaderResource);
/// ```
pub struct Texture {
    device: Arc<GraphicsDevice>,
    descriptor: TextureDescriptor,
    native: NativeTexture,
    default_views: [Option<Arc<TextureView>>; 4],
    pending_barriers: AtomicU32,
    state: AtomicU32,
}

impl Texture {
    /// Create a new texture and its default views (called by GraphicsDevice).
    pub(crate) fn new(
        device: Arc<GraphicsDevice>,
        descriptor: TextureDescriptor,
        native: NativeTexture,
        default_views: Vec<(TextureViewDescriptor, NativeView)>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Texture>| {
            let mut views: [Option<Arc<TextureView>>; 4] = Default::default();
            for (view_desc, native_view) in default_views {
                if let Some(slot) = view_desc.view_type.table_slot() {
                    views[slot] = Some(Arc::new(TextureView::new(
                        weak.clone(),
                        view_desc,
                        native_view,
                    )));
                }
            }
            Self {
                device,
                descriptor,
                native,
                default_views: views,
                pending_barriers: AtomicU32::new(0),
                state: AtomicU32::new(ResourceState::empty().bits()),
            }
        })
    }

    /// Get the parent device.
    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    /// Get the validated texture descriptor.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// Get the native texture object.
    pub fn native(&self) -> &NativeTexture {
        &self.native
    }

    /// Integer name of the native texture.
    pub fn handle(&self) -> u32 {
        self.native.handle()
    }

    pub fn dimension(&self) -> ResourceDimension {
        self.descriptor.dimension
    }

    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    /// Depth, 1 for everything but 3D textures.
    pub fn depth(&self) -> u32 {
        self.descriptor.depth()
    }

    /// Array size, 1 for 3D textures.
    pub fn array_size(&self) -> u32 {
        self.descriptor.array_size()
    }

    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    pub fn mip_levels(&self) -> u32 {
        self.descriptor.mip_levels
    }

    pub fn sample_count(&self) -> u32 {
        self.descriptor.sample_count
    }

    pub fn bind_flags(&self) -> BindFlags {
        self.descriptor.bind_flags
    }

    /// Get the texture label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    /// Native binding target of the texture.
    pub fn bind_target(&self) -> Option<TextureBindTarget> {
        TextureBindTarget::from_dimension(self.descriptor.dimension, self.descriptor.sample_count)
    }

    /// Size and memory layout of mip level `mip`.
    pub fn mip_level_properties(&self, mip: u32) -> MipLevelProperties {
        validation::mip_level_properties(&self.descriptor, mip)
    }

    /// Default view of the given kind, if the texture has one.
    pub fn default_view(&self, view_type: TextureViewType) -> Option<&Arc<TextureView>> {
        view_type
            .table_slot()
            .and_then(|slot| self.default_views[slot].as_ref())
    }

    /// Record memory barriers that readers of this texture must wait for.
    ///
    /// Bits are OR-ed into the pending mask.
    pub fn set_pending_memory_barriers(&self, barriers: MemoryBarrierFlags) {
        self.pending_barriers
            .fetch_or(barriers.bits(), Ordering::AcqRel);
    }

    /// Memory barriers pending since the last write into this texture.
    pub fn pending_memory_barriers(&self) -> MemoryBarrierFlags {
        MemoryBarrierFlags::from_bits_truncate(self.pending_barriers.load(Ordering::Acquire))
    }

    pub(crate) fn reset_pending_memory_barriers(&self, barriers: MemoryBarrierFlags) {
        self.pending_barriers
            .store(barriers.bits(), Ordering::Release);
    }

    /// Set the current resource state.
    pub fn set_state(&self, state: ResourceState) {
        self.state.store(state.bits(), Ordering::Release);
    }

    /// Current resource state. Empty if unknown.
    pub fn state(&self) -> ResourceState {
        ResourceState::from_bits_truncate(self.state.load(Ordering::Acquire))
    }

    pub fn is_in_known_state(&self) -> bool {
        !self.state().is_empty()
    }

    /// Returns true if the texture is known to be in `state`.
    pub fn check_state(&self, state: ResourceState) -> bool {
        if !self.is_in_known_state() {
            log::warn!(
                "Texture \"{}\": state is unknown",
                self.descriptor.name()
            );
            return false;
        }
        self.state().contains(state)
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("dimension", &self.descriptor.dimension)
            .field("width", &self.descriptor.width)
            .field("height", &self.descriptor.height)
            .field("depth_or_array_size", &self.descriptor.depth_or_array_size)
            .field("format", &self.descriptor.format)
            .field("bind_flags", &self.descriptor.bind_flags)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

// Ensure Texture is Send + Sync
static_assertions::assert_impl_all!(Texture: Send, Sync);
