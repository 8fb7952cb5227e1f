//! GPU texture view resource.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::backend::NativeView;
use crate::resources::Texture;
use crate::types::{ResourceDimension, TextureFormat, TextureViewDescriptor, TextureViewType};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// A view onto a range of a [`Texture`].
///
/// Views hold a weak reference to their texture. Every view gets a
/// process-unique id that the binding-state cache uses to detect rebinding of
/// the same view.
pub struct TextureView {
    texture: Weak<Texture>,
    descriptor: TextureViewDescriptor,
    native: NativeView,
    unique_id: u64,
}

impl TextureView {
    /// Create a new view (called by GraphicsDevice).
    pub(crate) fn new(
        texture: Weak<Texture>,
        descriptor: TextureViewDescriptor,
        native: NativeView,
    ) -> Self {
        Self {
            texture,
            descriptor,
            native,
            unique_id: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Get the texture this view was created from, if it is still alive.
    pub fn texture(&self) -> Option<Arc<Texture>> {
        self.texture.upgrade()
    }

    /// Get the corrected view descriptor.
    pub fn descriptor(&self) -> &TextureViewDescriptor {
        &self.descriptor
    }

    pub fn view_type(&self) -> TextureViewType {
        self.descriptor.view_type
    }

    pub fn dimension(&self) -> ResourceDimension {
        self.descriptor.dimension
    }

    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    /// Get the native view object.
    pub fn native(&self) -> &NativeView {
        &self.native
    }

    /// Integer name of the native view.
    pub fn handle(&self) -> u32 {
        self.native.handle()
    }

    /// Process-unique id of this view.
    pub fn unique_id(&self) -> u64 {
        self.unique_id
    }
}

impl std::fmt::Debug for TextureView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureView")
            .field("id", &self.unique_id)
            .field("type", &self.descriptor.view_type)
            .field("dimension", &self.descriptor.dimension)
            .field("format", &self.descriptor.format)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

static_assertions::assert_impl_all!(TextureView: Send, Sync);
