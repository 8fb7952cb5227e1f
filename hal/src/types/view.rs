//! Texture view types and descriptors.

use bitflags::bitflags;

use super::format::TextureFormat;
use super::texture::{BindFlags, ResourceDimension};

/// Sentinel for "all remaining mip levels or slices". Zero means the same.
pub const REMAINING: u32 = u32::MAX;

/// Kind of texture view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureViewType {
    #[default]
    Undefined,
    /// Sampled in shaders.
    ShaderResource,
    /// Color attachment.
    RenderTarget,
    /// Depth-stencil attachment.
    DepthStencil,
    /// Storage image.
    UnorderedAccess,
}

impl TextureViewType {
    /// The four concrete view kinds, in format-table order.
    pub const ALL: [TextureViewType; 4] = [
        Self::ShaderResource,
        Self::RenderTarget,
        Self::DepthStencil,
        Self::UnorderedAccess,
    ];

    /// Column of this view kind in the default view format table.
    pub fn table_slot(self) -> Option<usize> {
        match self {
            Self::Undefined => None,
            Self::ShaderResource => Some(0),
            Self::RenderTarget => Some(1),
            Self::DepthStencil => Some(2),
            Self::UnorderedAccess => Some(3),
        }
    }

    /// Bind flag a texture needs for views of this kind.
    pub fn required_bind_flag(self) -> BindFlags {
        match self {
            Self::Undefined => BindFlags::empty(),
            Self::ShaderResource => BindFlags::SHADER_RESOURCE,
            Self::RenderTarget => BindFlags::RENDER_TARGET,
            Self::DepthStencil => BindFlags::DEPTH_STENCIL,
            Self::UnorderedAccess => BindFlags::UNORDERED_ACCESS,
        }
    }

    /// Short name used in logs.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::ShaderResource => "SRV",
            Self::RenderTarget => "RTV",
            Self::DepthStencil => "DSV",
            Self::UnorderedAccess => "UAV",
        }
    }
}

bitflags! {
    /// Access allowed through an unordered access view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UavAccessFlags: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

impl Default for UavAccessFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Descriptor for creating a texture view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureViewDescriptor {
    /// Debug label for the view.
    pub label: Option<String>,
    /// View kind.
    pub view_type: TextureViewType,
    /// View dimension. `Undefined` derives it from the texture.
    pub dimension: ResourceDimension,
    /// View format. `Unknown` derives it from the texture.
    pub format: TextureFormat,
    /// First mip level visible through the view.
    pub most_detailed_mip: u32,
    /// Number of mip levels, or [`REMAINING`].
    pub num_mip_levels: u32,
    /// First array slice (or depth slice for 3D views).
    pub first_slice: u32,
    /// Number of slices, or [`REMAINING`].
    pub num_slices: u32,
    /// Access flags for unordered access views.
    pub access_flags: UavAccessFlags,
}

impl TextureViewDescriptor {
    /// Create a descriptor of the given kind with every other field unset.
    pub fn new(view_type: TextureViewType) -> Self {
        Self {
            view_type,
            ..Self::default()
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the view dimension.
    pub fn with_dimension(mut self, dimension: ResourceDimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the view format.
    pub fn with_format(mut self, format: TextureFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the mip range.
    pub fn with_mips(mut self, most_detailed: u32, count: u32) -> Self {
        self.most_detailed_mip = most_detailed;
        self.num_mip_levels = count;
        self
    }

    /// Set the slice range.
    pub fn with_slices(mut self, first: u32, count: u32) -> Self {
        self.first_slice = first;
        self.num_slices = count;
        self
    }

    /// Set the UAV access flags.
    pub fn with_access(mut self, access: UavAccessFlags) -> Self {
        self.access_flags = access;
        self
    }

    /// Label used in diagnostics.
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }
}

impl Default for TextureViewDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            view_type: TextureViewType::Undefined,
            dimension: ResourceDimension::Undefined,
            format: TextureFormat::Unknown,
            most_detailed_mip: 0,
            num_mip_levels: REMAINING,
            first_slice: 0,
            num_slices: REMAINING,
            access_flags: UavAccessFlags::empty(),
        }
    }
}

/// Returns true if `count` asks for everything that remains.
pub fn is_remaining(count: u32) -> bool {
    count == 0 || count == REMAINING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_slots() {
        for (index, view_type) in TextureViewType::ALL.iter().enumerate() {
            assert_eq!(view_type.table_slot(), Some(index));
        }
        assert_eq!(TextureViewType::Undefined.table_slot(), None);
    }

    #[test]
    fn test_default_descriptor_is_unset() {
        let desc = TextureViewDescriptor::new(TextureViewType::ShaderResource);
        assert_eq!(desc.dimension, ResourceDimension::Undefined);
        assert_eq!(desc.format, TextureFormat::Unknown);
        assert!(is_remaining(desc.num_mip_levels));
        assert!(is_remaining(desc.num_slices));
        assert!(is_remaining(0));
        assert!(!is_remaining(6));
    }

    #[test]
    fn test_read_write_access() {
        assert_eq!(
            UavAccessFlags::READ_WRITE,
            UavAccessFlags::READ | UavAccessFlags::WRITE
        );
    }
}
