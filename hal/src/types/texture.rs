//! Texture types and descriptors.

use bitflags::bitflags;

use super::format::TextureFormat;

/// Dimensionality of a texture or texture view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceDimension {
    /// Not set. Views use this to derive the dimension from their texture.
    #[default]
    Undefined,
    Tex1D,
    Tex1DArray,
    Tex2D,
    Tex2DArray,
    Tex3D,
    TexCube,
    TexCubeArray,
}

impl ResourceDimension {
    /// Returns true for 1D and 1D array dimensions.
    pub fn is_1d(self) -> bool {
        matches!(self, Self::Tex1D | Self::Tex1DArray)
    }

    /// Returns true for cube and cube array dimensions.
    pub fn is_cube(self) -> bool {
        matches!(self, Self::TexCube | Self::TexCubeArray)
    }

    /// Returns true if the third extent is an array size.
    pub fn is_array(self) -> bool {
        matches!(
            self,
            Self::Tex1DArray | Self::Tex2DArray | Self::TexCube | Self::TexCubeArray
        )
    }
}

/// Expected CPU and GPU access pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Usage {
    /// GPU read-only, initialized at creation.
    Static,
    /// GPU read and write.
    #[default]
    Default,
    /// CPU writes every frame, GPU reads.
    Dynamic,
    /// CPU-accessible copy source or destination.
    Staging,
}

bitflags! {
    /// How a texture can be bound to the pipeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER = 1 << 0;
        const INDEX_BUFFER = 1 << 1;
        const UNIFORM_BUFFER = 1 << 2;
        /// Texture can be sampled in a shader.
        const SHADER_RESOURCE = 1 << 3;
        const STREAM_OUTPUT = 1 << 4;
        /// Texture can be used as a color attachment.
        const RENDER_TARGET = 1 << 5;
        /// Texture can be used as a depth-stencil attachment.
        const DEPTH_STENCIL = 1 << 6;
        /// Texture can be bound as a storage image.
        const UNORDERED_ACCESS = 1 << 7;
    }
}

impl Default for BindFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// CPU access requested for a resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuAccessFlags: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

impl Default for CpuAccessFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Miscellaneous texture flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MiscTextureFlags: u8 {
        /// The full mip chain is generated from the top level.
        const GENERATE_MIPS = 1 << 0;
    }
}

impl Default for MiscTextureFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Resource state used for transitions.
    ///
    /// An empty state means the state is unknown to the engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceState: u32 {
        const UNDEFINED = 1 << 0;
        const VERTEX_BUFFER = 1 << 1;
        const CONSTANT_BUFFER = 1 << 2;
        const INDEX_BUFFER = 1 << 3;
        const RENDER_TARGET = 1 << 4;
        const UNORDERED_ACCESS = 1 << 5;
        const DEPTH_WRITE = 1 << 6;
        const DEPTH_READ = 1 << 7;
        const SHADER_RESOURCE = 1 << 8;
        const STREAM_OUT = 1 << 9;
        const INDIRECT_ARGUMENT = 1 << 10;
        const COPY_DEST = 1 << 11;
        const COPY_SOURCE = 1 << 12;
        const RESOLVE_DEST = 1 << 13;
        const RESOLVE_SOURCE = 1 << 14;
        const PRESENT = 1 << 15;
    }
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Descriptor for creating a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Debug label for the texture.
    pub label: Option<String>,
    /// Texture dimension.
    pub dimension: ResourceDimension,
    /// Width in texels.
    pub width: u32,
    /// Height in texels. Must be 1 for 1D textures.
    pub height: u32,
    /// Depth for 3D textures, array size for everything else.
    pub depth_or_array_size: u32,
    /// Texture format.
    pub format: TextureFormat,
    /// Mip level count. 0 requests the full chain.
    pub mip_levels: u32,
    /// Sample count for multisampling.
    pub sample_count: u32,
    /// Access pattern.
    pub usage: Usage,
    /// Pipeline bind flags.
    pub bind_flags: BindFlags,
    /// CPU access flags.
    pub cpu_access: CpuAccessFlags,
    /// Miscellaneous flags.
    pub misc_flags: MiscTextureFlags,
    /// Command queues that may use the texture.
    pub command_queue_mask: u64,
}

impl TextureDescriptor {
    /// Create a new 2D texture descriptor.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat, bind_flags: BindFlags) -> Self {
        Self {
            dimension: ResourceDimension::Tex2D,
            width,
            height,
            format,
            bind_flags,
            ..Self::default()
        }
    }

    /// Create a new 1D texture descriptor.
    pub fn new_1d(width: u32, format: TextureFormat, bind_flags: BindFlags) -> Self {
        Self {
            dimension: ResourceDimension::Tex1D,
            width,
            height: 1,
            format,
            bind_flags,
            ..Self::default()
        }
    }

    /// Create a new 3D texture descriptor.
    pub fn new_3d(
        width: u32,
        height: u32,
        depth: u32,
        format: TextureFormat,
        bind_flags: BindFlags,
    ) -> Self {
        Self {
            dimension: ResourceDimension::Tex3D,
            width,
            height,
            depth_or_array_size: depth,
            format,
            bind_flags,
            ..Self::default()
        }
    }

    /// Create a new cube texture descriptor with six faces.
    pub fn new_cube(size: u32, format: TextureFormat, bind_flags: BindFlags) -> Self {
        Self {
            dimension: ResourceDimension::TexCube,
            width: size,
            height: size,
            depth_or_array_size: 6,
            format,
            bind_flags,
            ..Self::default()
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the dimension.
    pub fn with_dimension(mut self, dimension: ResourceDimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the array size (or depth for 3D textures).
    pub fn with_array_size(mut self, size: u32) -> Self {
        self.depth_or_array_size = size;
        self
    }

    /// Set the mip level count. 0 requests the full chain.
    pub fn with_mip_levels(mut self, count: u32) -> Self {
        self.mip_levels = count;
        self
    }

    /// Set the sample count for multisampling.
    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    /// Set the usage.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Set the CPU access flags.
    pub fn with_cpu_access(mut self, access: CpuAccessFlags) -> Self {
        self.cpu_access = access;
        self
    }

    /// Set the miscellaneous flags.
    pub fn with_misc_flags(mut self, flags: MiscTextureFlags) -> Self {
        self.misc_flags = flags;
        self
    }

    /// Set the command queue mask.
    pub fn with_command_queue_mask(mut self, mask: u64) -> Self {
        self.command_queue_mask = mask;
        self
    }

    /// Label used in diagnostics.
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }

    /// Array size, 1 for 3D textures.
    pub fn array_size(&self) -> u32 {
        if self.dimension == ResourceDimension::Tex3D {
            1
        } else {
            self.depth_or_array_size
        }
    }

    /// Depth, 1 for everything but 3D textures.
    pub fn depth(&self) -> u32 {
        if self.dimension == ResourceDimension::Tex3D {
            self.depth_or_array_size
        } else {
            1
        }
    }
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            dimension: ResourceDimension::Undefined,
            width: 0,
            height: 0,
            depth_or_array_size: 1,
            format: TextureFormat::default(),
            mip_levels: 1,
            sample_count: 1,
            usage: Usage::default(),
            bind_flags: BindFlags::empty(),
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: MiscTextureFlags::empty(),
            command_queue_mask: 1,
        }
    }
}

/// Axis-aligned region of a texture mip level.
///
/// Minimum coordinates are inclusive, maximum coordinates exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureRegion {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
    pub min_z: u32,
    pub max_z: u32,
}

impl TextureRegion {
    /// Create a region covering `[min_x, max_x) x [min_y, max_y) x [min_z, max_z)`.
    pub fn new(min_x: u32, max_x: u32, min_y: u32, max_y: u32, min_z: u32, max_z: u32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Create a single-slice 2D region.
    pub fn new_2d(min_x: u32, max_x: u32, min_y: u32, max_y: u32) -> Self {
        Self::new(min_x, max_x, min_y, max_y, 0, 1)
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn depth(&self) -> u32 {
        self.max_z.saturating_sub(self.min_z)
    }
}

/// Size and layout of a single mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MipLevelProperties {
    /// Width in texels.
    pub logical_width: u32,
    /// Height in texels.
    pub logical_height: u32,
    /// Width rounded up to the block size.
    pub storage_width: u32,
    /// Height rounded up to the block size.
    pub storage_height: u32,
    /// Depth, 1 for non-3D textures.
    pub depth: u32,
    /// Bytes in one row of texels (or blocks).
    pub row_size: u64,
    /// Bytes in one depth slice.
    pub depth_slice_size: u64,
    /// Bytes in the whole mip level.
    pub mip_size: u64,
}

/// Native texture binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureBindTarget {
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture2DMultisample,
    Texture2DMultisampleArray,
    Texture3D,
    CubeMap,
    CubeMapArray,
}

impl TextureBindTarget {
    /// Binding target for a texture or view of the given dimension.
    pub fn from_dimension(dimension: ResourceDimension, sample_count: u32) -> Option<Self> {
        let multisampled = sample_count > 1;
        match dimension {
            ResourceDimension::Undefined => None,
            ResourceDimension::Tex1D => Some(Self::Texture1D),
            ResourceDimension::Tex1DArray => Some(Self::Texture1DArray),
            ResourceDimension::Tex2D if multisampled => Some(Self::Texture2DMultisample),
            ResourceDimension::Tex2D => Some(Self::Texture2D),
            ResourceDimension::Tex2DArray if multisampled => Some(Self::Texture2DMultisampleArray),
            ResourceDimension::Tex2DArray => Some(Self::Texture2DArray),
            ResourceDimension::Tex3D => Some(Self::Texture3D),
            ResourceDimension::TexCube => Some(Self::CubeMap),
            ResourceDimension::TexCubeArray => Some(Self::CubeMapArray),
        }
    }
}
