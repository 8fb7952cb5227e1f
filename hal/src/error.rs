//! Error types.

use thiserror::Error;

use crate::types::{ResourceDimension, TextureFormat, TextureViewType};

/// Errors that can occur in the hardware abstraction layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A texture descriptor failed validation.
    #[error("invalid description of texture '{texture}': {reason}")]
    InvalidDescription {
        texture: String,
        reason: TextureDescError,
    },
    /// A texture view descriptor failed correction.
    #[error("invalid view '{view}' of texture '{texture}': {reason}")]
    InvalidView {
        texture: String,
        view: String,
        reason: ViewDescError,
    },
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The backend failed to create a native object.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// The GPU device was lost.
    #[error("GPU device lost")]
    DeviceLost,
}

/// The texture descriptor rule that was violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureDescError {
    #[error("resource dimension is undefined")]
    UndefinedDimension,
    #[error("texture width cannot be zero")]
    ZeroWidth,
    #[error("height of a 1D texture must be 1, got {0}")]
    Height1D(u32),
    #[error("texture height cannot be zero")]
    ZeroHeight,
    #[error("3D texture depth cannot be zero")]
    ZeroDepth,
    #[error("array size of a non-array texture must be 1, got {0}")]
    NonArraySize(u32),
    #[error("cube texture width ({width}) and height ({height}) must match")]
    CubeNotSquare { width: u32, height: u32 },
    #[error("texture cube/cube array must have at least 6 slices, got {0}")]
    CubeTooFewSlices(u32),
    #[error("texture cube/cube array slice count ({0}) must be a multiple of 6")]
    CubeSlicesNotMultipleOf6(u32),
    #[error("mip level count {requested} exceeds the full chain of {max} levels")]
    TooManyMips { requested: u32, max: u32 },
    #[error("only 2D textures and 2D texture arrays can be multisampled, got {0:?}")]
    MultisampledDimension(ResourceDimension),
    #[error("multisampled textures must have exactly one mip level, got {0}")]
    MultisampledMips(u32),
    #[error("UAVs are not allowed for multisampled resources")]
    MultisampledUav,
    #[error("staging textures cannot be bound to any GPU pipeline stage")]
    StagingBindFlags,
    #[error("mipmaps cannot be autogenerated for staging textures")]
    StagingGenerateMips,
    #[error("at least one CPU access flag must be specified for a staging texture")]
    StagingNoCpuAccess,
    #[error("read and write CPU access flags cannot both be set")]
    StagingReadWrite,
    #[error("no command queue in the mask {requested:#x} is available on the device ({available:#x})")]
    NoCommandQueue { requested: u64, available: u64 },
    #[error("dimension {size} exceeds the device maximum of {max}")]
    TooLarge { size: u32, max: u32 },
}

/// The texture view descriptor rule that was violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDescError {
    #[error("texture view type is not specified")]
    UndefinedViewType,
    #[error("most detailed mip ({mip}) is out of range, the texture has {mip_levels} mips")]
    MostDetailedMipOutOfRange { mip: u32, mip_levels: u32 },
    #[error("mip range {first}..{end} exceeds the {mip_levels} mips of the texture")]
    MipRangeOutOfBounds {
        first: u32,
        end: u32,
        mip_levels: u32,
    },
    #[error("a {view:?} view is not allowed for a {texture:?} texture")]
    IncompatibleDimension {
        view: ResourceDimension,
        texture: ResourceDimension,
    },
    #[error("{0} views cannot have a cube dimension")]
    CubeViewNotShaderResource(&'static str),
    #[error("a cube view must address exactly 6 slices starting at 0, got {first}+{count}")]
    InvalidCubeSlices { first: u32, count: u32 },
    #[error("a cube array view slice count ({0}) must be a multiple of 6")]
    CubeArraySlicesNotMultipleOf6(u32),
    #[error("non-array views must start at slice 0 and address one slice, got {first}+{count}")]
    NonArraySlices { first: u32, count: u32 },
    #[error("first slice ({first}) is out of range, the texture has {array_size} slices")]
    FirstSliceOutOfRange { first: u32, array_size: u32 },
    #[error("slice range {first}..{end} exceeds the {array_size} slices of the texture")]
    SliceRangeOutOfBounds {
        first: u32,
        end: u32,
        array_size: u32,
    },
    #[error("depth slice range {first}..{end} exceeds the mip depth of {depth}")]
    DepthRangeOutOfBounds { first: u32, end: u32, depth: u32 },
    #[error("view format {0:?} is typeless")]
    TypelessFormat(TextureFormat),
    #[error("no view format exists for this texture")]
    UnknownFormat,
    #[error("the texture was not created with the bind flag required by {0:?} views")]
    MissingBindFlag(TextureViewType),
}
