//! Common types and descriptors for graphics resources.
//!
//! This module contains format enums, bind and access flags, descriptor
//! structs and the pipeline sub-state types tracked by the state cache.

mod format;
mod state;
mod texture;
mod view;

pub use format::{
    ComponentType, FormatInfo, TextureFormat, default_view_format, format_from_native,
    native_format, pixel_transfer_attribs,
};
pub use state::{
    BlendFactor, BlendOperation, BlendStateDesc, ColorMask, ComparisonFunction, CullMode,
    FillMode, MAX_RENDER_TARGETS, MemoryBarrierFlags, RenderTargetBlendDesc, StencilFace,
    StencilOp,
};
pub use texture::{
    BindFlags, CpuAccessFlags, MipLevelProperties, MiscTextureFlags, ResourceDimension,
    ResourceState, TextureBindTarget, TextureDescriptor, TextureRegion, Usage,
};
pub use view::{REMAINING, TextureViewDescriptor, TextureViewType, UavAccessFlags, is_remaining};
