//! Pipeline sub-state types: depth-stencil, rasterizer, blend and barriers.

use bitflags::bitflags;

/// Maximum number of simultaneously bound render targets.
pub const MAX_RENDER_TARGETS: usize = 8;

// ============================================================================
// Depth-stencil
// ============================================================================

/// Comparison function for depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonFunction {
    #[default]
    Unknown,
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Operation applied to the stencil buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOp {
    #[default]
    Undefined,
    Keep,
    Zero,
    Replace,
    IncrSat,
    DecrSat,
    Invert,
    IncrWrap,
    DecrWrap,
}

/// Polygon face selected by per-face stencil state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilFace {
    Front,
    Back,
}

impl StencilFace {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Front => 0,
            Self::Back => 1,
        }
    }
}

// ============================================================================
// Rasterizer
// ============================================================================

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    #[default]
    Undefined,
    Wireframe,
    Solid,
}

/// Face culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    #[default]
    Undefined,
    None,
    Front,
    Back,
}

// ============================================================================
// Blend
// ============================================================================

/// Source or destination blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendFactor {
    #[default]
    Undefined,
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DestAlpha,
    InvDestAlpha,
    DestColor,
    InvDestColor,
    SrcAlphaSat,
    BlendFactor,
    InvBlendFactor,
    Src1Color,
    InvSrc1Color,
    Src1Alpha,
    InvSrc1Alpha,
}

/// Blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOperation {
    #[default]
    Undefined,
    Add,
    Subtract,
    RevSubtract,
    Min,
    Max,
}

bitflags! {
    /// Color channels written to a render target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

impl Default for ColorMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Blend state of one render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetBlendDesc {
    pub blend_enable: bool,
    pub src_blend: BlendFactor,
    pub dest_blend: BlendFactor,
    pub blend_op: BlendOperation,
    pub src_blend_alpha: BlendFactor,
    pub dest_blend_alpha: BlendFactor,
    pub blend_op_alpha: BlendOperation,
    pub write_mask: ColorMask,
}

impl RenderTargetBlendDesc {
    /// Straight alpha blending.
    pub fn alpha_blending() -> Self {
        Self {
            blend_enable: true,
            src_blend: BlendFactor::SrcAlpha,
            dest_blend: BlendFactor::InvSrcAlpha,
            blend_op: BlendOperation::Add,
            src_blend_alpha: BlendFactor::One,
            dest_blend_alpha: BlendFactor::InvSrcAlpha,
            blend_op_alpha: BlendOperation::Add,
            write_mask: ColorMask::ALL,
        }
    }
}

impl Default for RenderTargetBlendDesc {
    fn default() -> Self {
        Self {
            blend_enable: false,
            src_blend: BlendFactor::One,
            dest_blend: BlendFactor::Zero,
            blend_op: BlendOperation::Add,
            src_blend_alpha: BlendFactor::One,
            dest_blend_alpha: BlendFactor::Zero,
            blend_op_alpha: BlendOperation::Add,
            write_mask: ColorMask::ALL,
        }
    }
}

/// Blend state of the output merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendStateDesc {
    pub alpha_to_coverage: bool,
    /// Use a separate state for every render target instead of target 0 for all.
    pub independent_blend: bool,
    pub render_targets: [RenderTargetBlendDesc; MAX_RENDER_TARGETS],
}

impl BlendStateDesc {
    /// Returns true if any render target that takes part has blending enabled.
    pub fn any_blend_enabled(&self) -> bool {
        if self.independent_blend {
            self.render_targets.iter().any(|rt| rt.blend_enable)
        } else {
            self.render_targets[0].blend_enable
        }
    }
}

// ============================================================================
// Memory barriers
// ============================================================================

bitflags! {
    /// Memory barrier bits for incoherent shader writes.
    ///
    /// Each bit selects the kind of access that must observe earlier writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryBarrierFlags: u32 {
        const VERTEX_ATTRIB_ARRAY = 0x0001;
        const ELEMENT_ARRAY = 0x0002;
        const UNIFORM = 0x0004;
        const TEXTURE_FETCH = 0x0008;
        const SHADER_IMAGE_ACCESS = 0x0020;
        const COMMAND = 0x0040;
        const PIXEL_BUFFER = 0x0080;
        const TEXTURE_UPDATE = 0x0100;
        const BUFFER_UPDATE = 0x0200;
        const FRAMEBUFFER = 0x0400;
        const TRANSFORM_FEEDBACK = 0x0800;
        const ATOMIC_COUNTER = 0x1000;
        const SHADER_STORAGE = 0x2000;
        const CLIENT_MAPPED_BUFFER = 0x4000;
        const QUERY_BUFFER = 0x8000;

        /// Barriers relevant to writes into a texture through an image unit.
        const TEXTURE = Self::TEXTURE_FETCH.bits()
            | Self::SHADER_IMAGE_ACCESS.bits()
            | Self::PIXEL_BUFFER.bits()
            | Self::TEXTURE_UPDATE.bits()
            | Self::FRAMEBUFFER.bits();
    }
}

impl Default for MemoryBarrierFlags {
    fn default() -> Self {
        Self::empty()
    }
}
