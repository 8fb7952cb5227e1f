//! Native GL token lookups.
//!
//! The abstraction never calls a native API directly; these tokens are what a
//! GL command sink forwards to the driver, and what the dummy sink prints in
//! its trace output.

use crate::types::{
    ComparisonFunction, CullMode, FillMode, StencilFace, StencilOp, TextureFormat,
    UavAccessFlags,
};

// Internal formats
pub const GL_RGBA32F: u32 = 0x8814;
pub const GL_RGB32F: u32 = 0x8815;
pub const GL_RGBA16F: u32 = 0x881A;
pub const GL_RGBA32UI: u32 = 0x8D70;
pub const GL_RGB32UI: u32 = 0x8D71;
pub const GL_RGBA16UI: u32 = 0x8D76;
pub const GL_RGBA8UI: u32 = 0x8D7C;
pub const GL_RGBA32I: u32 = 0x8D82;
pub const GL_RGB32I: u32 = 0x8D83;
pub const GL_RGBA16I: u32 = 0x8D88;
pub const GL_RGBA8I: u32 = 0x8D8E;
pub const GL_RGBA16: u32 = 0x805B;
pub const GL_RGBA8: u32 = 0x8058;
pub const GL_RGB10_A2: u32 = 0x8059;
pub const GL_RGB10_A2UI: u32 = 0x906F;
pub const GL_RGBA16_SNORM: u32 = 0x8F9B;
pub const GL_RGBA8_SNORM: u32 = 0x8F97;
pub const GL_RG16_SNORM: u32 = 0x8F99;
pub const GL_RG8_SNORM: u32 = 0x8F95;
pub const GL_R16_SNORM: u32 = 0x8F98;
pub const GL_R8_SNORM: u32 = 0x8F94;
pub const GL_RG32F: u32 = 0x8230;
pub const GL_RG16F: u32 = 0x822F;
pub const GL_R32F: u32 = 0x822E;
pub const GL_R16F: u32 = 0x822D;
pub const GL_RG32UI: u32 = 0x823C;
pub const GL_RG32I: u32 = 0x823B;
pub const GL_RG16UI: u32 = 0x823A;
pub const GL_RG16I: u32 = 0x8239;
pub const GL_RG8UI: u32 = 0x8238;
pub const GL_RG8I: u32 = 0x8237;
pub const GL_R32UI: u32 = 0x8236;
pub const GL_R32I: u32 = 0x8235;
pub const GL_R16UI: u32 = 0x8234;
pub const GL_R16I: u32 = 0x8233;
pub const GL_R8UI: u32 = 0x8232;
pub const GL_R8I: u32 = 0x8231;
pub const GL_RG16: u32 = 0x822C;
pub const GL_RG8: u32 = 0x822B;
pub const GL_R16: u32 = 0x822A;
pub const GL_R8: u32 = 0x8229;
pub const GL_DEPTH32F_STENCIL8: u32 = 0x8CAD;
pub const GL_DEPTH24_STENCIL8: u32 = 0x88F0;
pub const GL_DEPTH_COMPONENT32F: u32 = 0x8CAC;
pub const GL_DEPTH_COMPONENT16: u32 = 0x81A5;
pub const GL_R11F_G11F_B10F: u32 = 0x8C3A;
pub const GL_RGB9_E5: u32 = 0x8C3D;
pub const GL_SRGB8_ALPHA8: u32 = 0x8C43;
pub const GL_COMPRESSED_RGB_S3TC_DXT1_EXT: u32 = 0x83F0;
pub const GL_COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83F2;
pub const GL_COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83F3;
pub const GL_COMPRESSED_SRGB_S3TC_DXT1_EXT: u32 = 0x8C4C;
pub const GL_COMPRESSED_SRGB_ALPHA_S3TC_DXT3_EXT: u32 = 0x8C4E;
pub const GL_COMPRESSED_SRGB_ALPHA_S3TC_DXT5_EXT: u32 = 0x8C4F;
pub const GL_COMPRESSED_RED_RGTC1: u32 = 0x8DBB;
pub const GL_COMPRESSED_SIGNED_RED_RGTC1: u32 = 0x8DBC;
pub const GL_COMPRESSED_RG_RGTC2: u32 = 0x8DBD;
pub const GL_COMPRESSED_SIGNED_RG_RGTC2: u32 = 0x8DBE;
pub const GL_COMPRESSED_RGBA_BPTC_UNORM: u32 = 0x8E8C;
pub const GL_COMPRESSED_SRGB_ALPHA_BPTC_UNORM: u32 = 0x8E8D;
pub const GL_COMPRESSED_RGB_BPTC_SIGNED_FLOAT: u32 = 0x8E8E;
pub const GL_COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT: u32 = 0x8E8F;

// Pixel formats
pub const GL_DEPTH_COMPONENT: u32 = 0x1902;
pub const GL_RED: u32 = 0x1903;
pub const GL_RGB: u32 = 0x1907;
pub const GL_RGBA: u32 = 0x1908;
pub const GL_RG: u32 = 0x8227;
pub const GL_RG_INTEGER: u32 = 0x8228;
pub const GL_DEPTH_STENCIL: u32 = 0x84F9;
pub const GL_RED_INTEGER: u32 = 0x8D94;
pub const GL_RGB_INTEGER: u32 = 0x8D98;
pub const GL_RGBA_INTEGER: u32 = 0x8D99;

// Pixel types
pub const GL_BYTE: u32 = 0x1400;
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
pub const GL_SHORT: u32 = 0x1402;
pub const GL_UNSIGNED_SHORT: u32 = 0x1403;
pub const GL_INT: u32 = 0x1404;
pub const GL_UNSIGNED_INT: u32 = 0x1405;
pub const GL_FLOAT: u32 = 0x1406;
pub const GL_HALF_FLOAT: u32 = 0x140B;
pub const GL_UNSIGNED_SHORT_5_6_5_REV: u32 = 0x8364;
pub const GL_UNSIGNED_SHORT_1_5_5_5_REV: u32 = 0x8366;
pub const GL_UNSIGNED_INT_2_10_10_10_REV: u32 = 0x8368;
pub const GL_UNSIGNED_INT_24_8: u32 = 0x84FA;
pub const GL_UNSIGNED_INT_10F_11F_11F_REV: u32 = 0x8C3B;
pub const GL_UNSIGNED_INT_5_9_9_9_REV: u32 = 0x8C3E;
pub const GL_FLOAT_32_UNSIGNED_INT_24_8_REV: u32 = 0x8DAD;

// Image access
pub const GL_READ_ONLY: u32 = 0x88B8;
pub const GL_WRITE_ONLY: u32 = 0x88B9;
pub const GL_READ_WRITE: u32 = 0x88BA;

// Comparison functions
pub const GL_NEVER: u32 = 0x0200;
pub const GL_LESS: u32 = 0x0201;
pub const GL_EQUAL: u32 = 0x0202;
pub const GL_LEQUAL: u32 = 0x0203;
pub const GL_GREATER: u32 = 0x0204;
pub const GL_NOTEQUAL: u32 = 0x0205;
pub const GL_GEQUAL: u32 = 0x0206;
pub const GL_ALWAYS: u32 = 0x0207;

// Stencil ops
pub const GL_ZERO: u32 = 0;
pub const GL_INVERT: u32 = 0x150A;
pub const GL_KEEP: u32 = 0x1E00;
pub const GL_REPLACE: u32 = 0x1E01;
pub const GL_INCR: u32 = 0x1E02;
pub const GL_DECR: u32 = 0x1E03;
pub const GL_INCR_WRAP: u32 = 0x8507;
pub const GL_DECR_WRAP: u32 = 0x8508;

// Faces and polygon modes
pub const GL_FRONT: u32 = 0x0404;
pub const GL_BACK: u32 = 0x0405;
pub const GL_LINE: u32 = 0x1B01;
pub const GL_FILL: u32 = 0x1B02;

/// Pixel format and data type used for transfers to and from a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelTransferAttribs {
    /// Pixel format token, 0 if transfers are unsupported.
    pub format: u32,
    /// Component data type token, 0 for compressed or unsupported formats.
    pub data_type: u32,
    /// Whether the data is block-compressed.
    pub is_compressed: bool,
}

impl PixelTransferAttribs {
    const fn new(format: u32, data_type: u32) -> Self {
        Self {
            format,
            data_type,
            is_compressed: false,
        }
    }

    const fn compressed(format: u32) -> Self {
        Self {
            format,
            data_type: 0,
            is_compressed: true,
        }
    }
}

/// Internal-format token of `format`, or 0 when GL has no matching format.
pub fn internal_format(format: TextureFormat) -> u32 {
    use TextureFormat::*;

    match format {
        Rgba32Typeless | Rgba32Float => GL_RGBA32F,
        Rgba32Uint => GL_RGBA32UI,
        Rgba32Sint => GL_RGBA32I,
        Rgb32Typeless | Rgb32Float => GL_RGB32F,
        Rgb32Uint => GL_RGB32UI,
        Rgb32Sint => GL_RGB32I,
        Rgba16Typeless | Rgba16Float => GL_RGBA16F,
        Rgba16Unorm => GL_RGBA16,
        Rgba16Uint => GL_RGBA16UI,
        Rgba16Snorm => GL_RGBA16_SNORM,
        Rgba16Sint => GL_RGBA16I,
        Rg32Typeless | Rg32Float => GL_RG32F,
        Rg32Uint => GL_RG32UI,
        Rg32Sint => GL_RG32I,
        R32G8X24Typeless | D32FloatS8X24Uint | R32FloatX8X24Typeless => GL_DEPTH32F_STENCIL8,
        Rgb10A2Typeless | Rgb10A2Unorm => GL_RGB10_A2,
        Rgb10A2Uint => GL_RGB10_A2UI,
        R11G11B10Float => GL_R11F_G11F_B10F,
        Rgba8Typeless | Rgba8Unorm => GL_RGBA8,
        Rgba8UnormSrgb => GL_SRGB8_ALPHA8,
        Rgba8Uint => GL_RGBA8UI,
        Rgba8Snorm => GL_RGBA8_SNORM,
        Rgba8Sint => GL_RGBA8I,
        Rg16Typeless | Rg16Float => GL_RG16F,
        Rg16Unorm => GL_RG16,
        Rg16Uint => GL_RG16UI,
        Rg16Snorm => GL_RG16_SNORM,
        Rg16Sint => GL_RG16I,
        R32Typeless | R32Float => GL_R32F,
        D32Float => GL_DEPTH_COMPONENT32F,
        R32Uint => GL_R32UI,
        R32Sint => GL_R32I,
        R24G8Typeless | D24UnormS8Uint | R24UnormX8Typeless => GL_DEPTH24_STENCIL8,
        Rg8Typeless | Rg8Unorm => GL_RG8,
        Rg8Uint => GL_RG8UI,
        Rg8Snorm => GL_RG8_SNORM,
        Rg8Sint => GL_RG8I,
        R16Typeless | R16Float => GL_R16F,
        D16Unorm => GL_DEPTH_COMPONENT16,
        R16Unorm => GL_R16,
        R16Uint => GL_R16UI,
        R16Snorm => GL_R16_SNORM,
        R16Sint => GL_R16I,
        R8Typeless | R8Unorm => GL_R8,
        R8Uint => GL_R8UI,
        R8Snorm => GL_R8_SNORM,
        R8Sint => GL_R8I,
        Rgb9E5SharedExp => GL_RGB9_E5,
        Bc1Typeless | Bc1Unorm => GL_COMPRESSED_RGB_S3TC_DXT1_EXT,
        Bc1UnormSrgb => GL_COMPRESSED_SRGB_S3TC_DXT1_EXT,
        Bc2Typeless | Bc2Unorm => GL_COMPRESSED_RGBA_S3TC_DXT3_EXT,
        Bc2UnormSrgb => GL_COMPRESSED_SRGB_ALPHA_S3TC_DXT3_EXT,
        Bc3Typeless | Bc3Unorm => GL_COMPRESSED_RGBA_S3TC_DXT5_EXT,
        Bc3UnormSrgb => GL_COMPRESSED_SRGB_ALPHA_S3TC_DXT5_EXT,
        Bc4Typeless | Bc4Unorm => GL_COMPRESSED_RED_RGTC1,
        Bc4Snorm => GL_COMPRESSED_SIGNED_RED_RGTC1,
        Bc5Typeless | Bc5Unorm => GL_COMPRESSED_RG_RGTC2,
        Bc5Snorm => GL_COMPRESSED_SIGNED_RG_RGTC2,
        Bc6hTypeless | Bc6hUf16 => GL_COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT,
        Bc6hSf16 => GL_COMPRESSED_RGB_BPTC_SIGNED_FLOAT,
        Bc7Typeless | Bc7Unorm => GL_COMPRESSED_RGBA_BPTC_UNORM,
        Bc7UnormSrgb => GL_COMPRESSED_SRGB_ALPHA_BPTC_UNORM,

        Unknown | X32TypelessG8X24Uint | X24TypelessG8Uint | A8Unorm | R1Unorm | Rg8B8G8Unorm
        | G8R8G8B8Unorm | B5G6R5Unorm | B5G5R5A1Unorm | Bgra8Unorm | Bgrx8Unorm
        | R10G10B10XrBiasA2Unorm | Bgra8Typeless | Bgra8UnormSrgb | Bgrx8Typeless
        | Bgrx8UnormSrgb => 0,
    }
}

/// Promote color storage to the matching depth storage for depth-stencil binding.
pub fn correct_depth_format(token: u32) -> u32 {
    match token {
        GL_R32F => GL_DEPTH_COMPONENT32F,
        GL_R16 => GL_DEPTH_COMPONENT16,
        other => other,
    }
}

/// Pixel-transfer attributes of `format`.
pub fn pixel_transfer_attribs(format: TextureFormat) -> PixelTransferAttribs {
    use PixelTransferAttribs as P;
    use TextureFormat::*;

    match format {
        Rgba32Typeless | Rgba32Float => P::new(GL_RGBA, GL_FLOAT),
        Rgba32Uint => P::new(GL_RGBA_INTEGER, GL_UNSIGNED_INT),
        Rgba32Sint => P::new(GL_RGBA_INTEGER, GL_INT),
        Rgb32Typeless | Rgb32Float => P::new(GL_RGB, GL_FLOAT),
        Rgb32Uint => P::new(GL_RGB_INTEGER, GL_UNSIGNED_INT),
        Rgb32Sint => P::new(GL_RGB_INTEGER, GL_INT),
        Rgba16Typeless | Rgba16Float => P::new(GL_RGBA, GL_HALF_FLOAT),
        Rgba16Unorm => P::new(GL_RGBA, GL_UNSIGNED_SHORT),
        Rgba16Uint => P::new(GL_RGBA_INTEGER, GL_UNSIGNED_SHORT),
        Rgba16Snorm => P::new(GL_RGBA, GL_SHORT),
        Rgba16Sint => P::new(GL_RGBA_INTEGER, GL_SHORT),
        Rg32Typeless | Rg32Float => P::new(GL_RG, GL_FLOAT),
        Rg32Uint => P::new(GL_RG_INTEGER, GL_UNSIGNED_INT),
        Rg32Sint => P::new(GL_RG_INTEGER, GL_INT),
        R32G8X24Typeless | D32FloatS8X24Uint | R32FloatX8X24Typeless | X32TypelessG8X24Uint => {
            P::new(GL_DEPTH_STENCIL, GL_FLOAT_32_UNSIGNED_INT_24_8_REV)
        }
        Rgb10A2Typeless | Rgb10A2Unorm => P::new(GL_RGBA, GL_UNSIGNED_INT_2_10_10_10_REV),
        Rgb10A2Uint => P::new(GL_RGBA_INTEGER, GL_UNSIGNED_INT_2_10_10_10_REV),
        R11G11B10Float => P::new(GL_RGB, GL_UNSIGNED_INT_10F_11F_11F_REV),
        Rgba8Typeless | Rgba8Unorm | Rgba8UnormSrgb => P::new(GL_RGBA, GL_UNSIGNED_BYTE),
        Rgba8Uint => P::new(GL_RGBA_INTEGER, GL_UNSIGNED_BYTE),
        Rgba8Snorm => P::new(GL_RGBA, GL_BYTE),
        Rgba8Sint => P::new(GL_RGBA_INTEGER, GL_BYTE),
        Rg16Typeless | Rg16Float => P::new(GL_RG, GL_HALF_FLOAT),
        Rg16Unorm => P::new(GL_RG, GL_UNSIGNED_SHORT),
        Rg16Uint => P::new(GL_RG_INTEGER, GL_UNSIGNED_SHORT),
        Rg16Snorm => P::new(GL_RG, GL_SHORT),
        Rg16Sint => P::new(GL_RG_INTEGER, GL_SHORT),
        R32Typeless | R32Float => P::new(GL_RED, GL_FLOAT),
        D32Float => P::new(GL_DEPTH_COMPONENT, GL_FLOAT),
        R32Uint => P::new(GL_RED_INTEGER, GL_UNSIGNED_INT),
        R32Sint => P::new(GL_RED_INTEGER, GL_INT),
        R24G8Typeless | D24UnormS8Uint | R24UnormX8Typeless | X24TypelessG8Uint => {
            P::new(GL_DEPTH_STENCIL, GL_UNSIGNED_INT_24_8)
        }
        Rg8Typeless | Rg8Unorm => P::new(GL_RG, GL_UNSIGNED_BYTE),
        Rg8Uint => P::new(GL_RG_INTEGER, GL_UNSIGNED_BYTE),
        Rg8Snorm => P::new(GL_RG, GL_BYTE),
        Rg8Sint => P::new(GL_RG_INTEGER, GL_BYTE),
        R16Typeless | R16Float => P::new(GL_RED, GL_HALF_FLOAT),
        D16Unorm => P::new(GL_DEPTH_COMPONENT, GL_UNSIGNED_SHORT),
        R16Unorm => P::new(GL_RED, GL_UNSIGNED_SHORT),
        R16Uint => P::new(GL_RED_INTEGER, GL_UNSIGNED_SHORT),
        R16Snorm => P::new(GL_RED, GL_SHORT),
        R16Sint => P::new(GL_RED_INTEGER, GL_SHORT),
        R8Typeless | R8Unorm => P::new(GL_RED, GL_UNSIGNED_BYTE),
        R8Uint => P::new(GL_RED_INTEGER, GL_UNSIGNED_BYTE),
        R8Snorm => P::new(GL_RED, GL_BYTE),
        R8Sint => P::new(GL_RED_INTEGER, GL_BYTE),
        Rgb9E5SharedExp => P::new(GL_RGB, GL_UNSIGNED_INT_5_9_9_9_REV),
        B5G6R5Unorm => P::new(GL_RGB, GL_UNSIGNED_SHORT_5_6_5_REV),
        B5G5R5A1Unorm => P::new(GL_RGB, GL_UNSIGNED_SHORT_1_5_5_5_REV),
        Bc1Typeless | Bc1Unorm | Bc1UnormSrgb | Bc6hTypeless | Bc6hUf16 | Bc6hSf16 => {
            P::compressed(GL_RGB)
        }
        Bc2Typeless | Bc2Unorm | Bc2UnormSrgb | Bc3Typeless | Bc3Unorm | Bc3UnormSrgb
        | Bc7Typeless | Bc7Unorm | Bc7UnormSrgb => P::compressed(GL_RGBA),
        Bc4Typeless | Bc4Unorm | Bc4Snorm => P::compressed(GL_RED),
        Bc5Typeless | Bc5Unorm | Bc5Snorm => P::compressed(GL_RG),

        Unknown | A8Unorm | R1Unorm | Rg8B8G8Unorm | G8R8G8B8Unorm | Bgra8Unorm | Bgrx8Unorm
        | R10G10B10XrBiasA2Unorm | Bgra8Typeless | Bgra8UnormSrgb | Bgrx8Typeless
        | Bgrx8UnormSrgb => P::default(),
    }
}

/// Image access token for UAV access flags.
pub fn image_access(access: UavAccessFlags) -> u32 {
    if access.contains(UavAccessFlags::READ_WRITE) {
        GL_READ_WRITE
    } else if access.contains(UavAccessFlags::WRITE) {
        GL_WRITE_ONLY
    } else if access.contains(UavAccessFlags::READ) {
        GL_READ_ONLY
    } else {
        log::warn!("Image access flags are empty, assuming read-write");
        GL_READ_WRITE
    }
}

/// Comparison function token, 0 for [`ComparisonFunction::Unknown`].
pub fn comparison_func(func: ComparisonFunction) -> u32 {
    match func {
        ComparisonFunction::Unknown => 0,
        ComparisonFunction::Never => GL_NEVER,
        ComparisonFunction::Less => GL_LESS,
        ComparisonFunction::Equal => GL_EQUAL,
        ComparisonFunction::LessEqual => GL_LEQUAL,
        ComparisonFunction::Greater => GL_GREATER,
        ComparisonFunction::NotEqual => GL_NOTEQUAL,
        ComparisonFunction::GreaterEqual => GL_GEQUAL,
        ComparisonFunction::Always => GL_ALWAYS,
    }
}

/// Stencil operation token, 0 for [`StencilOp::Undefined`].
pub fn stencil_op(op: StencilOp) -> u32 {
    match op {
        StencilOp::Undefined => 0,
        StencilOp::Keep => GL_KEEP,
        StencilOp::Zero => GL_ZERO,
        StencilOp::Replace => GL_REPLACE,
        StencilOp::IncrSat => GL_INCR,
        StencilOp::DecrSat => GL_DECR,
        StencilOp::Invert => GL_INVERT,
        StencilOp::IncrWrap => GL_INCR_WRAP,
        StencilOp::DecrWrap => GL_DECR_WRAP,
    }
}

pub fn stencil_face(face: StencilFace) -> u32 {
    match face {
        StencilFace::Front => GL_FRONT,
        StencilFace::Back => GL_BACK,
    }
}

pub fn polygon_mode(mode: FillMode) -> u32 {
    match mode {
        FillMode::Wireframe => GL_LINE,
        FillMode::Undefined | FillMode::Solid => GL_FILL,
    }
}

/// Face culled by `mode`, `None` when culling is disabled.
pub fn cull_face(mode: CullMode) -> Option<u32> {
    match mode {
        CullMode::Front => Some(GL_FRONT),
        CullMode::Back => Some(GL_BACK),
        CullMode::None | CullMode::Undefined => None,
    }
}
