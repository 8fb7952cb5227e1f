//! Type conversions between HAL types and wgpu types.

use crate::types::{BindFlags, ResourceDimension, TextureFormat};

/// Convert TextureFormat to wgpu format, `None` if wgpu has no equivalent.
pub fn convert_texture_format(format: TextureFormat) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as W;

    let converted = match format {
        // 8-bit formats
        TextureFormat::R8Unorm => W::R8Unorm,
        TextureFormat::R8Snorm => W::R8Snorm,
        TextureFormat::R8Uint => W::R8Uint,
        TextureFormat::R8Sint => W::R8Sint,

        // 16-bit formats
        TextureFormat::R16Unorm => W::R16Unorm,
        TextureFormat::R16Snorm => W::R16Snorm,
        TextureFormat::R16Uint => W::R16Uint,
        TextureFormat::R16Sint => W::R16Sint,
        TextureFormat::R16Float => W::R16Float,
        TextureFormat::Rg8Unorm => W::Rg8Unorm,
        TextureFormat::Rg8Snorm => W::Rg8Snorm,
        TextureFormat::Rg8Uint => W::Rg8Uint,
        TextureFormat::Rg8Sint => W::Rg8Sint,

        // 32-bit formats
        TextureFormat::R32Float => W::R32Float,
        TextureFormat::R32Uint => W::R32Uint,
        TextureFormat::R32Sint => W::R32Sint,
        TextureFormat::Rg16Unorm => W::Rg16Unorm,
        TextureFormat::Rg16Snorm => W::Rg16Snorm,
        TextureFormat::Rg16Uint => W::Rg16Uint,
        TextureFormat::Rg16Sint => W::Rg16Sint,
        TextureFormat::Rg16Float => W::Rg16Float,
        TextureFormat::Rgba8Unorm => W::Rgba8Unorm,
        TextureFormat::Rgba8UnormSrgb => W::Rgba8UnormSrgb,
        TextureFormat::Rgba8Snorm => W::Rgba8Snorm,
        TextureFormat::Rgba8Uint => W::Rgba8Uint,
        TextureFormat::Rgba8Sint => W::Rgba8Sint,
        TextureFormat::Bgra8Unorm => W::Bgra8Unorm,
        TextureFormat::Bgra8UnormSrgb => W::Bgra8UnormSrgb,
        TextureFormat::Rgb10A2Unorm => W::Rgb10a2Unorm,
        TextureFormat::Rgb9E5SharedExp => W::Rgb9e5Ufloat,

        // 64-bit formats
        TextureFormat::Rg32Float => W::Rg32Float,
        TextureFormat::Rg32Uint => W::Rg32Uint,
        TextureFormat::Rg32Sint => W::Rg32Sint,
        TextureFormat::Rgba16Unorm => W::Rgba16Unorm,
        TextureFormat::Rgba16Snorm => W::Rgba16Snorm,
        TextureFormat::Rgba16Uint => W::Rgba16Uint,
        TextureFormat::Rgba16Sint => W::Rgba16Sint,
        TextureFormat::Rgba16Float => W::Rgba16Float,

        // 128-bit formats
        TextureFormat::Rgba32Float => W::Rgba32Float,
        TextureFormat::Rgba32Uint => W::Rgba32Uint,
        TextureFormat::Rgba32Sint => W::Rgba32Sint,

        // Depth/stencil formats
        TextureFormat::D16Unorm => W::Depth16Unorm,
        TextureFormat::D24UnormS8Uint => W::Depth24PlusStencil8,
        TextureFormat::D32Float => W::Depth32Float,
        TextureFormat::D32FloatS8X24Uint => W::Depth32FloatStencil8,

        // Block-compressed formats
        TextureFormat::Bc1Unorm => W::Bc1RgbaUnorm,
        TextureFormat::Bc1UnormSrgb => W::Bc1RgbaUnormSrgb,
        TextureFormat::Bc2Unorm => W::Bc2RgbaUnorm,
        TextureFormat::Bc2UnormSrgb => W::Bc2RgbaUnormSrgb,
        TextureFormat::Bc3Unorm => W::Bc3RgbaUnorm,
        TextureFormat::Bc3UnormSrgb => W::Bc3RgbaUnormSrgb,
        TextureFormat::Bc4Unorm => W::Bc4RUnorm,
        TextureFormat::Bc4Snorm => W::Bc4RSnorm,
        TextureFormat::Bc5Unorm => W::Bc5RgUnorm,
        TextureFormat::Bc5Snorm => W::Bc5RgSnorm,
        TextureFormat::Bc6hUf16 => W::Bc6hRgbUfloat,
        TextureFormat::Bc6hSf16 => W::Bc6hRgbFloat,
        TextureFormat::Bc7Unorm => W::Bc7RgbaUnorm,
        TextureFormat::Bc7UnormSrgb => W::Bc7RgbaUnormSrgb,

        _ => return None,
    };
    Some(converted)
}

/// Convert a texture dimension to the wgpu storage dimension.
pub fn convert_texture_dimension(dimension: ResourceDimension) -> Option<wgpu::TextureDimension> {
    match dimension {
        ResourceDimension::Undefined => None,
        ResourceDimension::Tex1D | ResourceDimension::Tex1DArray => {
            Some(wgpu::TextureDimension::D1)
        }
        ResourceDimension::Tex2D
        | ResourceDimension::Tex2DArray
        | ResourceDimension::TexCube
        | ResourceDimension::TexCubeArray => Some(wgpu::TextureDimension::D2),
        ResourceDimension::Tex3D => Some(wgpu::TextureDimension::D3),
    }
}

/// Convert a view dimension to the wgpu view dimension.
pub fn convert_view_dimension(dimension: ResourceDimension) -> Option<wgpu::TextureViewDimension> {
    match dimension {
        ResourceDimension::Undefined | ResourceDimension::Tex1DArray => None,
        ResourceDimension::Tex1D => Some(wgpu::TextureViewDimension::D1),
        ResourceDimension::Tex2D => Some(wgpu::TextureViewDimension::D2),
        ResourceDimension::Tex2DArray => Some(wgpu::TextureViewDimension::D2Array),
        ResourceDimension::Tex3D => Some(wgpu::TextureViewDimension::D3),
        ResourceDimension::TexCube => Some(wgpu::TextureViewDimension::Cube),
        ResourceDimension::TexCubeArray => Some(wgpu::TextureViewDimension::CubeArray),
    }
}

/// Convert BindFlags to wgpu texture usages.
pub fn convert_bind_flags(flags: BindFlags) -> wgpu::TextureUsages {
    let mut result = wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::COPY_DST;

    if flags.contains(BindFlags::SHADER_RESOURCE) {
        result |= wgpu::TextureUsages::TEXTURE_BINDING;
    }
    if flags.intersects(BindFlags::RENDER_TARGET | BindFlags::DEPTH_STENCIL) {
        result |= wgpu::TextureUsages::RENDER_ATTACHMENT;
    }
    if flags.contains(BindFlags::UNORDERED_ACCESS) {
        result |= wgpu::TextureUsages::STORAGE_BINDING;
    }

    result
}
