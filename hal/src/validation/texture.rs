//! Texture descriptor validation.

use crate::error::{GraphicsError, TextureDescError};
use crate::types::{
    BindFlags, ComponentType, CpuAccessFlags, MipLevelProperties, MiscTextureFlags,
    ResourceDimension, TextureDescriptor, Usage,
};

/// Number of mip levels in a full chain for a texture whose largest extent is `max_dim`.
///
/// Returns 0 for a zero extent.
pub fn compute_mip_levels_count(max_dim: u32) -> u32 {
    u32::BITS - max_dim.leading_zeros()
}

/// Largest extent that takes part in mip reduction for `desc`.
pub fn max_mip_dimension(desc: &TextureDescriptor) -> u32 {
    match desc.dimension {
        ResourceDimension::Tex1D | ResourceDimension::Tex1DArray => desc.width,
        ResourceDimension::Tex3D => desc.width.max(desc.height).max(desc.depth_or_array_size),
        _ => desc.width.max(desc.height),
    }
}

fn invalid(desc: &TextureDescriptor, reason: TextureDescError) -> GraphicsError {
    log::error!("Texture \"{}\": {}", desc.name(), reason);
    GraphicsError::InvalidDescription {
        texture: desc.name().to_string(),
        reason,
    }
}

/// Validate a texture descriptor and fill in the mip level count.
///
/// Returns the completed descriptor. Rules are checked in a fixed order and
/// the first violation is reported.
pub fn validate_texture_desc(desc: &TextureDescriptor) -> Result<TextureDescriptor, GraphicsError> {
    use ResourceDimension as D;

    let dimension = desc.dimension;
    if dimension == D::Undefined {
        return Err(invalid(desc, TextureDescError::UndefinedDimension));
    }

    if desc.width == 0 {
        return Err(invalid(desc, TextureDescError::ZeroWidth));
    }

    if dimension.is_1d() {
        if desc.height != 1 {
            return Err(invalid(desc, TextureDescError::Height1D(desc.height)));
        }
    } else if desc.height == 0 {
        return Err(invalid(desc, TextureDescError::ZeroHeight));
    }

    if dimension == D::Tex3D && desc.depth_or_array_size == 0 {
        return Err(invalid(desc, TextureDescError::ZeroDepth));
    }

    if matches!(dimension, D::Tex1D | D::Tex2D) && desc.depth_or_array_size != 1 {
        return Err(invalid(
            desc,
            TextureDescError::NonArraySize(desc.depth_or_array_size),
        ));
    }

    if dimension.is_cube() {
        if desc.width != desc.height {
            return Err(invalid(
                desc,
                TextureDescError::CubeNotSquare {
                    width: desc.width,
                    height: desc.height,
                },
            ));
        }
        let slices = desc.depth_or_array_size;
        if slices < 6 {
            return Err(invalid(desc, TextureDescError::CubeTooFewSlices(slices)));
        }
        if slices % 6 != 0 {
            return Err(invalid(desc, TextureDescError::CubeSlicesNotMultipleOf6(slices)));
        }
    }

    let mut validated = desc.clone();
    let full_chain = compute_mip_levels_count(max_mip_dimension(desc));
    if validated.mip_levels == 0 {
        validated.mip_levels = full_chain;
    } else if validated.mip_levels > full_chain {
        return Err(invalid(
            desc,
            TextureDescError::TooManyMips {
                requested: validated.mip_levels,
                max: full_chain,
            },
        ));
    }

    if validated.sample_count > 1 {
        if !matches!(dimension, D::Tex2D | D::Tex2DArray) {
            return Err(invalid(desc, TextureDescError::MultisampledDimension(dimension)));
        }
        if validated.mip_levels != 1 {
            return Err(invalid(
                desc,
                TextureDescError::MultisampledMips(validated.mip_levels),
            ));
        }
        if validated.bind_flags.contains(BindFlags::UNORDERED_ACCESS) {
            return Err(invalid(desc, TextureDescError::MultisampledUav));
        }
    }

    if validated.usage == Usage::Staging {
        if !validated.bind_flags.is_empty() {
            return Err(invalid(desc, TextureDescError::StagingBindFlags));
        }
        if validated.misc_flags.contains(MiscTextureFlags::GENERATE_MIPS) {
            return Err(invalid(desc, TextureDescError::StagingGenerateMips));
        }
        if validated.cpu_access.is_empty() {
            return Err(invalid(desc, TextureDescError::StagingNoCpuAccess));
        }
        if validated.cpu_access.contains(CpuAccessFlags::READ | CpuAccessFlags::WRITE) {
            return Err(invalid(desc, TextureDescError::StagingReadWrite));
        }
    }

    if validated.bind_flags.contains(BindFlags::RENDER_TARGET) && validated.format.is_snorm_color() {
        log::warn!(
            "Texture \"{}\": {:?} texture is created with the render target bind flag. \
             Some drivers clamp negative values to zero when rendering to SNORM textures; \
             use a UNORM format instead",
            desc.name(),
            validated.format
        );
    }

    Ok(validated)
}

/// Size and memory layout of mip level `mip` of a texture.
pub fn mip_level_properties(desc: &TextureDescriptor, mip: u32) -> MipLevelProperties {
    let info = desc.format.info();
    let logical_width = mip_extent(desc.width, mip);
    let logical_height = if desc.dimension.is_1d() {
        1
    } else {
        mip_extent(desc.height, mip)
    };
    let depth = if desc.dimension == ResourceDimension::Tex3D {
        mip_extent(desc.depth_or_array_size, mip)
    } else {
        1
    };

    let (storage_width, storage_height, row_size, row_count) =
        if info.component_type == ComponentType::Compressed {
            let block_w = u32::from(info.block_width);
            let block_h = u32::from(info.block_height);
            let storage_width = align_up(logical_width, block_w);
            let storage_height = align_up(logical_height, block_h);
            let row_size = u64::from(storage_width / block_w) * u64::from(info.component_size);
            (storage_width, storage_height, row_size, storage_height / block_h)
        } else {
            let row_size = u64::from(logical_width) * u64::from(info.texel_size());
            (logical_width, logical_height, row_size, logical_height)
        };

    let depth_slice_size = row_size * u64::from(row_count);
    MipLevelProperties {
        logical_width,
        logical_height,
        storage_width,
        storage_height,
        depth,
        row_size,
        depth_slice_size,
        mip_size: depth_slice_size * u64::from(depth),
    }
}

/// Extent of mip level `mip` for a base extent, never less than 1.
pub(crate) fn mip_extent(extent: u32, mip: u32) -> u32 {
    extent.checked_shr(mip).unwrap_or(0).max(1)
}

/// Round `value` up to a multiple of `alignment`, a power of two.
pub(crate) fn align_up(value: u32, alignment: u32) -> u32 {
    debug_assert!(alignment.is_power_of_two());
    (value + (alignment - 1)) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextureFormat;
    use rstest::rstest;

    fn color_2d(width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor::new_2d(width, height, TextureFormat::Rgba8Unorm, BindFlags::SHADER_RESOURCE)
            .with_label("test")
    }

    fn reason(result: Result<TextureDescriptor, GraphicsError>) -> TextureDescError {
        match result {
            Err(GraphicsError::InvalidDescription { reason, .. }) => reason,
            other => panic!("expected an invalid description, got {other:?}"),
        }
    }

    #[rstest]
    #[case::one(1, 1)]
    #[case::two(2, 2)]
    #[case::three(3, 2)]
    #[case::pow2(256, 9)]
    #[case::npot(1000, 10)]
    #[case::max(u32::MAX, 32)]
    fn test_mip_count(#[case] max_dim: u32, #[case] expected: u32) {
        assert_eq!(compute_mip_levels_count(max_dim), expected);
    }

    #[test]
    fn test_full_chain_uses_largest_extent() {
        let desc = color_2d(64, 512).with_mip_levels(0);
        assert_eq!(validate_texture_desc(&desc).unwrap().mip_levels, 10);

        let volume =
            TextureDescriptor::new_3d(4, 4, 32, TextureFormat::R8Unorm, BindFlags::empty())
                .with_mip_levels(0);
        assert_eq!(validate_texture_desc(&volume).unwrap().mip_levels, 6);

        let line = TextureDescriptor::new_1d(128, TextureFormat::R8Unorm, BindFlags::empty())
            .with_mip_levels(0);
        assert_eq!(validate_texture_desc(&line).unwrap().mip_levels, 8);
    }

    #[test]
    fn test_explicit_mip_count_is_kept() {
        let desc = color_2d(256, 256).with_mip_levels(3);
        assert_eq!(validate_texture_desc(&desc).unwrap().mip_levels, 3);
    }

    #[test]
    fn test_structural_rules() {
        let undefined = color_2d(4, 4).with_dimension(ResourceDimension::Undefined);
        assert_eq!(reason(validate_texture_desc(&undefined)), TextureDescError::UndefinedDimension);

        assert_eq!(reason(validate_texture_desc(&color_2d(0, 4))), TextureDescError::ZeroWidth);
        assert_eq!(reason(validate_texture_desc(&color_2d(4, 0))), TextureDescError::ZeroHeight);

        let mut line = TextureDescriptor::new_1d(16, TextureFormat::R8Unorm, BindFlags::empty());
        line.height = 2;
        assert_eq!(reason(validate_texture_desc(&line)), TextureDescError::Height1D(2));

        let flat_volume =
            TextureDescriptor::new_3d(4, 4, 0, TextureFormat::R8Unorm, BindFlags::empty());
        assert_eq!(reason(validate_texture_desc(&flat_volume)), TextureDescError::ZeroDepth);

        let layered_2d = color_2d(4, 4).with_array_size(3);
        assert_eq!(reason(validate_texture_desc(&layered_2d)), TextureDescError::NonArraySize(3));

        let too_many = color_2d(4, 4).with_mip_levels(4);
        assert_eq!(
            reason(validate_texture_desc(&too_many)),
            TextureDescError::TooManyMips { requested: 4, max: 3 }
        );
    }

    #[test]
    fn test_cube_rules() {
        let mut cube = TextureDescriptor::new_cube(64, TextureFormat::Rgba8Unorm, BindFlags::empty());
        cube.height = 32;
        assert_eq!(
            reason(validate_texture_desc(&cube)),
            TextureDescError::CubeNotSquare { width: 64, height: 32 }
        );

        let cube = TextureDescriptor::new_cube(64, TextureFormat::Rgba8Unorm, BindFlags::empty())
            .with_array_size(4);
        assert_eq!(reason(validate_texture_desc(&cube)), TextureDescError::CubeTooFewSlices(4));

        let cube_array =
            TextureDescriptor::new_cube(64, TextureFormat::Rgba8Unorm, BindFlags::empty())
                .with_dimension(ResourceDimension::TexCubeArray)
                .with_array_size(8);
        assert_eq!(
            reason(validate_texture_desc(&cube_array)),
            TextureDescError::CubeSlicesNotMultipleOf6(8)
        );

        let cube_array = cube_array.with_array_size(12);
        assert!(validate_texture_desc(&cube_array).is_ok());
    }

    #[test]
    fn test_multisample_rules() {
        let ms = color_2d(64, 64).with_sample_count(4);
        assert!(validate_texture_desc(&ms).is_ok());

        let ms_full_chain = ms.clone().with_mip_levels(0);
        assert_eq!(
            reason(validate_texture_desc(&ms_full_chain)),
            TextureDescError::MultisampledMips(7)
        );

        let mut ms_uav = ms.clone();
        ms_uav.bind_flags |= BindFlags::UNORDERED_ACCESS;
        assert_eq!(reason(validate_texture_desc(&ms_uav)), TextureDescError::MultisampledUav);

        let ms_cube = TextureDescriptor::new_cube(64, TextureFormat::Rgba8Unorm, BindFlags::empty())
            .with_sample_count(4);
        assert_eq!(
            reason(validate_texture_desc(&ms_cube)),
            TextureDescError::MultisampledDimension(ResourceDimension::TexCube)
        );
    }

    #[test]
    fn test_staging_rules() {
        let staging = TextureDescriptor::new_2d(16, 16, TextureFormat::Rgba8Unorm, BindFlags::empty())
            .with_usage(Usage::Staging)
            .with_cpu_access(CpuAccessFlags::READ);
        assert!(validate_texture_desc(&staging).is_ok());

        let mut bound = staging.clone();
        bound.bind_flags = BindFlags::SHADER_RESOURCE;
        assert_eq!(reason(validate_texture_desc(&bound)), TextureDescError::StagingBindFlags);

        let mips = staging.clone().with_misc_flags(MiscTextureFlags::GENERATE_MIPS);
        assert_eq!(reason(validate_texture_desc(&mips)), TextureDescError::StagingGenerateMips);

        let no_access = staging.clone().with_cpu_access(CpuAccessFlags::empty());
        assert_eq!(reason(validate_texture_desc(&no_access)), TextureDescError::StagingNoCpuAccess);

        let both = staging.with_cpu_access(CpuAccessFlags::READ | CpuAccessFlags::WRITE);
        assert_eq!(reason(validate_texture_desc(&both)), TextureDescError::StagingReadWrite);
    }

    #[test]
    fn test_snorm_render_target_only_warns() {
        let desc = TextureDescriptor::new_2d(
            32,
            32,
            TextureFormat::Rgba8Snorm,
            BindFlags::RENDER_TARGET,
        );
        assert!(validate_texture_desc(&desc).is_ok());
    }

    #[test]
    fn test_mip_properties_uncompressed() {
        let desc = color_2d(256, 100).with_mip_levels(0);
        let props = mip_level_properties(&desc, 3);
        assert_eq!((props.logical_width, props.logical_height), (32, 12));
        assert_eq!((props.storage_width, props.storage_height), (32, 12));
        assert_eq!(props.row_size, 32 * 4);
        assert_eq!(props.depth_slice_size, 32 * 4 * 12);
        assert_eq!(props.mip_size, props.depth_slice_size);

        let last = mip_level_properties(&desc, 8);
        assert_eq!((last.logical_width, last.logical_height), (1, 1));
    }

    #[test]
    fn test_mip_properties_compressed() {
        let desc = TextureDescriptor::new_2d(
            100,
            60,
            TextureFormat::Bc1Unorm,
            BindFlags::SHADER_RESOURCE,
        );
        let props = mip_level_properties(&desc, 1);
        assert_eq!((props.logical_width, props.logical_height), (50, 30));
        assert_eq!((props.storage_width, props.storage_height), (52, 32));
        assert_eq!(props.row_size, 13 * 8);
        assert_eq!(props.depth_slice_size, 8 * 13 * 8);

        let tail = mip_level_properties(&desc, 6);
        assert_eq!((tail.storage_width, tail.storage_height), (4, 4));
        assert_eq!(tail.mip_size, 8);
    }

    #[test]
    fn test_mip_properties_volume() {
        let desc = TextureDescriptor::new_3d(8, 8, 8, TextureFormat::R32Float, BindFlags::empty());
        let props = mip_level_properties(&desc, 1);
        assert_eq!(props.depth, 4);
        assert_eq!(props.mip_size, 4 * 4 * 4 * 4);
    }
}
