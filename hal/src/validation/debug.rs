//! Debug-only bounds checks for texture regions, updates, copies and maps.
//!
//! Every failed check logs an error naming the texture. The functions return
//! `false` if any check failed. They are compiled to no-ops that accept
//! everything unless debug assertions or the `strict-validation` feature are
//! enabled.

use crate::types::{ComponentType, ResourceDimension, TextureDescriptor, TextureRegion};

use super::texture::{align_up, mip_extent, mip_level_properties};

/// Whether the checks in this module run.
pub const ENABLED: bool = cfg!(any(debug_assertions, feature = "strict-validation"));

/// Layout of CPU data used to update a texture region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubresourceLayout {
    /// Bytes between rows (or block rows).
    pub stride: u64,
    /// Bytes between depth slices.
    pub depth_stride: u64,
}

/// Parameters of a texture-to-texture copy.
#[derive(Debug, Clone, Copy)]
pub struct CopyTextureParams<'a> {
    pub src: &'a TextureDescriptor,
    pub src_mip: u32,
    pub src_slice: u32,
    /// Source region. `None` copies the whole source mip level.
    pub src_region: Option<TextureRegion>,
    pub dst: &'a TextureDescriptor,
    pub dst_mip: u32,
    pub dst_slice: u32,
    pub dst_x: u32,
    pub dst_y: u32,
    pub dst_z: u32,
}

struct Checker<'a> {
    desc: &'a TextureDescriptor,
    valid: bool,
}

impl<'a> Checker<'a> {
    fn new(desc: &'a TextureDescriptor) -> Self {
        Self { desc, valid: true }
    }

    fn check(&mut self, ok: bool, message: impl FnOnce() -> String) {
        if !ok {
            log::error!("Texture \"{}\": {}", self.desc.name(), message());
            self.valid = false;
        }
    }

    fn check_subresource(&mut self, mip: u32, slice: u32) {
        let desc = self.desc;
        self.check(mip < desc.mip_levels, || {
            format!(
                "mip level ({mip}) is out of allowed range [0, {}]",
                desc.mip_levels.saturating_sub(1)
            )
        });
        if desc.dimension.is_array() {
            let array_size = desc.array_size();
            self.check(slice < array_size, || {
                format!(
                    "array slice ({slice}) is out of range [0, {}]",
                    array_size.saturating_sub(1)
                )
            });
        } else {
            self.check(slice == 0, || {
                format!("array slice ({slice}) must be 0 for non-array textures")
            });
        }
    }
}

fn check_region(checker: &mut Checker<'_>, mip: u32, slice: u32, region: &TextureRegion) {
    let desc = checker.desc;
    checker.check_subresource(mip, slice);
    checker.check(region.min_x < region.max_x, || {
        format!("invalid X range: {}..{}", region.min_x, region.max_x)
    });
    checker.check(region.min_y < region.max_y, || {
        format!("invalid Y range: {}..{}", region.min_y, region.max_y)
    });
    checker.check(region.min_z < region.max_z, || {
        format!("invalid Z range: {}..{}", region.min_z, region.max_z)
    });

    let info = desc.format.info();
    let compressed = info.component_type == ComponentType::Compressed;

    let mut axes = vec![("X", region.min_x, region.max_x, desc.width, info.block_width)];
    if !desc.dimension.is_1d() {
        axes.push(("Y", region.min_y, region.max_y, desc.height, info.block_height));
    }
    for (axis, min, max, extent, block) in axes {
        let mip_size = mip_extent(extent, mip);
        if compressed {
            let block = u32::from(block);
            let aligned = align_up(mip_size, block);
            checker.check(max <= aligned, || {
                format!("region max {axis} coordinate ({max}) is out of allowed range [0, {aligned}]")
            });
            checker.check(min % block == 0, || {
                format!(
                    "for compressed formats, the region min {axis} coordinate ({min}) must be a multiple of the block size ({block})"
                )
            });
            checker.check(max % block == 0 || max == mip_size, || {
                format!(
                    "for compressed formats, the region max {axis} coordinate ({max}) must be a multiple of the block size ({block}) or equal the mip size ({mip_size})"
                )
            });
        } else {
            checker.check(max <= mip_size, || {
                format!("region max {axis} coordinate ({max}) is out of allowed range [0, {mip_size}]")
            });
        }
    }

    if desc.dimension == ResourceDimension::Tex3D {
        let mip_depth = mip_extent(desc.depth(), mip);
        checker.check(region.max_z <= mip_depth, || {
            format!(
                "region max Z coordinate ({}) is out of allowed range [0, {mip_depth}]",
                region.max_z
            )
        });
    } else {
        checker.check(region.min_z == 0, || {
            format!("region min Z ({}) must be 0 for all but 3D textures", region.min_z)
        });
        checker.check(region.max_z == 1, || {
            format!("region max Z ({}) must be 1 for all but 3D textures", region.max_z)
        });
    }
}

/// Check that `region` lies within mip level `mip` and slice `slice` of the texture.
pub fn validate_texture_region(
    desc: &TextureDescriptor,
    mip: u32,
    slice: u32,
    region: &TextureRegion,
) -> bool {
    if !ENABLED {
        return true;
    }
    let mut checker = Checker::new(desc);
    check_region(&mut checker, mip, slice, region);
    checker.valid
}

/// Check the parameters of a CPU upload into `region`.
pub fn validate_update_texture_params(
    desc: &TextureDescriptor,
    mip: u32,
    slice: u32,
    region: &TextureRegion,
    layout: &SubresourceLayout,
) -> bool {
    if !ENABLED {
        return true;
    }
    let mut checker = Checker::new(desc);
    check_region(&mut checker, mip, slice, region);

    checker.check(desc.sample_count == 1, || {
        "only non-multisampled textures can be updated".to_string()
    });
    checker.check(layout.stride % 4 == 0, || {
        format!("data stride ({}) must be at least 32-bit aligned", layout.stride)
    });
    checker.check(layout.depth_stride % 4 == 0, || {
        format!(
            "data depth stride ({}) must be at least 32-bit aligned",
            layout.depth_stride
        )
    });

    let info = desc.format.info();
    let (row_size, row_count) = if info.component_type == ComponentType::Compressed {
        let block_w = u32::from(info.block_width);
        let block_h = u32::from(info.block_height);
        let width = align_up(region.width(), block_w);
        let height = align_up(region.height(), block_h);
        (
            u64::from(width / block_w) * u64::from(info.component_size),
            u64::from(height / block_h),
        )
    } else {
        (
            u64::from(region.width()) * u64::from(info.texel_size()),
            u64::from(region.height()),
        )
    };
    checker.check(layout.stride >= row_size, || {
        format!(
            "data stride ({}) is below the region row size ({row_size})",
            layout.stride
        )
    });
    let plane_size = layout.stride * row_count;
    checker.check(region.depth() == 1 || layout.depth_stride >= plane_size, || {
        format!(
            "data depth stride ({}) is below the region plane size ({plane_size})",
            layout.depth_stride
        )
    });

    checker.valid
}

/// Check both ends of a texture copy.
pub fn validate_copy_texture_params(params: &CopyTextureParams<'_>) -> bool {
    if !ENABLED {
        return true;
    }
    let src_region = params.src_region.unwrap_or_else(|| {
        let props = mip_level_properties(params.src, params.src_mip);
        TextureRegion::new(0, props.logical_width, 0, props.logical_height, 0, props.depth)
    });
    let mut src = Checker::new(params.src);
    check_region(&mut src, params.src_mip, params.src_slice, &src_region);

    let dst_region = TextureRegion::new(
        params.dst_x,
        params.dst_x.saturating_add(src_region.width()),
        params.dst_y,
        params.dst_y.saturating_add(src_region.height()),
        params.dst_z,
        params.dst_z.saturating_add(src_region.depth()),
    );
    let mut dst = Checker::new(params.dst);
    check_region(&mut dst, params.dst_mip, params.dst_slice, &dst_region);

    src.valid && dst.valid
}

/// Check the subresource and optional region of a texture map.
pub fn validate_map_texture_params(
    desc: &TextureDescriptor,
    mip: u32,
    slice: u32,
    region: Option<&TextureRegion>,
) -> bool {
    if !ENABLED {
        return true;
    }
    let mut checker = Checker::new(desc);
    match region {
        Some(region) => check_region(&mut checker, mip, slice, region),
        None => checker.check_subresource(mip, slice),
    }
    checker.valid
}

#[cfg(all(test, any(debug_assertions, feature = "strict-validation")))]
mod tests {
    use super::*;
    use crate::types::{BindFlags, TextureFormat};

    fn rgba_2d() -> TextureDescriptor {
        TextureDescriptor::new_2d(64, 32, TextureFormat::Rgba8Unorm, BindFlags::SHADER_RESOURCE)
            .with_mip_levels(3)
    }

    fn bc1_2d() -> TextureDescriptor {
        TextureDescriptor::new_2d(30, 30, TextureFormat::Bc1Unorm, BindFlags::SHADER_RESOURCE)
            .with_mip_levels(2)
    }

    #[test]
    fn test_region_within_mip() {
        let desc = rgba_2d();
        assert!(validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(0, 64, 0, 32)));
        assert!(validate_texture_region(&desc, 1, 0, &TextureRegion::new_2d(8, 32, 0, 16)));
        assert!(!validate_texture_region(&desc, 1, 0, &TextureRegion::new_2d(0, 33, 0, 16)));
        assert!(!validate_texture_region(&desc, 3, 0, &TextureRegion::new_2d(0, 1, 0, 1)));
        assert!(!validate_texture_region(&desc, 0, 1, &TextureRegion::new_2d(0, 1, 0, 1)));
        assert!(!validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(4, 4, 0, 1)));
        assert!(!validate_texture_region(&desc, 0, 0, &TextureRegion::new(0, 4, 0, 4, 0, 2)));
    }

    #[test]
    fn test_compressed_region_alignment() {
        let desc = bc1_2d();
        // Whole level, max equal to the unaligned width.
        assert!(validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(0, 30, 0, 30)));
        // Block-aligned max past the mip edge.
        assert!(validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(28, 32, 28, 32)));
        assert!(!validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(2, 8, 0, 4)));
        assert!(!validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(0, 6, 0, 4)));
        assert!(!validate_texture_region(&desc, 0, 0, &TextureRegion::new_2d(0, 36, 0, 4)));
    }

    #[test]
    fn test_volume_region() {
        let desc = TextureDescriptor::new_3d(8, 8, 8, TextureFormat::R8Unorm, BindFlags::empty())
            .with_mip_levels(2);
        assert!(validate_texture_region(&desc, 1, 0, &TextureRegion::new(0, 4, 0, 4, 2, 4)));
        assert!(!validate_texture_region(&desc, 1, 0, &TextureRegion::new(0, 4, 0, 4, 2, 5)));
    }

    #[test]
    fn test_update_layout() {
        let desc = rgba_2d();
        let region = TextureRegion::new_2d(0, 16, 0, 16);
        let tight = SubresourceLayout {
            stride: 64,
            depth_stride: 0,
        };
        assert!(validate_update_texture_params(&desc, 0, 0, &region, &tight));

        let short = SubresourceLayout {
            stride: 60,
            depth_stride: 0,
        };
        assert!(!validate_update_texture_params(&desc, 0, 0, &region, &short));

        let unaligned = SubresourceLayout {
            stride: 66,
            depth_stride: 0,
        };
        assert!(!validate_update_texture_params(&desc, 0, 0, &region, &unaligned));

        let ms = rgba_2d().with_mip_levels(1).with_sample_count(4);
        assert!(!validate_update_texture_params(&ms, 0, 0, &region, &tight));
    }

    #[test]
    fn test_update_layout_compressed() {
        let desc = bc1_2d();
        // 30 texels round up to 8 blocks of 8 bytes.
        let region = TextureRegion::new_2d(0, 30, 0, 30);
        let layout = SubresourceLayout {
            stride: 64,
            depth_stride: 0,
        };
        assert!(validate_update_texture_params(&desc, 0, 0, &region, &layout));
        let short = SubresourceLayout {
            stride: 56,
            depth_stride: 0,
        };
        assert!(!validate_update_texture_params(&desc, 0, 0, &region, &short));
    }

    #[test]
    fn test_copy_defaults_to_whole_source_mip() {
        let src = rgba_2d();
        let dst = TextureDescriptor::new_2d(128, 64, TextureFormat::Rgba8Unorm, BindFlags::empty());
        let params = CopyTextureParams {
            src: &src,
            src_mip: 1,
            src_slice: 0,
            src_region: None,
            dst: &dst,
            dst_mip: 0,
            dst_slice: 0,
            dst_x: 96,
            dst_y: 48,
            dst_z: 0,
        };
        assert!(validate_copy_texture_params(&params));

        let overflow = CopyTextureParams {
            dst_x: 100,
            ..params
        };
        assert!(!validate_copy_texture_params(&overflow));
    }

    #[test]
    fn test_map_params() {
        let desc = TextureDescriptor::new_2d(16, 16, TextureFormat::Rgba8Unorm, BindFlags::empty())
            .with_dimension(ResourceDimension::Tex2DArray)
            .with_array_size(4);
        assert!(validate_map_texture_params(&desc, 0, 3, None));
        assert!(!validate_map_texture_params(&desc, 0, 4, None));
        assert!(!validate_map_texture_params(&desc, 1, 0, None));
        let region = TextureRegion::new_2d(0, 8, 0, 8);
        assert!(validate_map_texture_params(&desc, 0, 2, Some(&region)));
    }
}
