//! Texture view descriptor correction.
//!
//! [`correct_texture_view_desc`] fills every unset field of a view descriptor
//! from its texture and rejects views that do not fit the texture. The output
//! never contains sentinel values, and correcting it again is a no-op.

use crate::error::{GraphicsError, ViewDescError};
use crate::types::{
    ResourceDimension, TextureDescriptor, TextureFormat, TextureViewDescriptor, TextureViewType,
    default_view_format, is_remaining,
};

use super::texture::mip_extent;

fn invalid(
    texture: &TextureDescriptor,
    view: &TextureViewDescriptor,
    reason: ViewDescError,
) -> GraphicsError {
    log::error!(
        "Texture view \"{}\" of texture \"{}\": {}",
        view.name(),
        texture.name(),
        reason
    );
    GraphicsError::InvalidView {
        texture: texture.name().to_string(),
        view: view.name().to_string(),
        reason,
    }
}

/// Dimension a view of `view_type` gets when none is requested.
fn default_view_dimension(
    texture_dimension: ResourceDimension,
    view_type: TextureViewType,
) -> ResourceDimension {
    if texture_dimension.is_cube() && view_type != TextureViewType::ShaderResource {
        ResourceDimension::Tex2DArray
    } else {
        texture_dimension
    }
}

/// Whether a view of dimension `view` may be created on a texture of dimension `texture`.
fn is_dimension_compatible(
    texture: ResourceDimension,
    view: ResourceDimension,
    view_type: TextureViewType,
) -> bool {
    use ResourceDimension as D;

    let srv = view_type == TextureViewType::ShaderResource;
    match texture {
        D::Tex1D => view == D::Tex1D,
        D::Tex1DArray => matches!(view, D::Tex1D | D::Tex1DArray),
        D::Tex2D | D::Tex2DArray => matches!(view, D::Tex2D | D::Tex2DArray),
        D::Tex3D => view == D::Tex3D,
        D::TexCube => matches!(view, D::Tex2D | D::Tex2DArray) || (srv && view == D::TexCube),
        D::TexCubeArray => {
            matches!(view, D::Tex2D | D::Tex2DArray)
                || (srv && matches!(view, D::TexCube | D::TexCubeArray))
        }
        D::Undefined => false,
    }
}

/// Complete and check a texture view descriptor against its texture.
///
/// `texture` must be a validated descriptor.
pub fn correct_texture_view_desc(
    texture: &TextureDescriptor,
    view: &TextureViewDescriptor,
) -> Result<TextureViewDescriptor, GraphicsError> {
    use ResourceDimension as D;

    let fail = |reason| Err(invalid(texture, view, reason));
    let mut corrected = view.clone();

    if view.view_type == TextureViewType::Undefined {
        return fail(ViewDescError::UndefinedViewType);
    }

    // Mip range
    if view.most_detailed_mip >= texture.mip_levels {
        return fail(ViewDescError::MostDetailedMipOutOfRange {
            mip: view.most_detailed_mip,
            mip_levels: texture.mip_levels,
        });
    }
    if !is_remaining(view.num_mip_levels) {
        let end = u64::from(view.most_detailed_mip) + u64::from(view.num_mip_levels);
        if end > u64::from(texture.mip_levels) {
            return fail(ViewDescError::MipRangeOutOfBounds {
                first: view.most_detailed_mip,
                end: view.most_detailed_mip.saturating_add(view.num_mip_levels),
                mip_levels: texture.mip_levels,
            });
        }
    }

    if corrected.format == TextureFormat::Unknown {
        corrected.format = default_view_format(texture.format, view.view_type, texture.bind_flags);
    }

    if corrected.dimension == D::Undefined {
        corrected.dimension = default_view_dimension(texture.dimension, view.view_type);
    }

    if !is_dimension_compatible(texture.dimension, corrected.dimension, view.view_type) {
        if corrected.dimension.is_cube() && view.view_type != TextureViewType::ShaderResource {
            return fail(ViewDescError::CubeViewNotShaderResource(
                view.view_type.short_name(),
            ));
        }
        return fail(ViewDescError::IncompatibleDimension {
            view: corrected.dimension,
            texture: texture.dimension,
        });
    }

    // Slice range
    let first = view.first_slice;
    let count = view.num_slices;
    let array_size = texture.array_size();
    match corrected.dimension {
        D::TexCube => {
            if first != 0 || !(is_remaining(count) || count == 6) {
                return fail(ViewDescError::InvalidCubeSlices { first, count });
            }
            corrected.num_slices = 6;
        }
        D::Tex1DArray | D::Tex2DArray | D::TexCubeArray => {
            if first >= array_size {
                return fail(ViewDescError::FirstSliceOutOfRange { first, array_size });
            }
            let available = array_size - first;
            if corrected.dimension == D::TexCubeArray {
                if !is_remaining(count) && count % 6 != 0 {
                    return fail(ViewDescError::CubeArraySlicesNotMultipleOf6(count));
                }
                if is_remaining(count) && available < 6 {
                    return fail(ViewDescError::CubeArraySlicesNotMultipleOf6(available));
                }
            }
            if is_remaining(count) {
                corrected.num_slices = if corrected.dimension == D::TexCubeArray {
                    available - available % 6
                } else {
                    available
                };
            } else if count > available {
                return fail(ViewDescError::SliceRangeOutOfBounds {
                    first,
                    end: first.saturating_add(count),
                    array_size,
                });
            }
        }
        D::Tex3D => {
            let depth = mip_extent(texture.depth(), view.most_detailed_mip);
            let end = if is_remaining(count) {
                u64::from(first) + 1
            } else {
                u64::from(first) + u64::from(count)
            };
            if first >= depth || end > u64::from(depth) {
                return fail(ViewDescError::DepthRangeOutOfBounds {
                    first,
                    end: u32::try_from(end).unwrap_or(u32::MAX),
                    depth,
                });
            }
            if is_remaining(count) {
                corrected.num_slices = depth - first;
            }
        }
        _ => {
            if first != 0 || !(is_remaining(count) || count <= 1) {
                return fail(ViewDescError::NonArraySlices { first, count });
            }
            corrected.num_slices = 1;
        }
    }

    if is_remaining(view.num_mip_levels) {
        corrected.num_mip_levels = if view.view_type == TextureViewType::ShaderResource {
            texture.mip_levels - view.most_detailed_mip
        } else {
            1
        };
    }

    if corrected.format == TextureFormat::Unknown {
        return fail(ViewDescError::UnknownFormat);
    }
    if corrected.format.is_typeless() {
        return fail(ViewDescError::TypelessFormat(corrected.format));
    }

    if view.view_type == TextureViewType::RenderTarget && corrected.format.is_snorm_color() {
        log::warn!(
            "Texture view \"{}\": rendering to {:?} may clamp negative values to zero on some drivers",
            view.name(),
            corrected.format
        );
    }

    Ok(corrected)
}
