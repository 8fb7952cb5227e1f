//! Default views implied by a texture's bind flags.

use crate::error::GraphicsError;
use crate::types::{
    ComponentType, TextureDescriptor, TextureViewDescriptor, TextureViewType, UavAccessFlags,
};
use crate::validation::correct_texture_view_desc;

/// Corrected descriptors of the default views of a validated texture.
///
/// One view per bind flag among SRV, RTV, DSV and UAV, in that order. A
/// texture whose format has no component type (typeless storage) gets none,
/// since no view format can be derived from it.
pub fn default_view_descriptors(
    texture: &TextureDescriptor,
) -> Result<Vec<TextureViewDescriptor>, GraphicsError> {
    if texture.format.info().component_type == ComponentType::Undefined {
        return Ok(Vec::new());
    }

    let mut views = Vec::with_capacity(4);
    for view_type in TextureViewType::ALL {
        if !texture.bind_flags.contains(view_type.required_bind_flag()) {
            continue;
        }

        let mut view = TextureViewDescriptor::new(view_type).with_label(format!(
            "Default {} of texture '{}'",
            view_type.short_name(),
            texture.name()
        ));
        match view_type {
            TextureViewType::RenderTarget | TextureViewType::DepthStencil => {
                view = view.with_mips(0, 1);
            }
            TextureViewType::UnorderedAccess => {
                view = view.with_access(UavAccessFlags::READ_WRITE);
            }
            _ => {}
        }

        views.push(correct_texture_view_desc(texture, &view)?);
    }
    Ok(views)
}
