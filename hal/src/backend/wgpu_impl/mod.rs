//! wgpu GPU backend implementation.
//!
//! Creates native textures and views on an existing `wgpu::Device`. State
//! commands are not routed through wgpu; its pipelines are immutable objects.

pub(crate) mod conversion;

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::types::{ResourceDimension, TextureDescriptor, TextureViewDescriptor, is_remaining};

use super::{GpuBackend, NativeTexture, NativeView};
use conversion::{
    convert_bind_flags, convert_texture_dimension, convert_texture_format, convert_view_dimension,
};

/// wgpu-based GPU backend.
pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
}

impl WgpuBackend {
    /// Create a backend on top of an existing device.
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self { device }
    }

    /// Get the underlying device.
    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }
}

impl std::fmt::Debug for WgpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuBackend").finish_non_exhaustive()
    }
}

impl GpuBackend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu Backend"
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<NativeTexture, GraphicsError> {
        let format = convert_texture_format(descriptor.format).ok_or_else(|| {
            GraphicsError::ResourceCreationFailed(format!(
                "format {:?} is not supported by wgpu",
                descriptor.format
            ))
        })?;
        let dimension = convert_texture_dimension(descriptor.dimension).ok_or_else(|| {
            GraphicsError::ResourceCreationFailed("texture dimension is undefined".to_string())
        })?;

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: descriptor.label.as_deref(),
            size: wgpu::Extent3d {
                width: descriptor.width,
                height: descriptor.height,
                depth_or_array_layers: descriptor.depth_or_array_size,
            },
            mip_level_count: descriptor.mip_levels,
            sample_count: descriptor.sample_count,
            dimension,
            format,
            usage: convert_bind_flags(descriptor.bind_flags),
            view_formats: &[],
        });

        log::trace!(
            "WgpuBackend: created texture {:?} ({}x{}x{})",
            descriptor.label,
            descriptor.width,
            descriptor.height,
            descriptor.depth_or_array_size
        );

        Ok(NativeTexture::Wgpu(Arc::new(texture)))
    }

    fn create_view(
        &self,
        texture: &NativeTexture,
        _texture_desc: &TextureDescriptor,
        view_desc: &TextureViewDescriptor,
    ) -> Result<NativeView, GraphicsError> {
        let NativeTexture::Wgpu(texture) = texture else {
            return Err(GraphicsError::ResourceCreationFailed(
                "texture was not created by the wgpu backend".to_string(),
            ));
        };

        // Depth slices of a 3D view are not array layers in wgpu.
        let (base_array_layer, array_layer_count) = if view_desc.dimension == ResourceDimension::Tex3D
        {
            (0, None)
        } else {
            (
                view_desc.first_slice,
                (!is_remaining(view_desc.num_slices)).then_some(view_desc.num_slices),
            )
        };

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: view_desc.label.as_deref(),
            format: convert_texture_format(view_desc.format),
            dimension: convert_view_dimension(view_desc.dimension),
            base_mip_level: view_desc.most_detailed_mip,
            mip_level_count: (!is_remaining(view_desc.num_mip_levels))
                .then_some(view_desc.num_mip_levels),
            base_array_layer,
            array_layer_count,
            ..Default::default()
        });

        Ok(NativeView::Wgpu(Arc::new(view)))
    }
}
