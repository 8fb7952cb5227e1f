//! Dummy GPU backend for testing and development.
//!
//! This backend doesn't perform actual GPU operations. It hands out integer
//! names for textures and views, and [`DummyCommandSink`] records every state
//! command so tests can assert on exactly what a context issued.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::GraphicsError;
use crate::native;
use crate::types::{TextureDescriptor, TextureViewDescriptor};

use super::{CommandSink, GpuBackend, NativeTexture, NativeView, StateCommand};

/// Dummy GPU backend.
#[derive(Debug)]
pub struct DummyBackend {
    next_handle: AtomicU32,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU32::new(1),
        }
    }

    fn allocate_handle(&self) -> u32 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for DummyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<NativeTexture, GraphicsError> {
        let handle = self.allocate_handle();
        log::trace!(
            "DummyBackend: creating texture {} {:?} ({}x{}x{}, {} mips, internal format 0x{:04X})",
            handle,
            descriptor.label,
            descriptor.width,
            descriptor.height,
            descriptor.depth_or_array_size,
            descriptor.mip_levels,
            crate::types::native_format(descriptor.format, descriptor.bind_flags)
        );
        Ok(NativeTexture::Dummy { handle })
    }

    fn create_view(
        &self,
        texture: &NativeTexture,
        _texture_desc: &TextureDescriptor,
        view_desc: &TextureViewDescriptor,
    ) -> Result<NativeView, GraphicsError> {
        let handle = self.allocate_handle();
        log::trace!(
            "DummyBackend: creating {} view {} {:?} of texture {} ({:?}, {:?}, mips {}+{}, slices {}+{})",
            view_desc.view_type.short_name(),
            handle,
            view_desc.label,
            texture.handle(),
            view_desc.dimension,
            view_desc.format,
            view_desc.most_detailed_mip,
            view_desc.num_mip_levels,
            view_desc.first_slice,
            view_desc.num_slices
        );
        Ok(NativeView::Dummy { handle })
    }
}

/// Command sink that records every submitted command.
#[derive(Debug, Default)]
pub struct DummyCommandSink {
    commands: Vec<StateCommand>,
}

impl DummyCommandSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands submitted since creation or the last [`clear`](Self::clear).
    pub fn commands(&self) -> &[StateCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Forget recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the sink empty.
    pub fn take(&mut self) -> Vec<StateCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl CommandSink for DummyCommandSink {
    fn submit(&mut self, command: StateCommand) {
        match command {
            StateCommand::MemoryBarrier(bits) => {
                log::trace!("DummyCommandSink: glMemoryBarrier(0x{:04X})", bits.bits())
            }
            StateCommand::BindImage {
                unit,
                handle,
                mip_level,
                layered,
                layer,
                access,
                format,
            } => log::trace!(
                "DummyCommandSink: glBindImageTexture({unit}, {handle}, {mip_level}, {layered}, {layer}, 0x{:04X}, 0x{:04X})",
                native::image_access(access),
                native::internal_format(format)
            ),
            StateCommand::DepthFunc(func) => log::trace!(
                "DummyCommandSink: glDepthFunc(0x{:04X})",
                native::comparison_func(func)
            ),
            StateCommand::StencilFunc {
                face,
                func,
                reference,
                mask,
            } => log::trace!(
                "DummyCommandSink: glStencilFuncSeparate(0x{:04X}, 0x{:04X}, {reference}, 0x{mask:X})",
                native::stencil_face(face),
                native::comparison_func(func)
            ),
            StateCommand::StencilOp {
                face,
                stencil_fail,
                depth_fail,
                pass,
            } => log::trace!(
                "DummyCommandSink: glStencilOpSeparate(0x{:04X}, 0x{:04X}, 0x{:04X}, 0x{:04X})",
                native::stencil_face(face),
                native::stencil_op(stencil_fail),
                native::stencil_op(depth_fail),
                native::stencil_op(pass)
            ),
            StateCommand::PolygonMode(mode) => log::trace!(
                "DummyCommandSink: glPolygonMode(GL_FRONT_AND_BACK, 0x{:04X})",
                native::polygon_mode(mode)
            ),
            StateCommand::CullFace(mode) => log::trace!(
                "DummyCommandSink: glCullFace(0x{:04X})",
                native::cull_face(mode).unwrap_or(0)
            ),
            other => log::trace!("DummyCommandSink: {other:?}"),
        }
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BindFlags, TextureFormat, TextureViewType};

    #[test]
    fn test_handles_are_unique() {
        let backend = DummyBackend::new();
        let desc = TextureDescriptor::new_2d(4, 4, TextureFormat::Rgba8Unorm, BindFlags::empty());
        let a = backend.create_texture(&desc).unwrap();
        let b = backend.create_texture(&desc).unwrap();
        assert_ne!(a.handle(), b.handle());

        let view = backend
            .create_view(&a, &desc, &TextureViewDescriptor::new(TextureViewType::ShaderResource))
            .unwrap();
        assert_ne!(view.handle(), a.handle());
        assert_ne!(view.handle(), b.handle());
    }

    #[test]
    fn test_sink_records_commands() {
        let mut sink = DummyCommandSink::new();
        assert!(sink.is_empty());

        sink.submit(StateCommand::UseProgram(3));
        sink.submit(StateCommand::ActiveTexture(1));
        assert_eq!(
            sink.commands(),
            &[StateCommand::UseProgram(3), StateCommand::ActiveTexture(1)]
        );

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_dummy_backend_name() {
        assert_eq!(DummyBackend::new().name(), "Dummy Backend");
    }
}
