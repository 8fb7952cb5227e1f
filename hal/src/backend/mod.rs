//! GPU backend abstraction layer.
//!
//! Two seams separate the crate from a native API:
//!
//! - [`GpuBackend`] constructs native texture and view objects from validated
//!   descriptors.
//! - [`CommandSink`] receives the [`StateCommand`]s the binding-state cache
//!   decides to issue.
//!
//! # Available Backends
//!
//! - `dummy` (default): hands out integer names and records commands
//! - `wgpu-backend`: creates textures and views through wgpu

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_impl;

pub mod dummy;

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::types::{
    BlendFactor, BlendOperation, ColorMask, ComparisonFunction, CullMode, FillMode,
    MemoryBarrierFlags, StencilFace, StencilOp, TextureBindTarget, TextureDescriptor,
    TextureFormat, TextureViewDescriptor, UavAccessFlags,
};

pub use dummy::{DummyBackend, DummyCommandSink};

/// Handle to a native texture object.
pub enum NativeTexture {
    /// Dummy backend texture name.
    Dummy { handle: u32 },
    /// wgpu backend texture.
    #[cfg(feature = "wgpu-backend")]
    Wgpu(Arc<wgpu::Texture>),
}

impl NativeTexture {
    /// Integer name used when binding the texture, 0 for backends without one.
    pub fn handle(&self) -> u32 {
        match self {
            Self::Dummy { handle } => *handle,
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(_) => 0,
        }
    }
}

impl std::fmt::Debug for NativeTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy { handle } => write!(f, "NativeTexture::Dummy({handle})"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(texture) => f.debug_tuple("NativeTexture::Wgpu").field(texture).finish(),
        }
    }
}

/// Handle to a native texture view object.
pub enum NativeView {
    /// Dummy backend view name.
    Dummy { handle: u32 },
    /// wgpu backend view.
    #[cfg(feature = "wgpu-backend")]
    Wgpu(Arc<wgpu::TextureView>),
}

impl NativeView {
    /// Integer name used when binding the view, 0 for backends without one.
    pub fn handle(&self) -> u32 {
        match self {
            Self::Dummy { handle } => *handle,
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(_) => 0,
        }
    }
}

impl std::fmt::Debug for NativeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy { handle } => write!(f, "NativeView::Dummy({handle})"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(view) => f.debug_tuple("NativeView::Wgpu").field(view).finish(),
        }
    }
}

/// Native object construction for a backend.
///
/// Descriptors passed in are already validated and corrected.
pub trait GpuBackend: Send + Sync + 'static {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Create a texture resource.
    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<NativeTexture, GraphicsError>;

    /// Create a view of `texture`.
    fn create_view(
        &self,
        texture: &NativeTexture,
        texture_desc: &TextureDescriptor,
        view_desc: &TextureViewDescriptor,
    ) -> Result<NativeView, GraphicsError>;
}

/// Selects and creates the default backend.
pub fn create_backend() -> Arc<dyn GpuBackend> {
    log::info!("Using dummy backend");
    Arc::new(DummyBackend::new())
}

// ============================================================================
// State commands
// ============================================================================

/// Pipeline capability toggled by [`StateCommand::SetEnabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    StencilTest,
    ScissorTest,
    DepthClamp,
    CullFace,
    PolygonOffsetFill,
    Blend,
    AlphaToCoverage,
}

/// A native bind or set call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateCommand {
    UseProgram(u32),
    BindPipeline(u32),
    BindVertexArray(u32),
    BindFramebuffer(u32),
    ActiveTexture(u32),
    BindTexture {
        unit: u32,
        target: TextureBindTarget,
        handle: u32,
    },
    BindSampler {
        unit: u32,
        handle: u32,
    },
    BindImage {
        unit: u32,
        handle: u32,
        mip_level: u32,
        layered: bool,
        layer: u32,
        access: UavAccessFlags,
        format: TextureFormat,
    },
    MemoryBarrier(MemoryBarrierFlags),
    SetEnabled {
        capability: Capability,
        enabled: bool,
    },
    DepthMask(bool),
    DepthFunc(ComparisonFunction),
    StencilMask(u32),
    StencilFunc {
        face: StencilFace,
        func: ComparisonFunction,
        reference: i32,
        mask: u32,
    },
    StencilOp {
        face: StencilFace,
        stencil_fail: StencilOp,
        depth_fail: StencilOp,
        pass: StencilOp,
    },
    PolygonMode(FillMode),
    CullFace(CullMode),
    FrontFace {
        counter_clockwise: bool,
    },
    PolygonOffset {
        slope_scaled: f32,
        bias: f32,
    },
    BlendColor([f32; 4]),
    /// `target: None` applies to every draw buffer.
    ColorMask {
        target: Option<u32>,
        mask: ColorMask,
    },
    BlendEnabled {
        target: u32,
        enabled: bool,
    },
    BlendFunc {
        target: Option<u32>,
        src: BlendFactor,
        dst: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    },
    BlendEquation {
        target: Option<u32>,
        color: BlendOperation,
        alpha: BlendOperation,
    },
    PatchVertices(u32),
}

/// Receiver of the native calls issued by a context.
pub trait CommandSink {
    /// Issue one native call.
    fn submit(&mut self, command: StateCommand);
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn submit(&mut self, command: StateCommand) {
        (**self).submit(command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn submit(&mut self, command: StateCommand) {
        (**self).submit(command);
    }
}
