//! Set-if-different cache of the state bound to one rendering context.

use crate::backend::{Capability, CommandSink, StateCommand};
use crate::error::GraphicsError;
use crate::resources::{Texture, TextureView};
use crate::types::{
    BlendStateDesc, ColorMask, ComparisonFunction, CullMode, FillMode, MAX_RENDER_TARGETS,
    MemoryBarrierFlags, StencilFace, StencilOp, TextureBindTarget, TextureFormat,
    UavAccessFlags,
};

use super::{ContextCaps, EnableState, MemoryBarrierTracker};

/// What is bound to one image unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundImageInfo {
    pub view_id: u64,
    pub mip_level: u32,
    pub layered: bool,
    pub layer: u32,
    pub access: UavAccessFlags,
    pub format: TextureFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct StencilFaceState {
    func: ComparisonFunction,
    reference: Option<i32>,
    read_mask: Option<u32>,
    stencil_fail: StencilOp,
    depth_fail: StencilOp,
    pass: StencilOp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DepthStencilState {
    depth_test: EnableState,
    depth_writes: EnableState,
    depth_func: ComparisonFunction,
    stencil_test: EnableState,
    stencil_write_mask: Option<u8>,
    faces: [StencilFaceState; 2],
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RasterizerState {
    fill_mode: FillMode,
    cull_mode: CullMode,
    front_counter_clockwise: EnableState,
    /// (constant, slope-scaled)
    depth_bias: Option<(f32, f32)>,
    depth_clamp: EnableState,
    scissor_test: EnableState,
}

/// Cache of everything bound to one rendering context.
///
/// Every setter compares the requested value with the cached one and submits
/// a [`StateCommand`] to the sink only when they differ. Cached values start
/// out unknown, so the first call after construction or [`invalidate`]
/// always reaches the sink.
///
/// The cache is driven by one thread; all mutation goes through `&mut self`.
///
/// [`invalidate`]: Self::invalidate
pub struct BindingStateCache<S: CommandSink> {
    sink: S,
    caps: ContextCaps,
    barriers: MemoryBarrierTracker,

    program: Option<u32>,
    pipeline: Option<u32>,
    vertex_array: Option<u32>,
    framebuffer: Option<u32>,

    active_texture: Option<u32>,
    bound_textures: Vec<Option<(TextureBindTarget, u32)>>,
    bound_samplers: Vec<Option<u32>>,
    bound_images: Vec<Option<BoundImageInfo>>,

    depth_stencil: DepthStencilState,
    rasterizer: RasterizerState,

    color_write_masks: [Option<ColorMask>; MAX_RENDER_TARGETS],
    independent_write_masks: EnableState,

    patch_vertices: Option<u32>,
}

impl<S: CommandSink> BindingStateCache<S> {
    /// Create a cache issuing its commands to `sink`.
    ///
    /// The cache starts out invalidated, which unbinds the program, pipeline,
    /// vertex array and framebuffer.
    pub fn new(sink: S, caps: ContextCaps) -> Self {
        let mut cache = Self {
            sink,
            caps,
            barriers: MemoryBarrierTracker::new(),
            program: None,
            pipeline: None,
            vertex_array: None,
            framebuffer: None,
            active_texture: None,
            bound_textures: Vec::new(),
            bound_samplers: Vec::new(),
            bound_images: Vec::new(),
            depth_stencil: DepthStencilState::default(),
            rasterizer: RasterizerState::default(),
            color_write_masks: [None; MAX_RENDER_TARGETS],
            independent_write_masks: EnableState::Unknown,
            patch_vertices: None,
        };
        cache.invalidate();
        cache
    }

    /// Forget all cached state.
    ///
    /// Pending barriers are flushed with one barrier covering every bit, or
    /// dropped when the context cannot flush them here. The program,
    /// pipeline, vertex array and framebuffer are unbound, and every cached
    /// value and toggle becomes unknown.
    pub fn invalidate(&mut self) {
        if !self.barriers.pending().is_empty()
            && self.caps.flush_barriers_on_invalidate
            && self.caps.memory_barriers
        {
            self.sink
                .submit(StateCommand::MemoryBarrier(MemoryBarrierFlags::all()));
        }
        self.barriers.clear();

        self.sink.submit(StateCommand::UseProgram(0));
        self.sink.submit(StateCommand::BindPipeline(0));
        self.sink.submit(StateCommand::BindVertexArray(0));
        self.sink.submit(StateCommand::BindFramebuffer(0));

        self.program = None;
        self.pipeline = None;
        self.vertex_array = None;
        self.framebuffer = None;

        self.active_texture = None;
        self.bound_textures.clear();
        self.bound_textures
            .resize(self.caps.max_combined_texture_units as usize, None);
        self.bound_samplers.clear();
        self.bound_images.clear();

        self.depth_stencil = DepthStencilState::default();
        self.rasterizer = RasterizerState::default();

        self.color_write_masks = [None; MAX_RENDER_TARGETS];
        self.independent_write_masks = EnableState::Unknown;

        self.patch_vertices = None;

        log::trace!("BindingStateCache: invalidated");
    }

    // ========================================================================
    // Objects
    // ========================================================================

    pub fn set_program(&mut self, program: u32) {
        if self.program != Some(program) {
            self.program = Some(program);
            self.sink.submit(StateCommand::UseProgram(program));
        }
    }

    pub fn set_pipeline(&mut self, pipeline: u32) {
        if self.pipeline != Some(pipeline) {
            self.pipeline = Some(pipeline);
            self.sink.submit(StateCommand::BindPipeline(pipeline));
        }
    }

    pub fn bind_vertex_array(&mut self, vertex_array: u32) {
        if self.vertex_array != Some(vertex_array) {
            self.vertex_array = Some(vertex_array);
            self.sink.submit(StateCommand::BindVertexArray(vertex_array));
        }
    }

    pub fn bind_framebuffer(&mut self, framebuffer: u32) {
        if self.framebuffer != Some(framebuffer) {
            self.framebuffer = Some(framebuffer);
            self.sink.submit(StateCommand::BindFramebuffer(framebuffer));
        }
    }

    // ========================================================================
    // Texture units
    // ========================================================================

    /// Resolve a texture unit index. Negative indices count from the end.
    fn resolve_texture_unit(&self, index: i32) -> Result<u32, GraphicsError> {
        let max_units = i64::from(self.caps.max_combined_texture_units);
        let mut resolved = i64::from(index);
        if resolved < 0 {
            resolved += max_units;
        }
        if !(0..max_units).contains(&resolved) {
            log::error!(
                "Texture unit {} is out of range [0, {})",
                index,
                max_units
            );
            return Err(GraphicsError::InvalidParameter(format!(
                "texture unit {index} is out of range [0, {max_units})"
            )));
        }
        // In range of a u32 count.
        Ok(resolved as u32)
    }

    /// Make `index` the active texture unit.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if the resolved index is
    /// outside `[0, max_combined_texture_units)`.
    pub fn set_active_texture(&mut self, index: i32) -> Result<(), GraphicsError> {
        let unit = self.resolve_texture_unit(index)?;
        if self.active_texture != Some(unit) {
            self.active_texture = Some(unit);
            self.sink.submit(StateCommand::ActiveTexture(unit));
        }
        Ok(())
    }

    /// Bind texture `handle` to unit `index`, making the unit active first.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] for an out-of-range unit.
    pub fn bind_texture(
        &mut self,
        index: i32,
        target: TextureBindTarget,
        handle: u32,
    ) -> Result<(), GraphicsError> {
        let unit = self.resolve_texture_unit(index)?;
        self.set_active_texture(index)?;

        let slot = &mut self.bound_textures[unit as usize];
        if *slot != Some((target, handle)) {
            *slot = Some((target, handle));
            self.sink.submit(StateCommand::BindTexture {
                unit,
                target,
                handle,
            });
        }
        Ok(())
    }

    /// Bind sampler `handle` to unit `index`.
    pub fn bind_sampler(&mut self, index: u32, handle: u32) {
        let slot = index as usize;
        if slot >= self.bound_samplers.len() {
            self.bound_samplers.resize(slot + 1, None);
        }
        if self.bound_samplers[slot] != Some(handle) {
            self.bound_samplers[slot] = Some(handle);
            self.sink.submit(StateCommand::BindSampler {
                unit: index,
                handle,
            });
        }
    }

    /// Bind `view` to image unit `index`.
    ///
    /// Rebinding the same view with the same parameters is a no-op. Does
    /// nothing if the context has no image load/store support.
    #[allow(clippy::too_many_arguments)]
    pub fn bind_image(
        &mut self,
        index: u32,
        view: &TextureView,
        mip_level: u32,
        layered: bool,
        layer: u32,
        access: UavAccessFlags,
        format: TextureFormat,
    ) {
        if !self.caps.image_load_store {
            log::warn!("Image load/store is not supported by this context");
            return;
        }

        let info = BoundImageInfo {
            view_id: view.unique_id(),
            mip_level,
            layered,
            layer,
            access,
            format,
        };
        let slot = index as usize;
        if slot >= self.bound_images.len() {
            self.bound_images.resize(slot + 1, None);
        }
        if self.bound_images[slot] != Some(info) {
            self.bound_images[slot] = Some(info);
            self.sink.submit(StateCommand::BindImage {
                unit: index,
                handle: view.handle(),
                mip_level,
                layered,
                layer,
                access,
                format,
            });
        }
    }

    // ========================================================================
    // Memory barriers
    // ========================================================================

    /// Issue the barriers in `required` that are still owed.
    ///
    /// See [`MemoryBarrierTracker::ensure`]. Does nothing if the context has
    /// no memory barrier support.
    pub fn ensure_memory_barrier(
        &mut self,
        required: MemoryBarrierFlags,
        resource: Option<&Texture>,
    ) -> MemoryBarrierFlags {
        if !self.caps.memory_barriers {
            log::warn!("Memory barriers are not supported by this context");
            return MemoryBarrierFlags::empty();
        }
        self.barriers.ensure(required, resource, &mut self.sink)
    }

    /// Record barriers owed after an incoherent write.
    pub fn set_pending_memory_barriers(&mut self, barriers: MemoryBarrierFlags) {
        self.barriers.set_pending(barriers);
    }

    pub fn pending_memory_barriers(&self) -> MemoryBarrierFlags {
        self.barriers.pending()
    }

    // ========================================================================
    // Depth-stencil
    // ========================================================================

    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        self.sink
            .submit(StateCommand::SetEnabled { capability, enabled });
    }

    pub fn enable_depth_test(&mut self, enable: bool) {
        if self.depth_stencil.depth_test != enable {
            self.depth_stencil.depth_test = enable.into();
            self.set_enabled(Capability::DepthTest, enable);
        }
    }

    pub fn enable_depth_writes(&mut self, enable: bool) {
        if self.depth_stencil.depth_writes != enable {
            self.depth_stencil.depth_writes = enable.into();
            self.sink.submit(StateCommand::DepthMask(enable));
        }
    }

    pub fn set_depth_func(&mut self, func: ComparisonFunction) {
        if func == ComparisonFunction::Unknown {
            log::warn!("Ignoring unknown depth comparison function");
            return;
        }
        if self.depth_stencil.depth_func != func {
            self.depth_stencil.depth_func = func;
            self.sink.submit(StateCommand::DepthFunc(func));
        }
    }

    pub fn enable_stencil_test(&mut self, enable: bool) {
        if self.depth_stencil.stencil_test != enable {
            self.depth_stencil.stencil_test = enable.into();
            self.set_enabled(Capability::StencilTest, enable);
        }
    }

    pub fn set_stencil_write_mask(&mut self, mask: u8) {
        if self.depth_stencil.stencil_write_mask != Some(mask) {
            self.depth_stencil.stencil_write_mask = Some(mask);
            self.sink.submit(StateCommand::StencilMask(u32::from(mask)));
        }
    }

    fn submit_stencil_func(&mut self, face: StencilFace) {
        let state = self.depth_stencil.faces[face.index()];
        self.sink.submit(StateCommand::StencilFunc {
            face,
            func: state.func,
            reference: state.reference.unwrap_or(0),
            mask: state.read_mask.unwrap_or(u32::MAX),
        });
    }

    /// Set the stencil reference value of `face`, keeping its function and read mask.
    pub fn set_stencil_ref(&mut self, face: StencilFace, reference: i32) {
        let state = &mut self.depth_stencil.faces[face.index()];
        if state.reference != Some(reference) {
            state.reference = Some(reference);
            self.submit_stencil_func(face);
        }
    }

    pub fn set_stencil_func(
        &mut self,
        face: StencilFace,
        func: ComparisonFunction,
        reference: i32,
        read_mask: u32,
    ) {
        let state = &mut self.depth_stencil.faces[face.index()];
        if state.func != func
            || state.reference != Some(reference)
            || state.read_mask != Some(read_mask)
        {
            state.func = func;
            state.reference = Some(reference);
            state.read_mask = Some(read_mask);
            self.submit_stencil_func(face);
        }
    }

    pub fn set_stencil_op(
        &mut self,
        face: StencilFace,
        stencil_fail: StencilOp,
        depth_fail: StencilOp,
        pass: StencilOp,
    ) {
        let state = &mut self.depth_stencil.faces[face.index()];
        if state.stencil_fail != stencil_fail || state.depth_fail != depth_fail || state.pass != pass
        {
            state.stencil_fail = stencil_fail;
            state.depth_fail = depth_fail;
            state.pass = pass;
            self.sink.submit(StateCommand::StencilOp {
                face,
                stencil_fail,
                depth_fail,
                pass,
            });
        }
    }

    // ========================================================================
    // Rasterizer
    // ========================================================================

    /// Set the polygon fill mode.
    ///
    /// Without fill mode selection the call is ignored, with a warning when
    /// wireframe was requested.
    pub fn set_fill_mode(&mut self, mode: FillMode) {
        if !self.caps.fill_mode_selection {
            if mode == FillMode::Wireframe {
                log::warn!("Wireframe fill mode is not supported by this context");
            }
            return;
        }
        if mode == FillMode::Undefined {
            log::warn!("Ignoring undefined fill mode");
            return;
        }
        if self.rasterizer.fill_mode != mode {
            self.rasterizer.fill_mode = mode;
            self.sink.submit(StateCommand::PolygonMode(mode));
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        if mode == CullMode::Undefined {
            log::warn!("Ignoring undefined cull mode");
            return;
        }
        if self.rasterizer.cull_mode != mode {
            self.rasterizer.cull_mode = mode;
            if mode == CullMode::None {
                self.set_enabled(Capability::CullFace, false);
            } else {
                self.set_enabled(Capability::CullFace, true);
                self.sink.submit(StateCommand::CullFace(mode));
            }
        }
    }

    pub fn set_front_face(&mut self, counter_clockwise: bool) {
        if self.rasterizer.front_counter_clockwise != counter_clockwise {
            self.rasterizer.front_counter_clockwise = counter_clockwise.into();
            self.sink
                .submit(StateCommand::FrontFace { counter_clockwise });
        }
    }

    /// Set the depth bias. Polygon offset is enabled while either value is non-zero.
    pub fn set_depth_bias(&mut self, bias: f32, slope_scaled: f32) {
        if self.rasterizer.depth_bias != Some((bias, slope_scaled)) {
            self.rasterizer.depth_bias = Some((bias, slope_scaled));
            self.set_enabled(
                Capability::PolygonOffsetFill,
                bias != 0.0 || slope_scaled != 0.0,
            );
            self.sink
                .submit(StateCommand::PolygonOffset { slope_scaled, bias });
        }
    }

    pub fn set_depth_clamp(&mut self, enable: bool) {
        if self.rasterizer.depth_clamp != enable {
            self.rasterizer.depth_clamp = enable.into();
            self.set_enabled(Capability::DepthClamp, enable);
        }
    }

    pub fn enable_scissor_test(&mut self, enable: bool) {
        if self.rasterizer.scissor_test != enable {
            self.rasterizer.scissor_test = enable.into();
            self.set_enabled(Capability::ScissorTest, enable);
        }
    }

    // ========================================================================
    // Blend
    // ========================================================================

    /// Set the constant blend color. Always issued.
    pub fn set_blend_factors(&mut self, factors: [f32; 4]) {
        self.sink.submit(StateCommand::BlendColor(factors));
    }

    /// Apply a complete blend state. Always issued; write masks go through
    /// the write mask cache.
    ///
    /// Render targets beyond `max_draw_buffers` are skipped, with an error
    /// logged if they asked for blending.
    pub fn set_blend_state(&mut self, desc: &BlendStateDesc) {
        let max_draw_buffers = (self.caps.max_draw_buffers as usize).min(MAX_RENDER_TARGETS);

        let blend_enabled = if desc.independent_blend {
            let mut any = false;
            for (i, rt) in desc.render_targets.iter().enumerate() {
                if i >= max_draw_buffers {
                    if rt.blend_enable {
                        log::error!(
                            "Blend is enabled for render target {} but this context only supports {} draw buffers",
                            i,
                            max_draw_buffers
                        );
                    }
                    continue;
                }
                any |= rt.blend_enable;
            }
            any
        } else {
            desc.render_targets[0].blend_enable
        };

        if blend_enabled {
            self.set_enabled(Capability::Blend, true);
            self.set_enabled(Capability::AlphaToCoverage, desc.alpha_to_coverage);

            if desc.independent_blend {
                for (i, rt) in desc.render_targets.iter().enumerate().take(max_draw_buffers) {
                    let target = i as u32;
                    self.sink.submit(StateCommand::BlendEnabled {
                        target,
                        enabled: rt.blend_enable,
                    });
                    self.sink.submit(StateCommand::BlendFunc {
                        target: Some(target),
                        src: rt.src_blend,
                        dst: rt.dest_blend,
                        src_alpha: rt.src_blend_alpha,
                        dst_alpha: rt.dest_blend_alpha,
                    });
                    self.sink.submit(StateCommand::BlendEquation {
                        target: Some(target),
                        color: rt.blend_op,
                        alpha: rt.blend_op_alpha,
                    });
                }
            } else {
                let rt = &desc.render_targets[0];
                self.sink.submit(StateCommand::BlendFunc {
                    target: None,
                    src: rt.src_blend,
                    dst: rt.dest_blend,
                    src_alpha: rt.src_blend_alpha,
                    dst_alpha: rt.dest_blend_alpha,
                });
                self.sink.submit(StateCommand::BlendEquation {
                    target: None,
                    color: rt.blend_op,
                    alpha: rt.blend_op_alpha,
                });
            }
        } else {
            self.set_enabled(Capability::Blend, false);
        }

        if desc.independent_blend {
            for (i, rt) in desc.render_targets.iter().enumerate().take(max_draw_buffers) {
                self.apply_color_write_mask(i, rt.write_mask, true);
            }
        } else {
            self.apply_color_write_mask(0, desc.render_targets[0].write_mask, false);
        }
    }

    /// Cached write mask of render target `rt_index` and whether masks are
    /// currently set per target.
    pub fn color_write_mask(&self, rt_index: u32) -> (Option<ColorMask>, EnableState) {
        let mask = self
            .color_write_masks
            .get(rt_index as usize)
            .copied()
            .flatten();
        (mask, self.independent_write_masks)
    }

    /// Set the color write mask.
    ///
    /// With `independent` the mask applies to render target `rt_index` only,
    /// otherwise to every render target. Switching between the two modes
    /// always re-applies the mask.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if `rt_index` is not below
    /// [`MAX_RENDER_TARGETS`].
    pub fn set_color_write_mask(
        &mut self,
        rt_index: u32,
        mask: ColorMask,
        independent: bool,
    ) -> Result<(), GraphicsError> {
        let slot = rt_index as usize;
        if slot >= MAX_RENDER_TARGETS {
            return Err(GraphicsError::InvalidParameter(format!(
                "render target index {rt_index} is out of range [0, {MAX_RENDER_TARGETS})"
            )));
        }
        self.apply_color_write_mask(slot, mask, independent);
        Ok(())
    }

    fn apply_color_write_mask(&mut self, slot: usize, mask: ColorMask, independent: bool) {
        if self.independent_write_masks != independent
            || self.color_write_masks[slot] != Some(mask)
        {
            if independent {
                self.color_write_masks[slot] = Some(mask);
                self.sink.submit(StateCommand::ColorMask {
                    target: Some(slot as u32),
                    mask,
                });
            } else {
                self.color_write_masks = [Some(mask); MAX_RENDER_TARGETS];
                self.sink
                    .submit(StateCommand::ColorMask { target: None, mask });
            }
            self.independent_write_masks = independent.into();
        }
    }

    // ========================================================================
    // Tessellation
    // ========================================================================

    /// Set the number of vertices per patch. Does nothing without tessellation support.
    pub fn set_num_patch_vertices(&mut self, count: u32) {
        if !self.caps.tessellation {
            log::warn!("Tessellation is not supported by this context");
            return;
        }
        if self.patch_vertices != Some(count) {
            self.patch_vertices = Some(count);
            self.sink.submit(StateCommand::PatchVertices(count));
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn caps(&self) -> &ContextCaps {
        &self.caps
    }

    pub fn active_texture(&self) -> Option<u32> {
        self.active_texture
    }

    /// Texture bound to `unit`, if known.
    pub fn bound_texture(&self, unit: u32) -> Option<(TextureBindTarget, u32)> {
        self.bound_textures.get(unit as usize).copied().flatten()
    }

    /// Image bound to `unit`, if known.
    pub fn bound_image(&self, unit: u32) -> Option<BoundImageInfo> {
        self.bound_images.get(unit as usize).copied().flatten()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the cache and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: CommandSink + std::fmt::Debug> std::fmt::Debug for BindingStateCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingStateCache")
            .field("sink", &self.sink)
            .field("caps", &self.caps)
            .field("pending_barriers", &self.barriers.pending())
            .field("program", &self.program)
            .field("active_texture", &self.active_texture)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyCommandSink;

    fn create_cache(caps: ContextCaps) -> BindingStateCache<DummyCommandSink> {
        let mut cache = BindingStateCache::new(DummyCommandSink::new(), caps);
        cache.sink_mut().clear();
        cache
    }

    #[test]
    fn test_new_cache_unbinds_objects() {
        let cache = BindingStateCache::new(DummyCommandSink::new(), ContextCaps::default());
        assert_eq!(
            cache.sink().commands(),
            &[
                StateCommand::UseProgram(0),
                StateCommand::BindPipeline(0),
                StateCommand::BindVertexArray(0),
                StateCommand::BindFramebuffer(0),
            ]
        );
    }

    #[test]
    fn test_program_set_if_different() {
        let mut cache = create_cache(ContextCaps::default());
        cache.set_program(5);
        cache.set_program(5);
        cache.set_program(6);
        assert_eq!(
            cache.sink().commands(),
            &[StateCommand::UseProgram(5), StateCommand::UseProgram(6)]
        );
    }

    #[test]
    fn test_zero_program_applied_after_invalidate() {
        let mut cache = create_cache(ContextCaps::default());
        cache.set_program(0);
        assert_eq!(cache.sink().commands(), &[StateCommand::UseProgram(0)]);
    }

    #[test]
    fn test_out_of_range_texture_unit() {
        let mut cache = create_cache(ContextCaps::default().with_max_combined_texture_units(8));
        assert!(cache.set_active_texture(8).is_err());
        assert!(cache.set_active_texture(-9).is_err());
        assert!(cache.sink().is_empty());
        assert!(cache.set_active_texture(-8).is_ok());
        assert_eq!(cache.active_texture(), Some(0));
    }

    #[test]
    fn test_stencil_ref_keeps_func() {
        let mut cache = create_cache(ContextCaps::default());
        cache.set_stencil_func(StencilFace::Front, ComparisonFunction::Equal, 1, 0xFF);
        cache.set_stencil_ref(StencilFace::Front, 1);
        cache.set_stencil_ref(StencilFace::Front, 2);
        assert_eq!(
            cache.sink().commands(),
            &[
                StateCommand::StencilFunc {
                    face: StencilFace::Front,
                    func: ComparisonFunction::Equal,
                    reference: 1,
                    mask: 0xFF,
                },
                StateCommand::StencilFunc {
                    face: StencilFace::Front,
                    func: ComparisonFunction::Equal,
                    reference: 2,
                    mask: 0xFF,
                },
            ]
        );
    }

    #[test]
    fn test_stencil_faces_are_independent() {
        let mut cache = create_cache(ContextCaps::default());
        let ops = (StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
        cache.set_stencil_op(StencilFace::Front, ops.0, ops.1, ops.2);
        cache.set_stencil_op(StencilFace::Back, ops.0, ops.1, ops.2);
        cache.set_stencil_op(StencilFace::Back, ops.0, ops.1, ops.2);
        assert_eq!(cache.sink().len(), 2);
    }

    #[test]
    fn test_cull_none_disables_culling() {
        let mut cache = create_cache(ContextCaps::default());
        cache.set_cull_mode(CullMode::None);
        cache.set_cull_mode(CullMode::Back);
        assert_eq!(
            cache.sink().commands(),
            &[
                StateCommand::SetEnabled {
                    capability: Capability::CullFace,
                    enabled: false,
                },
                StateCommand::SetEnabled {
                    capability: Capability::CullFace,
                    enabled: true,
                },
                StateCommand::CullFace(CullMode::Back),
            ]
        );
    }

    #[test]
    fn test_wireframe_without_support_is_ignored() {
        let mut cache = create_cache(ContextCaps::default().with_fill_mode_selection(false));
        cache.set_fill_mode(FillMode::Wireframe);
        assert!(cache.sink().is_empty());
    }

    #[test]
    fn test_depth_bias_toggles_polygon_offset() {
        let mut cache = create_cache(ContextCaps::default());
        cache.set_depth_bias(0.0, 0.0);
        cache.set_depth_bias(0.0, 0.0);
        cache.set_depth_bias(1.0, 2.0);
        assert_eq!(
            cache.sink().commands(),
            &[
                StateCommand::SetEnabled {
                    capability: Capability::PolygonOffsetFill,
                    enabled: false,
                },
                StateCommand::PolygonOffset {
                    slope_scaled: 0.0,
                    bias: 0.0,
                },
                StateCommand::SetEnabled {
                    capability: Capability::PolygonOffsetFill,
                    enabled: true,
                },
                StateCommand::PolygonOffset {
                    slope_scaled: 2.0,
                    bias: 1.0,
                },
            ]
        );
    }

    #[test]
    fn test_patch_vertices_requires_tessellation() {
        let mut cache = create_cache(ContextCaps::default().with_tessellation(false));
        cache.set_num_patch_vertices(3);
        assert!(cache.sink().is_empty());

        let mut cache = create_cache(ContextCaps::default());
        cache.set_num_patch_vertices(3);
        cache.set_num_patch_vertices(3);
        assert_eq!(cache.sink().commands(), &[StateCommand::PatchVertices(3)]);
    }

    #[test]
    fn test_invalidate_drops_barriers_when_flush_disabled() {
        let mut cache = create_cache(ContextCaps::default().with_flush_barriers_on_invalidate(false));
        cache.set_pending_memory_barriers(MemoryBarrierFlags::TEXTURE_FETCH);
        cache.invalidate();
        assert!(cache.pending_memory_barriers().is_empty());
        assert!(!cache
            .sink()
            .commands()
            .iter()
            .any(|c| matches!(c, StateCommand::MemoryBarrier(_))));
    }

    #[test]
    fn test_invalidate_flushes_all_barriers() {
        let mut cache = create_cache(ContextCaps::default());
        cache.set_pending_memory_barriers(MemoryBarrierFlags::TEXTURE_FETCH);
        cache.invalidate();
        assert!(cache.pending_memory_barriers().is_empty());
        assert_eq!(
            cache.sink().commands()[0],
            StateCommand::MemoryBarrier(MemoryBarrierFlags::all())
        );
    }
}
