//! Binding-state cache tests.
//!
//! Every test records the commands a context issues through
//! [`DummyCommandSink`] and asserts on exactly what reached the sink.

mod common;

use rstest::rstest;

use common::{count_commands, create_context, create_device, create_storage_texture};
use redlilium_hal::backend::Capability;
use redlilium_hal::types::{
    BlendFactor, BlendStateDesc, ColorMask, ComparisonFunction, CullMode, FillMode,
    RenderTargetBlendDesc, StencilFace, TextureBindTarget, UavAccessFlags,
};
use redlilium_hal::{
    BindingStateCache, ContextCaps, DummyCommandSink, EnableState, GraphicsError,
    MemoryBarrierFlags, StateCommand, TextureFormat, TextureViewType,
};

// ============================================================================
// Texture units
// ============================================================================

#[test]
fn test_negative_unit_counts_from_the_end() {
    let mut context = create_context(ContextCaps::default().with_max_combined_texture_units(16));
    context.set_active_texture(-1).unwrap();
    assert_eq!(context.active_texture(), Some(15));
    assert_eq!(context.sink().commands(), &[StateCommand::ActiveTexture(15)]);
}

#[rstest]
#[case::past_end(16)]
#[case::far_negative(-17)]
#[case::min(i32::MIN)]
fn test_out_of_range_unit_is_rejected(#[case] index: i32) {
    let mut context = create_context(ContextCaps::default().with_max_combined_texture_units(16));
    let result = context.bind_texture(index, TextureBindTarget::Texture2D, 1);
    assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    assert!(context.sink().is_empty());
}

#[test]
fn test_same_texture_bound_once() {
    let mut context = create_context(ContextCaps::default());
    context.bind_texture(3, TextureBindTarget::Texture2D, 42).unwrap();
    context.bind_texture(3, TextureBindTarget::Texture2D, 42).unwrap();

    assert_eq!(
        context.sink().commands(),
        &[
            StateCommand::ActiveTexture(3),
            StateCommand::BindTexture {
                unit: 3,
                target: TextureBindTarget::Texture2D,
                handle: 42,
            },
        ]
    );
    assert_eq!(
        context.bound_texture(3),
        Some((TextureBindTarget::Texture2D, 42))
    );
}

#[test]
fn test_texture_on_other_unit_switches_active_unit() {
    let mut context = create_context(ContextCaps::default());
    context.bind_texture(0, TextureBindTarget::Texture2D, 1).unwrap();
    context.bind_texture(1, TextureBindTarget::Texture2D, 1).unwrap();
    context.bind_texture(0, TextureBindTarget::Texture2D, 1).unwrap();

    let commands = context.sink().commands();
    assert_eq!(
        count_commands(commands, |c| matches!(c, StateCommand::BindTexture { .. })),
        2
    );
    assert_eq!(commands.last(), Some(&StateCommand::ActiveTexture(0)));
}

#[test]
fn test_samplers_bound_once_per_unit() {
    let mut context = create_context(ContextCaps::default());
    context.bind_sampler(40, 7);
    context.bind_sampler(40, 7);
    context.bind_sampler(2, 7);
    assert_eq!(
        context.sink().commands(),
        &[
            StateCommand::BindSampler { unit: 40, handle: 7 },
            StateCommand::BindSampler { unit: 2, handle: 7 },
        ]
    );
}

// ============================================================================
// Image units
// ============================================================================

#[test]
fn test_identical_image_rebind_is_skipped() {
    let device = create_device();
    let texture = create_storage_texture(&device, "storage");
    let uav = texture
        .default_view(TextureViewType::UnorderedAccess)
        .unwrap();
    let mut context = device.create_context(DummyCommandSink::new());
    context.sink_mut().clear();

    let format = TextureFormat::Rgba8Unorm;
    context.bind_image(0, uav, 0, false, 0, UavAccessFlags::WRITE, format);
    context.bind_image(0, uav, 0, false, 0, UavAccessFlags::WRITE, format);
    assert_eq!(context.sink().len(), 1);

    // Different access re-binds.
    context.bind_image(0, uav, 0, false, 0, UavAccessFlags::READ_WRITE, format);
    assert_eq!(context.sink().len(), 2);
    assert_eq!(context.bound_image(0).unwrap().view_id, uav.unique_id());
}

#[test]
fn test_images_need_load_store_support() {
    let device = create_device();
    let texture = create_storage_texture(&device, "storage");
    let uav = texture
        .default_view(TextureViewType::UnorderedAccess)
        .unwrap();
    let mut context = create_context(ContextCaps::default().with_image_load_store(false));

    context.bind_image(
        0,
        uav,
        0,
        false,
        0,
        UavAccessFlags::WRITE,
        TextureFormat::Rgba8Unorm,
    );
    assert!(context.sink().is_empty());
    assert!(context.bound_image(0).is_none());
}

// ============================================================================
// Invalidation
// ============================================================================

fn apply_defaults(context: &mut BindingStateCache<DummyCommandSink>) {
    context.set_program(0);
    context.set_pipeline(0);
    context.bind_vertex_array(0);
    context.bind_framebuffer(0);
    context.set_active_texture(0).unwrap();
    context.bind_texture(0, TextureBindTarget::Texture2D, 0).unwrap();
    context.bind_sampler(0, 0);
    context.enable_depth_test(false);
    context.enable_depth_writes(false);
    context.set_depth_func(ComparisonFunction::Less);
    context.enable_stencil_test(false);
    context.set_stencil_write_mask(0);
    context.set_stencil_ref(StencilFace::Front, 0);
    context.set_fill_mode(FillMode::Solid);
    context.set_cull_mode(CullMode::None);
    context.set_front_face(false);
    context.set_depth_bias(0.0, 0.0);
    context.set_depth_clamp(false);
    context.enable_scissor_test(false);
    context.set_color_write_mask(0, ColorMask::ALL, false).unwrap();
    context.set_num_patch_vertices(0);
}

#[test]
fn test_every_setter_applies_after_invalidate() {
    let mut context = create_context(ContextCaps::default());

    apply_defaults(&mut context);
    let first = context.sink_mut().take();
    assert!(!first.is_empty());

    // Everything cached: repeating is free.
    apply_defaults(&mut context);
    assert!(context.sink().is_empty());

    context.invalidate();
    context.sink_mut().clear();
    apply_defaults(&mut context);
    assert_eq!(context.sink().commands(), first.as_slice());
}

#[test]
fn test_toggles_start_unknown() {
    let mut context = create_context(ContextCaps::default());
    context.enable_depth_test(false);
    assert_eq!(
        context.sink().commands(),
        &[StateCommand::SetEnabled {
            capability: Capability::DepthTest,
            enabled: false,
        }]
    );
}

// ============================================================================
// Memory barriers
// ============================================================================

#[test]
fn test_single_bit_barrier_on_resource() {
    let device = create_device();
    let texture = create_storage_texture(&device, "R");
    let mut context = device.create_context(DummyCommandSink::new());
    context.sink_mut().clear();

    let bit = MemoryBarrierFlags::TEXTURE_FETCH;
    texture.set_pending_memory_barriers(bit);
    context.set_pending_memory_barriers(bit);

    let issued = context.ensure_memory_barrier(bit, Some(&texture));
    assert_eq!(issued, bit);
    assert_eq!(context.sink().commands(), &[StateCommand::MemoryBarrier(bit)]);
    assert!(texture.pending_memory_barriers().is_empty());
    assert!(context.pending_memory_barriers().is_empty());

    // Nothing left to do.
    context.ensure_memory_barrier(bit, Some(&texture));
    assert_eq!(context.sink().len(), 1);
}

#[rstest]
#[case::all_required(MemoryBarrierFlags::all())]
#[case::texture_group(MemoryBarrierFlags::TEXTURE)]
#[case::unrelated(MemoryBarrierFlags::UNIFORM)]
fn test_no_phantom_pending_bits(#[case] required: MemoryBarrierFlags) {
    let device = create_device();
    let texture = create_storage_texture(&device, "R");
    let mut context = create_context(ContextCaps::default());

    texture.set_pending_memory_barriers(
        MemoryBarrierFlags::TEXTURE_FETCH | MemoryBarrierFlags::FRAMEBUFFER,
    );
    context.set_pending_memory_barriers(
        MemoryBarrierFlags::FRAMEBUFFER | MemoryBarrierFlags::SHADER_STORAGE,
    );

    context.ensure_memory_barrier(required, Some(&texture));
    assert!(
        context
            .pending_memory_barriers()
            .contains(texture.pending_memory_barriers())
    );
    assert!(
        count_commands(context.sink().commands(), |c| matches!(
            c,
            StateCommand::MemoryBarrier(_)
        )) <= 1
    );
}

#[test]
fn test_barriers_need_support() {
    let mut context = create_context(ContextCaps::default().with_memory_barriers(false));
    context.set_pending_memory_barriers(MemoryBarrierFlags::TEXTURE_FETCH);
    let issued = context.ensure_memory_barrier(MemoryBarrierFlags::TEXTURE_FETCH, None);
    assert!(issued.is_empty());
    assert!(context.sink().is_empty());
}

// ============================================================================
// Blend and color masks
// ============================================================================

#[test]
fn test_write_mask_mode_switch_reapplies() {
    let mut context = create_context(ContextCaps::default());
    let rgb = ColorMask::RED | ColorMask::GREEN | ColorMask::BLUE;

    context.set_color_write_mask(0, rgb, false).unwrap();
    context.set_color_write_mask(2, rgb, false).unwrap();
    assert_eq!(context.sink().len(), 1);
    assert_eq!(context.color_write_mask(5), (Some(rgb), EnableState::Disabled));

    // Same value, different mode.
    context.set_color_write_mask(2, rgb, true).unwrap();
    assert_eq!(
        context.sink().commands().last(),
        Some(&StateCommand::ColorMask {
            target: Some(2),
            mask: rgb,
        })
    );
    assert_eq!(context.color_write_mask(2), (Some(rgb), EnableState::Enabled));

    context.set_color_write_mask(2, rgb, true).unwrap();
    assert_eq!(context.sink().len(), 2);

    assert!(context.set_color_write_mask(8, rgb, true).is_err());
}

#[test]
fn test_blend_factors_always_issued() {
    let mut context = create_context(ContextCaps::default());
    context.set_blend_factors([1.0; 4]);
    context.set_blend_factors([1.0; 4]);
    assert_eq!(context.sink().len(), 2);
}

#[test]
fn test_joint_blend_state() {
    let mut context = create_context(ContextCaps::default());
    let mut desc = BlendStateDesc::default();
    desc.render_targets[0] = RenderTargetBlendDesc::alpha_blending();

    context.set_blend_state(&desc);
    let commands = context.sink().commands();
    assert_eq!(
        commands[0],
        StateCommand::SetEnabled {
            capability: Capability::Blend,
            enabled: true,
        }
    );
    assert!(commands.contains(&StateCommand::BlendFunc {
        target: None,
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::InvSrcAlpha,
        src_alpha: BlendFactor::One,
        dst_alpha: BlendFactor::InvSrcAlpha,
    }));
    assert_eq!(
        commands.last(),
        Some(&StateCommand::ColorMask {
            target: None,
            mask: ColorMask::ALL,
        })
    );
}

#[test]
fn test_independent_blend_respects_draw_buffer_limit() {
    let mut context = create_context(ContextCaps::default().with_max_draw_buffers(2));
    let mut desc = BlendStateDesc {
        independent_blend: true,
        ..BlendStateDesc::default()
    };
    desc.render_targets[1] = RenderTargetBlendDesc::alpha_blending();
    desc.render_targets[5] = RenderTargetBlendDesc::alpha_blending();

    context.set_blend_state(&desc);
    let commands = context.sink().commands();
    assert_eq!(
        count_commands(commands, |c| matches!(c, StateCommand::BlendFunc { .. })),
        2
    );
    assert!(!commands.iter().any(|c| matches!(
        c,
        StateCommand::BlendEnabled { target, .. } if *target >= 2
    )));
    assert_eq!(
        count_commands(commands, |c| matches!(
            c,
            StateCommand::ColorMask {
                target: Some(_),
                ..
            }
        )),
        2
    );
}

#[test]
fn test_disabled_blend() {
    let mut context = create_context(ContextCaps::default());
    context.set_blend_state(&BlendStateDesc::default());
    assert_eq!(
        context.sink().commands()[0],
        StateCommand::SetEnabled {
            capability: Capability::Blend,
            enabled: false,
        }
    );
    assert!(!context
        .sink()
        .commands()
        .iter()
        .any(|c| matches!(c, StateCommand::BlendFunc { .. })));
}
