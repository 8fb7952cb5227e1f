use criterion::{Criterion, black_box, criterion_group, criterion_main};

use redlilium_hal::types::{
    ColorMask, ComparisonFunction, CullMode, REMAINING, TextureBindTarget,
};
use redlilium_hal::{
    BindFlags, BindingStateCache, ContextCaps, DummyCommandSink, GraphicsDevice,
    MemoryBarrierFlags, ResourceDimension, TextureDescriptor, TextureFormat,
    TextureViewDescriptor, TextureViewType, correct_texture_view_desc, validate_texture_desc,
};

// ---------------------------------------------------------------------------
// Binding-state cache
// ---------------------------------------------------------------------------

fn bench_redundant_binds(c: &mut Criterion) {
    let mut context = BindingStateCache::new(DummyCommandSink::new(), ContextCaps::default());
    context.set_program(1);
    for unit in 0..16 {
        context
            .bind_texture(unit, TextureBindTarget::Texture2D, unit as u32 + 1)
            .ok();
    }
    context.sink_mut().clear();

    c.bench_function("state_cache_redundant_draw_state", |b| {
        b.iter(|| {
            context.set_program(black_box(1));
            for unit in 0..16 {
                context
                    .bind_texture(unit, TextureBindTarget::Texture2D, unit as u32 + 1)
                    .ok();
            }
            context.enable_depth_test(true);
            context.set_depth_func(ComparisonFunction::Less);
            context.set_cull_mode(CullMode::Back);
            context.set_color_write_mask(0, ColorMask::ALL, false).ok();
            black_box(context.sink().len());
        });
    });
}

fn bench_alternating_binds(c: &mut Criterion) {
    let mut context = BindingStateCache::new(DummyCommandSink::new(), ContextCaps::default());

    c.bench_function("state_cache_alternating_textures", |b| {
        let mut handle = 0u32;
        b.iter(|| {
            handle ^= 1;
            context
                .bind_texture(black_box(-1), TextureBindTarget::Texture2D, handle + 1)
                .ok();
            context.sink_mut().clear();
        });
    });
}

fn bench_memory_barriers(c: &mut Criterion) {
    let device = GraphicsDevice::new_dummy();
    let texture = device
        .create_texture(&TextureDescriptor::new_2d(
            256,
            256,
            TextureFormat::Rgba8Unorm,
            BindFlags::SHADER_RESOURCE | BindFlags::UNORDERED_ACCESS,
        ))
        .expect("texture");
    let mut context = device.create_context(DummyCommandSink::new());

    c.bench_function("memory_barrier_write_then_read", |b| {
        b.iter(|| {
            texture.set_pending_memory_barriers(MemoryBarrierFlags::TEXTURE_FETCH);
            context.set_pending_memory_barriers(MemoryBarrierFlags::TEXTURE_FETCH);
            black_box(context.ensure_memory_barrier(MemoryBarrierFlags::TEXTURE, Some(&texture)));
            context.sink_mut().clear();
        });
    });
}

// ---------------------------------------------------------------------------
// Descriptor validation
// ---------------------------------------------------------------------------

fn bench_texture_validation(c: &mut Criterion) {
    let desc = TextureDescriptor::new_cube(
        1024,
        TextureFormat::Rgba16Float,
        BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET,
    )
    .with_dimension(ResourceDimension::TexCubeArray)
    .with_array_size(12)
    .with_mip_levels(0);

    c.bench_function("validate_cube_array_desc", |b| {
        b.iter(|| black_box(validate_texture_desc(black_box(&desc))).ok());
    });
}

fn bench_view_correction(c: &mut Criterion) {
    let texture = validate_texture_desc(
        &TextureDescriptor::new_2d(
            2048,
            2048,
            TextureFormat::Rgba8Typeless,
            BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET,
        )
        .with_dimension(ResourceDimension::Tex2DArray)
        .with_array_size(8)
        .with_mip_levels(0),
    )
    .expect("valid texture");

    let srv = TextureViewDescriptor::new(TextureViewType::ShaderResource).with_mips(1, REMAINING);
    let rtv = TextureViewDescriptor::new(TextureViewType::RenderTarget)
        .with_format(TextureFormat::Rgba8Unorm)
        .with_slices(2, 4);

    c.bench_function("correct_view_desc_srv_rtv", |b| {
        b.iter(|| {
            black_box(correct_texture_view_desc(&texture, black_box(&srv))).ok();
            black_box(correct_texture_view_desc(&texture, black_box(&rtv))).ok();
        });
    });
}

criterion_group!(
    benches,
    bench_redundant_binds,
    bench_alternating_binds,
    bench_memory_barriers,
    bench_texture_validation,
    bench_view_correction,
);
criterion_main!(benches);
