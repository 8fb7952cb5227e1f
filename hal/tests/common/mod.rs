//! Common utilities for HAL integration tests.

use std::sync::Arc;

use redlilium_hal::{
    BindFlags, BindingStateCache, ContextCaps, DummyCommandSink, GraphicsDevice, StateCommand,
    Texture, TextureDescriptor, TextureFormat,
};

/// Install a test logger once. Repeated calls are harmless.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a device on the dummy backend.
pub fn create_device() -> Arc<GraphicsDevice> {
    init_logging();
    GraphicsDevice::new_dummy()
}

/// Create a context with `caps` and forget the commands issued while creating it.
#[allow(dead_code)]
pub fn create_context(caps: ContextCaps) -> BindingStateCache<DummyCommandSink> {
    init_logging();
    let mut context = BindingStateCache::new(DummyCommandSink::new(), caps);
    context.sink_mut().clear();
    context
}

/// Create a 2D texture that can be written through an image unit.
#[allow(dead_code)]
pub fn create_storage_texture(device: &Arc<GraphicsDevice>, label: &str) -> Arc<Texture> {
    device
        .create_texture(
            &TextureDescriptor::new_2d(
                128,
                128,
                TextureFormat::Rgba8Unorm,
                BindFlags::SHADER_RESOURCE | BindFlags::UNORDERED_ACCESS,
            )
            .with_label(label),
        )
        .expect("storage texture")
}

/// Count the commands in `commands` matching `predicate`.
#[allow(dead_code)]
pub fn count_commands(
    commands: &[StateCommand],
    predicate: impl Fn(&StateCommand) -> bool,
) -> usize {
    commands.iter().filter(|command| predicate(command)).count()
}
