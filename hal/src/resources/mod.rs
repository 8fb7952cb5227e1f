//! GPU resources.
//!
//! Textures and their views are created through
//! [`GraphicsDevice`](crate::device::GraphicsDevice) and shared through `Arc`.

mod default_views;
mod texture;
mod view;

pub use default_views::default_view_descriptors;
pub use texture::Texture;
pub use view::TextureView;
