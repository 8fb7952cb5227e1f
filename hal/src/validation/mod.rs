//! Descriptor validation and correction.
//!
//! - [`validate_texture_desc`] completes and checks texture descriptors
//! - [`correct_texture_view_desc`] completes and checks view descriptors
//! - [`debug`] holds bounds checks for region-based operations

pub mod debug;
mod texture;
mod view;

pub use texture::{
    compute_mip_levels_count, max_mip_dimension, mip_level_properties, validate_texture_desc,
};
pub use view::correct_texture_view_desc;
