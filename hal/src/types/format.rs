//! Texture formats and the process-wide format table.
//!
//! Every [`TextureFormat`] has a [`FormatInfo`] entry describing its layout,
//! a set of default view formats (one per [`TextureViewType`]), a native
//! internal-format token and pixel-transfer attributes. The table is built
//! once, on first access, and is read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::texture::BindFlags;
use super::view::TextureViewType;
use crate::native::{self, PixelTransferAttribs};

/// Texture format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(u8)]
pub enum TextureFormat {
    /// Unknown format. Used as "derive from the owner" in view descriptors.
    #[default]
    Unknown = 0,

    // 128-bit formats
    Rgba32Typeless,
    Rgba32Float,
    Rgba32Uint,
    Rgba32Sint,

    // 96-bit formats
    Rgb32Typeless,
    Rgb32Float,
    Rgb32Uint,
    Rgb32Sint,

    // 64-bit formats
    Rgba16Typeless,
    Rgba16Float,
    Rgba16Unorm,
    Rgba16Uint,
    Rgba16Snorm,
    Rgba16Sint,
    Rg32Typeless,
    Rg32Float,
    Rg32Uint,
    Rg32Sint,

    // 64-bit depth-stencil formats
    R32G8X24Typeless,
    D32FloatS8X24Uint,
    R32FloatX8X24Typeless,
    X32TypelessG8X24Uint,

    // 32-bit packed formats
    Rgb10A2Typeless,
    Rgb10A2Unorm,
    Rgb10A2Uint,
    R11G11B10Float,

    // 32-bit formats
    Rgba8Typeless,
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Rgba8Uint,
    Rgba8Snorm,
    Rgba8Sint,
    Rg16Typeless,
    Rg16Float,
    Rg16Unorm,
    Rg16Uint,
    Rg16Snorm,
    Rg16Sint,
    R32Typeless,
    D32Float,
    R32Float,
    R32Uint,
    R32Sint,

    // 32-bit depth-stencil formats
    R24G8Typeless,
    D24UnormS8Uint,
    R24UnormX8Typeless,
    X24TypelessG8Uint,

    // 16-bit formats
    Rg8Typeless,
    Rg8Unorm,
    Rg8Uint,
    Rg8Snorm,
    Rg8Sint,
    R16Typeless,
    R16Float,
    D16Unorm,
    R16Unorm,
    R16Uint,
    R16Snorm,
    R16Sint,

    // 8-bit formats
    R8Typeless,
    R8Unorm,
    R8Uint,
    R8Snorm,
    R8Sint,
    A8Unorm,
    R1Unorm,

    // Shared exponent and packed YUV-style formats
    Rgb9E5SharedExp,
    Rg8B8G8Unorm,
    G8R8G8B8Unorm,

    // Block-compressed formats
    Bc1Typeless,
    Bc1Unorm,
    Bc1UnormSrgb,
    Bc2Typeless,
    Bc2Unorm,
    Bc2UnormSrgb,
    Bc3Typeless,
    Bc3Unorm,
    Bc3UnormSrgb,
    Bc4Typeless,
    Bc4Unorm,
    Bc4Snorm,
    Bc5Typeless,
    Bc5Unorm,
    Bc5Snorm,

    // BGR formats
    B5G6R5Unorm,
    B5G5R5A1Unorm,
    Bgra8Unorm,
    Bgrx8Unorm,
    R10G10B10XrBiasA2Unorm,
    Bgra8Typeless,
    Bgra8UnormSrgb,
    Bgrx8Typeless,
    Bgrx8UnormSrgb,

    // BC6H and BC7
    Bc6hTypeless,
    Bc6hUf16,
    Bc6hSf16,
    Bc7Typeless,
    Bc7Unorm,
    Bc7UnormSrgb,
}

impl TextureFormat {
    /// Number of formats, including [`TextureFormat::Unknown`].
    pub const COUNT: usize = 100;

    /// All formats in declaration order; `ALL[f as usize] == f`.
    pub const ALL: [TextureFormat; Self::COUNT] = {
        use TextureFormat::*;
        [
            Unknown,
            Rgba32Typeless,
            Rgba32Float,
            Rgba32Uint,
            Rgba32Sint,
            Rgb32Typeless,
            Rgb32Float,
            Rgb32Uint,
            Rgb32Sint,
            Rgba16Typeless,
            Rgba16Float,
            Rgba16Unorm,
            Rgba16Uint,
            Rgba16Snorm,
            Rgba16Sint,
            Rg32Typeless,
            Rg32Float,
            Rg32Uint,
            Rg32Sint,
            R32G8X24Typeless,
            D32FloatS8X24Uint,
            R32FloatX8X24Typeless,
            X32TypelessG8X24Uint,
            Rgb10A2Typeless,
            Rgb10A2Unorm,
            Rgb10A2Uint,
            R11G11B10Float,
            Rgba8Typeless,
            Rgba8Unorm,
            Rgba8UnormSrgb,
            Rgba8Uint,
            Rgba8Snorm,
            Rgba8Sint,
            Rg16Typeless,
            Rg16Float,
            Rg16Unorm,
            Rg16Uint,
            Rg16Snorm,
            Rg16Sint,
            R32Typeless,
            D32Float,
            R32Float,
            R32Uint,
            R32Sint,
            R24G8Typeless,
            D24UnormS8Uint,
            R24UnormX8Typeless,
            X24TypelessG8Uint,
            Rg8Typeless,
            Rg8Unorm,
            Rg8Uint,
            Rg8Snorm,
            Rg8Sint,
            R16Typeless,
            R16Float,
            D16Unorm,
            R16Unorm,
            R16Uint,
            R16Snorm,
            R16Sint,
            R8Typeless,
            R8Unorm,
            R8Uint,
            R8Snorm,
            R8Sint,
            A8Unorm,
            R1Unorm,
            Rgb9E5SharedExp,
            Rg8B8G8Unorm,
            G8R8G8B8Unorm,
            Bc1Typeless,
            Bc1Unorm,
            Bc1UnormSrgb,
            Bc2Typeless,
            Bc2Unorm,
            Bc2UnormSrgb,
            Bc3Typeless,
            Bc3Unorm,
            Bc3UnormSrgb,
            Bc4Typeless,
            Bc4Unorm,
            Bc4Snorm,
            Bc5Typeless,
            Bc5Unorm,
            Bc5Snorm,
            B5G6R5Unorm,
            B5G5R5A1Unorm,
            Bgra8Unorm,
            Bgrx8Unorm,
            R10G10B10XrBiasA2Unorm,
            Bgra8Typeless,
            Bgra8UnormSrgb,
            Bgrx8Typeless,
            Bgrx8UnormSrgb,
            Bc6hTypeless,
            Bc6hUf16,
            Bc6hSf16,
            Bc7Typeless,
            Bc7Unorm,
            Bc7UnormSrgb,
        ]
    };

    /// Get the table entry for this format.
    pub fn info(self) -> &'static FormatInfo {
        &FormatTable::get().infos[self as usize]
    }

    /// Returns true if the storage layout defers interpretation to the view.
    pub fn is_typeless(self) -> bool {
        self.info().is_typeless
    }

    /// Returns true for block-compressed formats.
    pub fn is_compressed(self) -> bool {
        self.info().component_type == ComponentType::Compressed
    }

    /// Returns true if this is a depth or depth-stencil format.
    pub fn is_depth_stencil(self) -> bool {
        matches!(
            self.info().component_type,
            ComponentType::Depth | ComponentType::DepthStencil
        )
    }

    /// Signed-normalized color formats that some drivers clamp when rendered to.
    pub fn is_snorm_color(self) -> bool {
        matches!(
            self,
            Self::R8Snorm
                | Self::Rg8Snorm
                | Self::Rgba8Snorm
                | Self::R16Snorm
                | Self::Rg16Snorm
                | Self::Rgba16Snorm
        )
    }
}

/// Interpretation of a format's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentType {
    /// Typeless; interpretation is left to the view.
    #[default]
    Undefined,
    Float,
    Snorm,
    Unorm,
    UnormSrgb,
    Sint,
    Uint,
    Depth,
    DepthStencil,
    /// Packed formats whose components have different sizes.
    Compound,
    /// Block-compressed formats.
    Compressed,
}

/// Invariant attributes of a texture format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format literal name.
    pub name: String,
    /// The format this entry describes.
    pub format: TextureFormat,
    /// Size of one component in bytes. For compressed formats, the block size.
    pub component_size: u8,
    /// Number of components.
    pub num_components: u8,
    /// Component interpretation.
    pub component_type: ComponentType,
    /// Whether the format is typeless.
    pub is_typeless: bool,
    /// Block width for compressed formats, 1 otherwise.
    pub block_width: u8,
    /// Block height for compressed formats, 1 otherwise.
    pub block_height: u8,
}

impl FormatInfo {
    fn new(format: TextureFormat) -> Self {
        let (component_size, num_components, component_type, is_typeless, block) =
            format_layout(format);
        Self {
            name: format!("{format:?}"),
            format,
            component_size,
            num_components,
            component_type,
            is_typeless,
            block_width: block,
            block_height: block,
        }
    }

    /// Bytes per texel (or per block for compressed formats).
    pub fn texel_size(&self) -> u32 {
        if self.component_type == ComponentType::Compressed {
            u32::from(self.component_size)
        } else {
            u32::from(self.component_size) * u32::from(self.num_components)
        }
    }
}

// ============================================================================
// Format table
// ============================================================================

/// Read-only lookup tables built once per process.
struct FormatTable {
    infos: Vec<FormatInfo>,
    view_formats: Vec<[TextureFormat; 4]>,
    native_formats: Vec<u32>,
    transfer_attribs: Vec<PixelTransferAttribs>,
    from_native: HashMap<u32, TextureFormat>,
}

impl FormatTable {
    fn get() -> &'static FormatTable {
        static TABLE: OnceLock<FormatTable> = OnceLock::new();
        TABLE.get_or_init(FormatTable::build)
    }

    fn build() -> Self {
        let infos: Vec<FormatInfo> = TextureFormat::ALL
            .iter()
            .map(|&format| FormatInfo::new(format))
            .collect();
        let view_formats = TextureFormat::ALL.iter().map(|&f| view_formats(f)).collect();
        let native_formats: Vec<u32> = TextureFormat::ALL
            .iter()
            .map(|&f| native::internal_format(f))
            .collect();
        let transfer_attribs = TextureFormat::ALL
            .iter()
            .map(|&f| native::pixel_transfer_attribs(f))
            .collect();

        // Typeless and depth-stencil formats alias the tokens of their typed
        // counterparts, so only typed formats take part in the reverse map.
        let mut from_native = HashMap::new();
        for info in &infos {
            let skip = matches!(
                info.component_type,
                ComponentType::Undefined | ComponentType::DepthStencil
            ) || info.is_typeless;
            let token = native_formats[info.format as usize];
            if skip || token == 0 {
                continue;
            }
            from_native.entry(token).or_insert(info.format);
        }
        for format in [TextureFormat::D32FloatS8X24Uint, TextureFormat::D24UnormS8Uint] {
            from_native.insert(native_formats[format as usize], format);
        }

        log::trace!(
            "FormatTable: initialized {} formats, {} native tokens",
            infos.len(),
            from_native.len()
        );

        Self {
            infos,
            view_formats,
            native_formats,
            transfer_attribs,
            from_native,
        }
    }
}

/// Default format of a view of `view_type` onto a texture of `format`.
///
/// Returns [`TextureFormat::Unknown`] when no such view exists (for example
/// a render target view of a block-compressed texture).
pub fn default_view_format(
    format: TextureFormat,
    view_type: TextureViewType,
    bind_flags: BindFlags,
) -> TextureFormat {
    let Some(slot) = view_type.table_slot() else {
        return TextureFormat::Unknown;
    };

    // R16 typeless storage bound as depth is D16 storage.
    if format == TextureFormat::R16Typeless && bind_flags.contains(BindFlags::DEPTH_STENCIL) {
        return [
            TextureFormat::R16Unorm,
            TextureFormat::R16Unorm,
            TextureFormat::D16Unorm,
            TextureFormat::R16Unorm,
        ][slot];
    }

    FormatTable::get().view_formats[format as usize][slot]
}

/// Native internal-format token for `format`, or 0 if the format has none.
///
/// Depth-stencil bound R32F and R16 storage is promoted to the matching depth
/// format.
pub fn native_format(format: TextureFormat, bind_flags: BindFlags) -> u32 {
    let token = FormatTable::get().native_formats[format as usize];
    if bind_flags.contains(BindFlags::DEPTH_STENCIL) {
        native::correct_depth_format(token)
    } else {
        token
    }
}

/// Reverse lookup of [`native_format`].
pub fn format_from_native(token: u32) -> Option<TextureFormat> {
    let format = FormatTable::get().from_native.get(&token).copied();
    if format.is_none() {
        log::warn!("Unknown native texture format 0x{token:04X}");
    }
    format
}

/// Pixel-transfer attributes used when uploading to or reading back `format`.
pub fn pixel_transfer_attribs(format: TextureFormat) -> PixelTransferAttribs {
    FormatTable::get().transfer_attribs[format as usize]
}

/// (component size, components, component type, typeless, block size)
fn format_layout(format: TextureFormat) -> (u8, u8, ComponentType, bool, u8) {
    use ComponentType as C;
    use TextureFormat::*;

    match format {
        Unknown => (0, 0, C::Undefined, false, 1),

        Rgba32Typeless => (4, 4, C::Undefined, true, 1),
        Rgba32Float => (4, 4, C::Float, false, 1),
        Rgba32Uint => (4, 4, C::Uint, false, 1),
        Rgba32Sint => (4, 4, C::Sint, false, 1),

        Rgb32Typeless => (4, 3, C::Undefined, true, 1),
        Rgb32Float => (4, 3, C::Float, false, 1),
        Rgb32Uint => (4, 3, C::Uint, false, 1),
        Rgb32Sint => (4, 3, C::Sint, false, 1),

        Rgba16Typeless => (2, 4, C::Undefined, true, 1),
        Rgba16Float => (2, 4, C::Float, false, 1),
        Rgba16Unorm => (2, 4, C::Unorm, false, 1),
        Rgba16Uint => (2, 4, C::Uint, false, 1),
        Rgba16Snorm => (2, 4, C::Snorm, false, 1),
        Rgba16Sint => (2, 4, C::Sint, false, 1),

        Rg32Typeless => (4, 2, C::Undefined, true, 1),
        Rg32Float => (4, 2, C::Float, false, 1),
        Rg32Uint => (4, 2, C::Uint, false, 1),
        Rg32Sint => (4, 2, C::Sint, false, 1),

        R32G8X24Typeless => (4, 2, C::DepthStencil, true, 1),
        D32FloatS8X24Uint => (4, 2, C::DepthStencil, false, 1),
        R32FloatX8X24Typeless => (4, 2, C::DepthStencil, false, 1),
        X32TypelessG8X24Uint => (4, 2, C::DepthStencil, false, 1),

        Rgb10A2Typeless => (4, 1, C::Compound, true, 1),
        Rgb10A2Unorm | Rgb10A2Uint | R11G11B10Float => (4, 1, C::Compound, false, 1),

        Rgba8Typeless => (1, 4, C::Undefined, true, 1),
        Rgba8Unorm => (1, 4, C::Unorm, false, 1),
        Rgba8UnormSrgb => (1, 4, C::UnormSrgb, false, 1),
        Rgba8Uint => (1, 4, C::Uint, false, 1),
        Rgba8Snorm => (1, 4, C::Snorm, false, 1),
        Rgba8Sint => (1, 4, C::Sint, false, 1),

        Rg16Typeless => (2, 2, C::Undefined, true, 1),
        Rg16Float => (2, 2, C::Float, false, 1),
        Rg16Unorm => (2, 2, C::Unorm, false, 1),
        Rg16Uint => (2, 2, C::Uint, false, 1),
        Rg16Snorm => (2, 2, C::Snorm, false, 1),
        Rg16Sint => (2, 2, C::Sint, false, 1),

        R32Typeless => (4, 1, C::Undefined, true, 1),
        D32Float => (4, 1, C::Depth, false, 1),
        R32Float => (4, 1, C::Float, false, 1),
        R32Uint => (4, 1, C::Uint, false, 1),
        R32Sint => (4, 1, C::Sint, false, 1),

        R24G8Typeless => (4, 1, C::DepthStencil, true, 1),
        D24UnormS8Uint | R24UnormX8Typeless | X24TypelessG8Uint => {
            (4, 1, C::DepthStencil, false, 1)
        }

        Rg8Typeless => (1, 2, C::Undefined, true, 1),
        Rg8Unorm => (1, 2, C::Unorm, false, 1),
        Rg8Uint => (1, 2, C::Uint, false, 1),
        Rg8Snorm => (1, 2, C::Snorm, false, 1),
        Rg8Sint => (1, 2, C::Sint, false, 1),

        R16Typeless => (2, 1, C::Undefined, true, 1),
        R16Float => (2, 1, C::Float, false, 1),
        D16Unorm => (2, 1, C::Depth, false, 1),
        R16Unorm => (2, 1, C::Unorm, false, 1),
        R16Uint => (2, 1, C::Uint, false, 1),
        R16Snorm => (2, 1, C::Snorm, false, 1),
        R16Sint => (2, 1, C::Sint, false, 1),

        R8Typeless => (1, 1, C::Undefined, true, 1),
        R8Unorm | A8Unorm | R1Unorm => (1, 1, C::Unorm, false, 1),
        R8Uint => (1, 1, C::Uint, false, 1),
        R8Snorm => (1, 1, C::Snorm, false, 1),
        R8Sint => (1, 1, C::Sint, false, 1),

        Rgb9E5SharedExp => (4, 1, C::Compound, false, 1),
        Rg8B8G8Unorm | G8R8G8B8Unorm => (1, 4, C::Unorm, false, 1),

        Bc1Typeless => (8, 3, C::Compressed, true, 4),
        Bc1Unorm | Bc1UnormSrgb => (8, 3, C::Compressed, false, 4),
        Bc2Typeless => (16, 4, C::Compressed, true, 4),
        Bc2Unorm | Bc2UnormSrgb => (16, 4, C::Compressed, false, 4),
        Bc3Typeless => (16, 4, C::Compressed, true, 4),
        Bc3Unorm | Bc3UnormSrgb => (16, 4, C::Compressed, false, 4),
        Bc4Typeless => (8, 1, C::Compressed, true, 4),
        Bc4Unorm | Bc4Snorm => (8, 1, C::Compressed, false, 4),
        Bc5Typeless => (16, 2, C::Compressed, true, 4),
        Bc5Unorm | Bc5Snorm => (16, 2, C::Compressed, false, 4),

        B5G6R5Unorm | B5G5R5A1Unorm => (2, 1, C::Compound, false, 1),
        Bgra8Unorm | Bgrx8Unorm => (1, 4, C::Unorm, false, 1),
        R10G10B10XrBiasA2Unorm => (4, 1, C::Compound, false, 1),
        Bgra8Typeless | Bgrx8Typeless => (1, 4, C::Undefined, true, 1),
        Bgra8UnormSrgb | Bgrx8UnormSrgb => (1, 4, C::UnormSrgb, false, 1),

        Bc6hTypeless => (16, 3, C::Compressed, true, 4),
        Bc6hUf16 | Bc6hSf16 => (16, 3, C::Compressed, false, 4),
        Bc7Typeless => (16, 4, C::Compressed, true, 4),
        Bc7Unorm | Bc7UnormSrgb => (16, 4, C::Compressed, false, 4),
    }
}

/// Default view formats in [SRV, RTV, DSV, UAV] order.
fn view_formats(format: TextureFormat) -> [TextureFormat; 4] {
    use TextureFormat::*;

    match format {
        Rgba32Typeless => [Rgba32Float, Rgba32Float, Unknown, Rgba32Float],
        Rgb32Typeless => [Rgb32Float, Rgb32Float, Unknown, Rgb32Float],
        Rgba16Typeless => [Rgba16Float, Rgba16Float, Unknown, Rgba16Float],
        Rg32Typeless => [Rg32Float, Rg32Float, Unknown, Rg32Float],

        R32G8X24Typeless | D32FloatS8X24Uint => {
            [R32FloatX8X24Typeless, Unknown, D32FloatS8X24Uint, Unknown]
        }
        R32FloatX8X24Typeless | X32TypelessG8X24Uint => [format, Unknown, D32FloatS8X24Uint, format],

        Rgb10A2Typeless => [Rgb10A2Unorm, Rgb10A2Unorm, Unknown, Rgb10A2Unorm],

        Rgba8Typeless => [Rgba8UnormSrgb, Rgba8UnormSrgb, Unknown, Rgba8Unorm],
        Rgba8UnormSrgb => [Rgba8UnormSrgb, Rgba8UnormSrgb, Unknown, Rgba8Unorm],

        Rg16Typeless => [Rg16Float, Rg16Float, Unknown, Rg16Float],

        R32Typeless | D32Float | R32Float => [R32Float, R32Float, D32Float, R32Float],

        R24G8Typeless | D24UnormS8Uint => [R24UnormX8Typeless, Unknown, D24UnormS8Uint, Unknown],
        R24UnormX8Typeless | X24TypelessG8Uint => [format, Unknown, D24UnormS8Uint, format],

        Rg8Typeless => [Rg8Unorm, Rg8Unorm, Unknown, Rg8Unorm],
        R16Typeless => [R16Float, R16Float, Unknown, R16Float],
        D16Unorm | R16Unorm => [R16Unorm, R16Unorm, D16Unorm, R16Unorm],
        R8Typeless => [R8Unorm, R8Unorm, Unknown, R8Unorm],

        Bc1Typeless => [Bc1UnormSrgb, Unknown, Unknown, Unknown],
        Bc2Typeless => [Bc2UnormSrgb, Unknown, Unknown, Unknown],
        Bc3Typeless => [Bc3UnormSrgb, Unknown, Unknown, Unknown],
        Bc4Typeless => [Bc4Unorm, Unknown, Unknown, Unknown],
        Bc5Typeless => [Bc5Unorm, Unknown, Unknown, Unknown],
        Bc6hTypeless => [Bc6hUf16, Unknown, Unknown, Unknown],
        Bc7Typeless => [Bc7UnormSrgb, Unknown, Unknown, Unknown],
        Bc1Unorm | Bc1UnormSrgb | Bc2Unorm | Bc2UnormSrgb | Bc3Unorm | Bc3UnormSrgb | Bc4Unorm
        | Bc4Snorm | Bc5Unorm | Bc5Snorm | Bc6hUf16 | Bc6hSf16 | Bc7Unorm | Bc7UnormSrgb
        | R10G10B10XrBiasA2Unorm => [format, Unknown, Unknown, Unknown],

        Bgra8Typeless | Bgra8UnormSrgb => [Bgra8UnormSrgb, Bgra8UnormSrgb, Unknown, Bgra8Unorm],
        Bgrx8Typeless | Bgrx8UnormSrgb => [Bgrx8UnormSrgb, Bgrx8UnormSrgb, Unknown, Bgrx8Unorm],

        _ => [format, format, Unknown, format],
    }
}
