//! Lookup tables for device flags, boot UI flags, pixel formats and architectures.
//!
//! Every table is declared once and drives both directions: decode looks a name up,
//! encode walks the table in declaration order. That order is part of the canonical
//! JSON output, so new entries go at the end.

use bitflags::bitflags;

bitflags! {
    /// Device-level behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceFlags: u64 {
        const HAS_COMBINED_BOOT_AND_RECOVERY = 1 << 0;
        const FSTAB_SKIP_SDCARD0 = 1 << 1;
    }
}

bitflags! {
    /// Recovery UI quirks: touchscreen orientation, graphics workarounds, and
    /// screen/brightness/thermal behaviour.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TwFlags: u64 {
        const TW_TOUCHSCREEN_SWAP_XY = 1 << 0;
        const TW_TOUCHSCREEN_FLIP_X = 1 << 1;
        const TW_TOUCHSCREEN_FLIP_Y = 1 << 2;
        const TW_GRAPHICS_FORCE_USE_LINELENGTH = 1 << 3;
        const TW_SCREEN_BLANK_ON_BOOT = 1 << 4;
        const TW_BOARD_HAS_FLIPPED_SCREEN = 1 << 5;
        const TW_IGNORE_MAJOR_AXIS_0 = 1 << 6;
        const TW_IGNORE_MT_POSITION_0 = 1 << 7;
        const TW_IGNORE_ABS_MT_TRACKING_ID = 1 << 8;
        const TW_NEW_ION_HEAP = 1 << 9;
        const TW_NO_SCREEN_BLANK = 1 << 10;
        const TW_NO_SCREEN_TIMEOUT = 1 << 11;
        const TW_ROUND_SCREEN = 1 << 12;
        const TW_NO_CPU_TEMP = 1 << 13;
        const TW_QCOM_RTC_FIX = 1 << 14;
        const TW_HAS_DOWNLOAD_MODE = 1 << 15;
        const TW_PREFER_LCD_BACKLIGHT = 1 << 16;
    }
}

/// True when `flags` carries a bit that has no name in its table.
pub fn has_unknown_bits<F: bitflags::Flags>(flags: F) -> bool {
    F::from_bits(flags.bits()).is_none()
}

/// Names of the set bits of `flags`, in table declaration order. Unknown bits are skipped.
pub fn flag_names<F: bitflags::Flags>(flags: &F) -> Vec<&'static str> {
    F::FLAGS
        .iter()
        .filter(|f| {
            let bit = F::from_bits_retain(f.value().bits());
            !bit.is_empty() && flags.contains(bit)
        })
        .map(|f| f.name())
        .collect()
}

/// A closed enumeration with a fixed wire name per variant.
pub trait NamedEnum: Copy + PartialEq + 'static {
    /// (name, variant) pairs in declaration order.
    const TABLE: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, v)| *v == self)
            .map(|(n, _)| *n)
            .unwrap_or_default()
    }
}

/// Framebuffer pixel format override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub enum PixelFormat {
    #[default]
    DEFAULT,
    ABGR_8888,
    RGBX_8888,
    BGRA_8888,
    RGBA_8888,
}

impl NamedEnum for PixelFormat {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("DEFAULT", PixelFormat::DEFAULT),
        ("ABGR_8888", PixelFormat::ABGR_8888),
        ("RGBX_8888", PixelFormat::RGBX_8888),
        ("BGRA_8888", PixelFormat::BGRA_8888),
        ("RGBA_8888", PixelFormat::RGBA_8888),
    ];
}

/// Forced pixel format (applied after [`PixelFormat`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub enum ForcePixelFormat {
    #[default]
    NONE,
    RGB_565,
}

impl NamedEnum for ForcePixelFormat {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("NONE", ForcePixelFormat::NONE),
        ("RGB_565", ForcePixelFormat::RGB_565),
    ];
}

/// CPU architectures a device profile may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    ArmeabiV7a,
    Arm64V8a,
    X86,
    X86_64,
}

impl NamedEnum for Architecture {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("armeabi-v7a", Architecture::ArmeabiV7a),
        ("arm64-v8a", Architecture::Arm64V8a),
        ("x86", Architecture::X86),
        ("x86_64", Architecture::X86_64),
    ];
}
