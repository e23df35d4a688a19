//! Structural validation of a decoded [`Device`].
//!
//! ## Rules
//!
//! - **Identity**: `id`, `codenames`, `name` and `architecture` must be present, and the
//!   architecture must be one of [`Architecture`]'s names.
//! - **Flags**: device flags must not carry bits outside [`DeviceFlags`](crate::flags::DeviceFlags).
//! - **Block devices**: `system`, `cache`, `data` and `boot` need at least one path.
//!   Recovery paths are optional.
//! - **Boot UI**: only checked when `boot_ui.supported`; flags must stay inside
//!   [`TwFlags`](crate::flags::TwFlags), and a theme and at least one graphics backend are required.
//!
//! Every rule runs; the result is the union of all violations.

use crate::device::Device;
use crate::flags::{has_unknown_bits, Architecture, NamedEnum};
use bitflags::bitflags;

bitflags! {
    /// One bit per violated rule.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ValidationFlags: u64 {
        const MISSING_ID = 1 << 0;
        const MISSING_CODENAMES = 1 << 1;
        const MISSING_NAME = 1 << 2;
        const MISSING_ARCHITECTURE = 1 << 3;
        const MISSING_SYSTEM_BLOCK_DEVS = 1 << 4;
        const MISSING_CACHE_BLOCK_DEVS = 1 << 5;
        const MISSING_DATA_BLOCK_DEVS = 1 << 6;
        const MISSING_BOOT_BLOCK_DEVS = 1 << 7;
        // 1 << 8 is reserved: recovery block devs are not required.
        const MISSING_BOOT_UI_THEME = 1 << 9;
        const MISSING_BOOT_UI_GRAPHICS_BACKENDS = 1 << 10;
        const INVALID_ARCHITECTURE = 1 << 11;
        const INVALID_FLAGS = 1 << 12;
        const INVALID_BOOT_UI_FLAGS = 1 << 13;
    }
}

const MESSAGES: &[(ValidationFlags, &str)] = &[
    (ValidationFlags::MISSING_ID, "Missing device ID"),
    (ValidationFlags::MISSING_CODENAMES, "Missing device codenames"),
    (ValidationFlags::MISSING_NAME, "Missing device name"),
    (ValidationFlags::MISSING_ARCHITECTURE, "Missing device architecture"),
    (ValidationFlags::MISSING_SYSTEM_BLOCK_DEVS, "Missing system block device paths"),
    (ValidationFlags::MISSING_CACHE_BLOCK_DEVS, "Missing cache block device paths"),
    (ValidationFlags::MISSING_DATA_BLOCK_DEVS, "Missing data block device paths"),
    (ValidationFlags::MISSING_BOOT_BLOCK_DEVS, "Missing boot block device paths"),
    (ValidationFlags::MISSING_BOOT_UI_THEME, "Missing Boot UI theme"),
    (
        ValidationFlags::MISSING_BOOT_UI_GRAPHICS_BACKENDS,
        "Missing Boot UI graphics backends",
    ),
    (ValidationFlags::INVALID_ARCHITECTURE, "Invalid device architecture"),
    (ValidationFlags::INVALID_FLAGS, "Invalid device flags"),
    (ValidationFlags::INVALID_BOOT_UI_FLAGS, "Invalid Boot UI flags"),
];

impl ValidationFlags {
    /// One line per set flag, in bit order.
    pub fn messages(&self) -> Vec<&'static str> {
        MESSAGES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, msg)| *msg)
            .collect()
    }
}

/// Run all rules on `device`. Never fails; an empty result means valid.
pub fn validate(device: &Device) -> ValidationFlags {
    let mut out = ValidationFlags::empty();

    out.set(ValidationFlags::MISSING_ID, device.id.is_empty());
    out.set(ValidationFlags::MISSING_CODENAMES, device.codenames.is_empty());
    out.set(ValidationFlags::MISSING_NAME, device.name.is_empty());

    if device.architecture.is_empty() {
        out |= ValidationFlags::MISSING_ARCHITECTURE;
    } else if Architecture::from_name(&device.architecture).is_none() {
        out |= ValidationFlags::INVALID_ARCHITECTURE;
    }

    out.set(ValidationFlags::INVALID_FLAGS, has_unknown_bits(device.flags));

    let devs = &device.block_devs;
    out.set(ValidationFlags::MISSING_SYSTEM_BLOCK_DEVS, devs.system.is_empty());
    out.set(ValidationFlags::MISSING_CACHE_BLOCK_DEVS, devs.cache.is_empty());
    out.set(ValidationFlags::MISSING_DATA_BLOCK_DEVS, devs.data.is_empty());
    out.set(ValidationFlags::MISSING_BOOT_BLOCK_DEVS, devs.boot.is_empty());

    let ui = &device.boot_ui;
    if ui.supported {
        out.set(ValidationFlags::INVALID_BOOT_UI_FLAGS, has_unknown_bits(ui.flags));
        out.set(ValidationFlags::MISSING_BOOT_UI_THEME, ui.theme.is_empty());
        out.set(
            ValidationFlags::MISSING_BOOT_UI_GRAPHICS_BACKENDS,
            ui.graphics_backends.is_empty(),
        );
    }

    out
}
