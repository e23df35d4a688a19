//! Device profile model.

use crate::flags::{DeviceFlags, ForcePixelFormat, PixelFormat, TwFlags};
use crate::validate::{validate, ValidationFlags};

/// One device hardware profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Device {
    /// Unique key. Empty until set; [`validate`] reports it.
    pub id: String,
    pub codenames: Vec<String>,
    /// Human-readable name, e.g. "Samsung Galaxy S 4".
    pub name: String,
    /// One of the names in [`Architecture`](crate::flags::Architecture); not checked until validation.
    pub architecture: String,
    pub flags: DeviceFlags,
    pub block_devs: BlockDevs,
    pub boot_ui: BootUi,
}

/// Block device paths, grouped by partition. Each list is in search order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockDevs {
    pub base_dirs: Vec<String>,
    pub system: Vec<String>,
    pub cache: Vec<String>,
    pub data: Vec<String>,
    pub boot: Vec<String>,
    pub recovery: Vec<String>,
    pub extra: Vec<String>,
}

/// Recovery (boot UI) display and touch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BootUi {
    pub supported: bool,
    pub flags: TwFlags,
    pub pixel_format: PixelFormat,
    pub force_pixel_format: ForcePixelFormat,
    pub overscan_percent: i32,
    pub default_x_offset: i32,
    pub default_y_offset: i32,
    pub brightness_path: String,
    pub secondary_brightness_path: String,
    /// `None` means unset; `Some(0)` is a real value.
    pub max_brightness: Option<i32>,
    pub default_brightness: Option<i32>,
    pub battery_path: String,
    pub cpu_temp_path: String,
    pub input_blacklist: String,
    pub input_whitelist: String,
    pub graphics_backends: Vec<String>,
    pub theme: String,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Device {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Run the structural rules; an empty result means the profile is usable.
    pub fn validate(&self) -> ValidationFlags {
        validate(self)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl BlockDevs {
    pub fn is_empty(&self) -> bool {
        self.base_dirs.is_empty()
            && self.system.is_empty()
            && self.cache.is_empty()
            && self.data.is_empty()
            && self.boot.is_empty()
            && self.recovery.is_empty()
            && self.extra.is_empty()
    }
}
