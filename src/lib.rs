//! # devprofile — Android device profiles, strict JSON codec and validation
//!
//! A typed model of device hardware profiles (block device paths, architecture, recovery
//! UI touch/display quirks), with a closed-schema JSON decoder that reports the exact
//! location of the first problem, a canonical encoder, a structural validator, and a
//! batch compiler that turns YAML definitions into one JSON document.
//!
//! ## JSON structure
//!
//! ```text
//! {
//!   "id": "hlte",
//!   "codenames": ["hlte", "hltexx"],
//!   "name": "Samsung Galaxy Note 3",
//!   "architecture": "armeabi-v7a",
//!   "flags": ["HAS_COMBINED_BOOT_AND_RECOVERY"],
//!   "block_devs": {
//!     "base_dirs": ["/dev/block/platform/msm_sdcc.1/by-name"],
//!     "system": ["/dev/block/platform/msm_sdcc.1/by-name/system"],
//!     ...
//!   },
//!   "boot_ui": {
//!     "supported": true,
//!     "flags": ["TW_QCOM_RTC_FIX"],
//!     "pixel_format": "RGBX_8888",
//!     "max_brightness": 255,
//!     "graphics_backends": ["fbdev"],
//!     "theme": "portrait_hdpi"
//!   }
//! }
//! ```
//!
//! Unknown keys are rejected at every level.
//!
//! ## Usage
//!
//! ```
//! use devprofile::{decode, encode, JsonError};
//!
//! let device = decode(r#"{"id": "test", "boot_ui": {"max_brightness": 0}}"#).unwrap();
//! assert_eq!(device.boot_ui.max_brightness, Some(0));
//! assert_eq!(encode(&device), r#"{"id":"test","boot_ui":{"max_brightness":0}}"#);
//!
//! let err = decode(r#"{"boot_ui": {"flags": ["TW_FOO"]}}"#).unwrap_err();
//! assert_eq!(err, JsonError::UnknownValue { context: ".boot_ui.flags[0]".into() });
//! ```
//!
//! See `tests/json.rs` and `tests/compile.rs` for more.

pub mod codec;
pub mod compile;
pub mod device;
pub mod flags;
mod schema;
pub mod validate;
pub mod value;
pub mod yaml;

pub use codec::{
    decode, decode_list, decode_list_value, decode_value, encode, encode_pretty, encode_value,
    Context, JsonError,
};
pub use compile::{compile_file, compile_files, render, CompileError, OutputStyle};
pub use device::{BlockDevs, BootUi, Device};
pub use flags::{Architecture, DeviceFlags, ForcePixelFormat, NamedEnum, PixelFormat, TwFlags};
pub use validate::{validate, ValidationFlags};
pub use value::JsonType;
pub use yaml::{yaml_to_json, ConvertError};
