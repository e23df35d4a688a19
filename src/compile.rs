//! Batch compile YAML device definitions into one JSON document.
//!
//! Each input file holds either one device (a mapping) or several (a sequence). Files are
//! transcoded to JSON, decoded with the strict codec and validated. The first failure
//! aborts the whole batch, so output is never produced from a partially valid set.

use crate::codec::{decode, decode_list, encode_value, JsonError};
use crate::device::Device;
use crate::validate::ValidationFlags;
use crate::yaml::{yaml_to_json, ConvertError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Output formatting for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Compact,
    /// Indented, for humans.
    Styled,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{}: Failed to read file: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: Failed to parse YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("{}: Failed to convert file: {source}", .path.display())]
    Convert {
        path: PathBuf,
        source: ConvertError,
    },
    #[error("{}: Error: {source}", .path.display())]
    Json { path: PathBuf, source: JsonError },
    /// Every device in the file that failed validation, as (id, flags).
    #[error("{}", validation_report(.path, .failures))]
    Validation {
        path: PathBuf,
        failures: Vec<(String, ValidationFlags)>,
    },
    #[error("{}: Failed to write file: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn validation_report(path: &Path, failures: &[(String, ValidationFlags)]) -> String {
    let mut blocks = Vec::with_capacity(failures.len());
    for (id, flags) in failures {
        let id = if id.is_empty() { "unknown" } else { id.as_str() };
        let mut block = format!(
            "{}: [{}] Error during validation (0x{:x}):",
            path.display(),
            id,
            flags.bits()
        );
        for msg in flags.messages() {
            block.push_str("\n- ");
            block.push_str(msg);
        }
        blocks.push(block);
    }
    blocks.join("\n")
}

/// Load, decode and validate every device in one YAML file.
pub fn compile_file(path: &Path) -> Result<Vec<Device>, CompileError> {
    let src = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&src).map_err(|source| CompileError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    let tree = yaml_to_json(&yaml).map_err(|source| CompileError::Convert {
        path: path.to_path_buf(),
        source,
    })?;

    // Round-trip through text so the decoder sees exactly what a JSON consumer would.
    let text = tree.to_string();
    let devices = if tree.is_array() {
        decode_list(&text)
    } else {
        decode(&text).map(|d| vec![d])
    }
    .map_err(|source| CompileError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    // Report every invalid device in the file, not just the first.
    let failures: Vec<(String, ValidationFlags)> = devices
        .iter()
        .filter_map(|device| {
            let flags = device.validate();
            (!flags.is_empty()).then(|| (device.id.clone(), flags))
        })
        .collect();
    if !failures.is_empty() {
        return Err(CompileError::Validation {
            path: path.to_path_buf(),
            failures,
        });
    }

    tracing::debug!(path = %path.display(), devices = devices.len(), "compiled file");
    Ok(devices)
}

/// Compile all files in order and concatenate their devices.
pub fn compile_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Device>, CompileError> {
    let mut out = Vec::new();
    for path in paths {
        out.extend(compile_file(path.as_ref())?);
    }
    tracing::info!(files = paths.len(), devices = out.len(), "compiled device definitions");
    Ok(out)
}

/// Render devices as one JSON array, newline-terminated.
pub fn render(devices: &[Device], style: OutputStyle) -> String {
    let root = Value::Array(devices.iter().map(encode_value).collect());
    match style {
        OutputStyle::Compact => format!("{}\n", root),
        OutputStyle::Styled => format!("{:#}\n", root),
    }
}

/// Write rendered output to `path`.
pub fn write_output(path: &Path, rendered: &str) -> Result<(), CompileError> {
    std::fs::write(path, rendered).map_err(|source| CompileError::Output {
        path: path.to_path_buf(),
        source,
    })
}
