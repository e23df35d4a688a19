//! Batch compiler tests: YAML files on disk through decode, validation and rendering.

use devprofile::compile::write_output;
use devprofile::{compile_file, compile_files, decode_list, render, CompileError, OutputStyle};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HLTE: &str = "\
id: hlte
codenames:
  - hlte
  - hltexx
name: Samsung Galaxy Note 3
architecture: armeabi-v7a
block_devs:
  base_dirs:
    - /dev/block/platform/msm_sdcc.1/by-name
  system: [/dev/block/platform/msm_sdcc.1/by-name/system]
  cache: [/dev/block/platform/msm_sdcc.1/by-name/cache]
  data: [/dev/block/platform/msm_sdcc.1/by-name/userdata]
  boot: [/dev/block/platform/msm_sdcc.1/by-name/boot]
boot_ui:
  supported: true
  flags: [TW_QCOM_RTC_FIX, TW_NO_SCREEN_TIMEOUT]
  pixel_format: RGBX_8888
  max_brightness: 255
  graphics_backends: [fbdev]
  theme: portrait_hdpi
";

fn device_yaml(id: &str) -> String {
    format!(
        "id: {id}\ncodenames: [{id}]\nname: Device {id}\narchitecture: arm64-v8a\n\
         block_devs:\n  system: [/s]\n  cache: [/c]\n  data: [/d]\n  boot: [/b]\n"
    )
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn test_compile_single_device() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "hlte.yml", HLTE);

    let devices = compile_file(&path).expect("compile");
    assert_eq!(devices.len(), 1);
    let d = &devices[0];
    assert_eq!(d.id, "hlte");
    assert_eq!(d.codenames, vec!["hlte".to_string(), "hltexx".to_string()]);
    assert_eq!(d.boot_ui.max_brightness, Some(255));
    assert!(d.is_valid());
}

#[test]
fn test_compile_files_in_order_and_flattens_lists() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", &device_yaml("alpha"));
    let list = format!(
        "- {}\n- {}\n",
        device_yaml("beta").replace('\n', "\n  ").trim_end(),
        device_yaml("gamma").replace('\n', "\n  ").trim_end()
    );
    let b = write(&dir, "b.yml", &list);
    let c = write(&dir, "c.yml", &device_yaml("delta"));

    let devices = compile_files(&[c, a, b]).expect("compile");
    let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["delta", "alpha", "beta", "gamma"]);
}

#[test]
fn test_no_inputs_renders_empty_array() {
    let devices = compile_files::<PathBuf>(&[]).unwrap();
    assert!(devices.is_empty());
    assert_eq!(render(&devices, OutputStyle::Compact), "[]\n");
}

#[test]
fn test_decode_error_names_file_and_context() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.yml", HLTE);
    let bad = write(&dir, "bad.yml", "id: x\nfoo: bar\n");

    let err = compile_files(&[good, bad.clone()]).unwrap_err();
    assert!(matches!(err, CompileError::Json { .. }), "{:?}", err);
    let msg = err.to_string();
    assert!(msg.starts_with(&bad.display().to_string()), "{}", msg);
    assert!(msg.ends_with("Unknown key at .foo"), "{}", msg);
}

#[test]
fn test_yaml_key_order_decides_first_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "order.yml", "zzz: 1\nid: 5\n");
    let err = compile_file(&path).unwrap_err();
    assert!(err.to_string().ends_with("Unknown key at .zzz"), "{}", err);
}

#[test]
fn test_validation_failure_aborts() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "partial.yml", "id: partial\nname: Partial\n");

    let err = compile_file(&path).unwrap_err();
    match &err {
        CompileError::Validation { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0, "partial");
            assert!(!failures[0].1.is_empty());
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    let msg = err.to_string();
    assert!(msg.contains("[partial] Error during validation (0xfa):"), "{}", msg);
    assert!(msg.contains("\n- Missing device codenames"), "{}", msg);
    assert!(msg.contains("\n- Missing boot block device paths"), "{}", msg);
}

#[test]
fn test_every_invalid_list_entry_is_reported() {
    let dir = TempDir::new().unwrap();
    let list = format!(
        "- id: a\n- {}\n- id: b\n",
        device_yaml("ok").replace('\n', "\n  ").trim_end()
    );
    let path = write(&dir, "list.yml", &list);

    let err = compile_file(&path).unwrap_err();
    match &err {
        CompileError::Validation { failures, .. } => {
            let ids: Vec<&str> = failures.iter().map(|(id, _)| id.as_str()).collect();
            assert_eq!(ids, ["a", "b"]);
            assert!(failures.iter().all(|(_, flags)| flags.bits() == 0xfe));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    let msg = err.to_string();
    let prefix = path.display().to_string();
    assert!(msg.starts_with(&format!("{}: [a] Error during validation (0xfe):", prefix)), "{}", msg);
    assert!(msg.contains(&format!("\n{}: [b] Error during validation (0xfe):", prefix)), "{}", msg);
    assert!(!msg.contains("[ok]"), "{}", msg);
}

#[test]
fn test_yaml_11_booleans() {
    let dir = TempDir::new().unwrap();
    let yaml = HLTE.replace("supported: true", "supported: yes");
    let path = write(&dir, "yes.yml", &yaml);
    let devices = compile_file(&path).expect("compile");
    assert!(devices[0].boot_ui.supported);

    let yaml = HLTE.replace("supported: true", "supported: Off");
    let path = write(&dir, "off.yml", &yaml);
    let devices = compile_file(&path).expect("compile");
    assert!(!devices[0].boot_ui.supported);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = compile_file(&dir.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }), "{:?}", err);
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_malformed_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.yml", "id: [unclosed\n");
    let err = compile_file(&path).unwrap_err();
    assert!(matches!(err, CompileError::Yaml { .. }), "{:?}", err);
}

#[test]
fn test_render_styles() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "hlte.yml", HLTE);
    let devices = compile_file(&path).unwrap();

    let compact = render(&devices, OutputStyle::Compact);
    assert!(compact.starts_with(r#"[{"id":"hlte","codenames":["hlte","hltexx"]"#), "{}", compact);
    assert_eq!(compact.matches('\n').count(), 1);
    assert!(compact.contains(r#""flags":["TW_NO_SCREEN_TIMEOUT","TW_QCOM_RTC_FIX"]"#));

    let styled = render(&devices, OutputStyle::Styled);
    assert!(styled.lines().count() > 10);
    assert!(styled.ends_with("]\n"));

    assert_eq!(decode_list(&compact).unwrap(), devices);
    assert_eq!(decode_list(&styled).unwrap(), devices);
}

#[test]
fn test_write_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("devices.json");
    write_output(&out, "[]\n").unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "[]\n");

    let err = write_output(&dir.path().join("missing/dir/devices.json"), "[]\n").unwrap_err();
    assert!(matches!(err, CompileError::Output { .. }), "{:?}", err);
}
