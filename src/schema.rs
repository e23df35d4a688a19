//! Field descriptors for each level of the device schema.
//!
//! A level is a static slice of [`FieldSpec`]s. Decoding looks each source key up in the
//! slice (a miss is [`JsonError::UnknownKey`]) and hands the value to the field's kind;
//! encoding walks the slice in declaration order and emits every non-default field. The
//! slice order is therefore the key order of encoded output.

use crate::codec::{Context, JsonError};
use crate::device::{BlockDevs, BootUi, Device};
use crate::flags::{flag_names, NamedEnum};
use crate::value::{as_i32, JsonType};
use serde_json::{Map, Value};

type DecodeFn<T> = fn(&mut T, &Value, &Context) -> Result<(), JsonError>;
type EncodeFn<T> = fn(&T) -> Option<Value>;

/// Expected JSON type of a field plus how to reach it in `T`.
pub(crate) enum FieldKind<T> {
    /// `true` is emitted, `false` is the default.
    Bool(fn(&T) -> &bool, fn(&mut T) -> &mut bool),
    /// Zero is the default.
    Int(fn(&T) -> &i32, fn(&mut T) -> &mut i32),
    /// `None` is the default; any integer, including zero, is emitted.
    OptInt(fn(&T) -> &Option<i32>, fn(&mut T) -> &mut Option<i32>),
    Str(fn(&T) -> &String, fn(&mut T) -> &mut String),
    StrList(fn(&T) -> &Vec<String>, fn(&mut T) -> &mut Vec<String>),
    /// Lookup-table values and nested objects.
    Custom(DecodeFn<T>, EncodeFn<T>),
}

pub(crate) struct FieldSpec<T> {
    pub key: &'static str,
    pub kind: FieldKind<T>,
}

impl<T> FieldKind<T> {
    fn decode(&self, target: &mut T, node: &Value, context: &Context) -> Result<(), JsonError> {
        match self {
            FieldKind::Bool(_, slot) => {
                *slot(target) = node
                    .as_bool()
                    .ok_or_else(|| JsonError::mismatched(context, JsonType::Boolean, node))?;
            }
            FieldKind::Int(_, slot) => {
                *slot(target) = decode_int(node, context)?;
            }
            FieldKind::OptInt(_, slot) => {
                *slot(target) = Some(decode_int(node, context)?);
            }
            FieldKind::Str(_, slot) => {
                *slot(target) = decode_string(node, context)?;
            }
            FieldKind::StrList(_, slot) => {
                *slot(target) = decode_string_array(node, context)?;
            }
            FieldKind::Custom(decode, _) => decode(target, node, context)?,
        }
        Ok(())
    }

    fn encode(&self, source: &T) -> Option<Value> {
        match self {
            FieldKind::Bool(get, _) => get(source).then_some(Value::Bool(true)),
            FieldKind::Int(get, _) => {
                let v = *get(source);
                (v != 0).then(|| Value::from(v))
            }
            FieldKind::OptInt(get, _) => get(source).map(Value::from),
            FieldKind::Str(get, _) => {
                let s = get(source);
                (!s.is_empty()).then(|| Value::String(s.clone()))
            }
            FieldKind::StrList(get, _) => encode_string_array(get(source)),
            FieldKind::Custom(_, encode) => encode(source),
        }
    }
}

/// Decode `node` as an object whose keys must all appear in `fields`.
pub(crate) fn decode_object<T>(
    target: &mut T,
    node: &Value,
    context: &Context,
    fields: &[FieldSpec<T>],
) -> Result<(), JsonError> {
    let object = node
        .as_object()
        .ok_or_else(|| JsonError::mismatched(context, JsonType::Object, node))?;
    for (key, value) in object {
        let subcontext = context.key(key);
        let field = fields
            .iter()
            .find(|f| f.key == key.as_str())
            .ok_or_else(|| JsonError::unknown_key(&subcontext))?;
        tracing::trace!(context = %subcontext, "decoding field");
        field.kind.decode(target, value, &subcontext)?;
    }
    Ok(())
}

/// Emit every non-default field of `source`, in `fields` order.
pub(crate) fn encode_object<T>(source: &T, fields: &[FieldSpec<T>]) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        if let Some(value) = field.kind.encode(source) {
            out.insert(field.key.to_string(), value);
        }
    }
    out
}

fn decode_int(node: &Value, context: &Context) -> Result<i32, JsonError> {
    as_i32(node).ok_or_else(|| JsonError::mismatched(context, JsonType::Integer, node))
}

fn decode_string(node: &Value, context: &Context) -> Result<String, JsonError> {
    node.as_str()
        .map(str::to_owned)
        .ok_or_else(|| JsonError::mismatched(context, JsonType::String, node))
}

/// Visit each element of a string array with its indexed context.
fn for_each_string<'a>(
    node: &'a Value,
    context: &Context,
    mut f: impl FnMut(&'a str, &Context) -> Result<(), JsonError>,
) -> Result<(), JsonError> {
    let items = node
        .as_array()
        .ok_or_else(|| JsonError::mismatched(context, JsonType::Array, node))?;
    for (i, item) in items.iter().enumerate() {
        let subcontext = context.index(i);
        let s = item
            .as_str()
            .ok_or_else(|| JsonError::mismatched(&subcontext, JsonType::String, item))?;
        f(s, &subcontext)?;
    }
    Ok(())
}

fn decode_string_array(node: &Value, context: &Context) -> Result<Vec<String>, JsonError> {
    let mut out = Vec::new();
    for_each_string(node, context, |s, _| {
        out.push(s.to_owned());
        Ok(())
    })?;
    Ok(out)
}

fn encode_string_array(items: &[String]) -> Option<Value> {
    if items.is_empty() {
        return None;
    }
    Some(Value::Array(items.iter().cloned().map(Value::String).collect()))
}

/// OR together the named bits of a string array. Duplicates are harmless.
fn decode_flags<F: bitflags::Flags>(node: &Value, context: &Context) -> Result<F, JsonError> {
    let mut flags = F::empty();
    for_each_string(node, context, |s, subcontext| {
        let bit = F::from_name(s).ok_or_else(|| JsonError::unknown_value(subcontext))?;
        flags.insert(bit);
        Ok(())
    })?;
    Ok(flags)
}

fn encode_flags<F: bitflags::Flags>(flags: &F) -> Option<Value> {
    let names = flag_names(flags);
    if names.is_empty() {
        return None;
    }
    Some(Value::Array(names.into_iter().map(Value::from).collect()))
}

fn decode_named<E: NamedEnum>(node: &Value, context: &Context) -> Result<E, JsonError> {
    let s = node
        .as_str()
        .ok_or_else(|| JsonError::mismatched(context, JsonType::String, node))?;
    E::from_name(s).ok_or_else(|| JsonError::unknown_value(context))
}

fn encode_named<E: NamedEnum + Default>(value: E) -> Option<Value> {
    (value != E::default()).then(|| Value::from(value.name()))
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    (!map.is_empty()).then_some(Value::Object(map))
}

pub(crate) static DEVICE_FIELDS: &[FieldSpec<Device>] = &[
    FieldSpec {
        key: "id",
        kind: FieldKind::Str(|d| &d.id, |d| &mut d.id),
    },
    FieldSpec {
        key: "codenames",
        kind: FieldKind::StrList(|d| &d.codenames, |d| &mut d.codenames),
    },
    FieldSpec {
        key: "name",
        kind: FieldKind::Str(|d| &d.name, |d| &mut d.name),
    },
    FieldSpec {
        key: "architecture",
        kind: FieldKind::Str(|d| &d.architecture, |d| &mut d.architecture),
    },
    FieldSpec {
        key: "flags",
        kind: FieldKind::Custom(
            |d, node, context| {
                d.flags = decode_flags(node, context)?;
                Ok(())
            },
            |d| encode_flags(&d.flags),
        ),
    },
    FieldSpec {
        key: "block_devs",
        kind: FieldKind::Custom(
            |d, node, context| decode_object(&mut d.block_devs, node, context, BLOCK_DEV_FIELDS),
            |d| non_empty(encode_object(&d.block_devs, BLOCK_DEV_FIELDS)),
        ),
    },
    FieldSpec {
        key: "boot_ui",
        kind: FieldKind::Custom(
            |d, node, context| decode_object(&mut d.boot_ui, node, context, BOOT_UI_FIELDS),
            |d| non_empty(encode_object(&d.boot_ui, BOOT_UI_FIELDS)),
        ),
    },
];

pub(crate) static BLOCK_DEV_FIELDS: &[FieldSpec<BlockDevs>] = &[
    FieldSpec {
        key: "base_dirs",
        kind: FieldKind::StrList(|b| &b.base_dirs, |b| &mut b.base_dirs),
    },
    FieldSpec {
        key: "system",
        kind: FieldKind::StrList(|b| &b.system, |b| &mut b.system),
    },
    FieldSpec {
        key: "cache",
        kind: FieldKind::StrList(|b| &b.cache, |b| &mut b.cache),
    },
    FieldSpec {
        key: "data",
        kind: FieldKind::StrList(|b| &b.data, |b| &mut b.data),
    },
    FieldSpec {
        key: "boot",
        kind: FieldKind::StrList(|b| &b.boot, |b| &mut b.boot),
    },
    FieldSpec {
        key: "recovery",
        kind: FieldKind::StrList(|b| &b.recovery, |b| &mut b.recovery),
    },
    FieldSpec {
        key: "extra",
        kind: FieldKind::StrList(|b| &b.extra, |b| &mut b.extra),
    },
];

pub(crate) static BOOT_UI_FIELDS: &[FieldSpec<BootUi>] = &[
    FieldSpec {
        key: "supported",
        kind: FieldKind::Bool(|t| &t.supported, |t| &mut t.supported),
    },
    FieldSpec {
        key: "flags",
        kind: FieldKind::Custom(
            |t, node, context| {
                t.flags = decode_flags(node, context)?;
                Ok(())
            },
            |t| encode_flags(&t.flags),
        ),
    },
    FieldSpec {
        key: "pixel_format",
        kind: FieldKind::Custom(
            |t, node, context| {
                t.pixel_format = decode_named(node, context)?;
                Ok(())
            },
            |t| encode_named(t.pixel_format),
        ),
    },
    FieldSpec {
        key: "force_pixel_format",
        kind: FieldKind::Custom(
            |t, node, context| {
                t.force_pixel_format = decode_named(node, context)?;
                Ok(())
            },
            |t| encode_named(t.force_pixel_format),
        ),
    },
    FieldSpec {
        key: "overscan_percent",
        kind: FieldKind::Int(|t| &t.overscan_percent, |t| &mut t.overscan_percent),
    },
    FieldSpec {
        key: "default_x_offset",
        kind: FieldKind::Int(|t| &t.default_x_offset, |t| &mut t.default_x_offset),
    },
    FieldSpec {
        key: "default_y_offset",
        kind: FieldKind::Int(|t| &t.default_y_offset, |t| &mut t.default_y_offset),
    },
    FieldSpec {
        key: "brightness_path",
        kind: FieldKind::Str(|t| &t.brightness_path, |t| &mut t.brightness_path),
    },
    FieldSpec {
        key: "secondary_brightness_path",
        kind: FieldKind::Str(
            |t| &t.secondary_brightness_path,
            |t| &mut t.secondary_brightness_path,
        ),
    },
    FieldSpec {
        key: "max_brightness",
        kind: FieldKind::OptInt(|t| &t.max_brightness, |t| &mut t.max_brightness),
    },
    FieldSpec {
        key: "default_brightness",
        kind: FieldKind::OptInt(|t| &t.default_brightness, |t| &mut t.default_brightness),
    },
    FieldSpec {
        key: "battery_path",
        kind: FieldKind::Str(|t| &t.battery_path, |t| &mut t.battery_path),
    },
    FieldSpec {
        key: "cpu_temp_path",
        kind: FieldKind::Str(|t| &t.cpu_temp_path, |t| &mut t.cpu_temp_path),
    },
    FieldSpec {
        key: "input_blacklist",
        kind: FieldKind::Str(|t| &t.input_blacklist, |t| &mut t.input_blacklist),
    },
    FieldSpec {
        key: "input_whitelist",
        kind: FieldKind::Str(|t| &t.input_whitelist, |t| &mut t.input_whitelist),
    },
    FieldSpec {
        key: "graphics_backends",
        kind: FieldKind::StrList(|t| &t.graphics_backends, |t| &mut t.graphics_backends),
    },
    FieldSpec {
        key: "theme",
        kind: FieldKind::Str(|t| &t.theme, |t| &mut t.theme),
    },
];
