//! Canonical document form used by the YAML view
//!
//! Objects are re-shaped into `typemeta` / `objectmeta` / body sections with
//! lower-cased struct keys. Keys inside free-form maps (labels, data, resource
//! quantities, managed field sets, ...) are user data and keep their spelling.
//! Every mapping is emitted in sorted key order so repeated calls on the same
//! object are byte-identical.

use serde_json::Value;
use serde_yaml::{Mapping, Value as YamlValue};

/// Fields whose values are maps keyed by user data
const FREEFORM_MAPS: &[&str] = &[
    "labels",
    "annotations",
    "data",
    "stringData",
    "binaryData",
    "matchLabels",
    "nodeSelector",
    "fieldsV1",
    "limits",
    "requests",
    "capacity",
    "allocatable",
    "hard",
    "used",
    "volumeAttributes",
    "parameters",
];

/// Top-level keys that are folded into `typemeta` / `objectmeta`
const META_KEYS: &[&str] = &["apiVersion", "kind", "metadata"];

/// Render `object` as a normalized YAML document.
///
/// `kind` and `api_version` are stamped into `typemeta` regardless of what the
/// object carries. Every name in `list_fields` is emitted as a sequence even
/// when the object omits it.
pub fn to_document(
    object: &Value,
    kind: &str,
    api_version: &str,
    list_fields: &[&str],
) -> Result<String, serde_yaml::Error> {
    let mut doc = Mapping::new();

    let mut type_meta = Mapping::new();
    type_meta.insert("kind".into(), kind.into());
    type_meta.insert("apiversion".into(), api_version.into());
    doc.insert("typemeta".into(), YamlValue::Mapping(type_meta));

    let object_meta = object
        .get("metadata")
        .map(|meta| normalize(meta, false))
        .unwrap_or_else(|| YamlValue::Mapping(Mapping::new()));
    doc.insert("objectmeta".into(), object_meta);

    let mut body: Vec<(String, YamlValue)> = match object.as_object() {
        Some(map) => map
            .iter()
            .filter(|(key, _)| !META_KEYS.contains(&key.as_str()))
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let freeform = FREEFORM_MAPS.contains(&key.as_str());
                (key.to_lowercase(), normalize(value, freeform))
            })
            .collect(),
        None => Vec::new(),
    };
    for field in list_fields {
        let name = field.to_lowercase();
        if !body.iter().any(|(key, _)| *key == name) {
            body.push((name, YamlValue::Sequence(Vec::new())));
        }
    }
    body.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in body {
        doc.insert(key.into(), value);
    }

    serde_yaml::to_string(&YamlValue::Mapping(doc))
}

fn normalize(value: &Value, freeform: bool) -> YamlValue {
    match value {
        Value::Null => YamlValue::Null,
        Value::Bool(b) => YamlValue::Bool(*b),
        Value::Number(n) => number(n),
        Value::String(s) => YamlValue::String(s.clone()),
        Value::Array(items) => {
            YamlValue::Sequence(items.iter().map(|item| normalize(item, false)).collect())
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            // A key that cannot be a field name marks the whole map as user data
            let verbatim = freeform || !keys.iter().all(|key| is_field_name(key));

            let mut out = Mapping::new();
            for key in keys {
                let child_freeform = !verbatim && FREEFORM_MAPS.contains(&key.as_str());
                let name = if verbatim {
                    key.clone()
                } else {
                    key.to_lowercase()
                };
                out.insert(YamlValue::String(name), normalize(&map[key], child_freeform));
            }
            YamlValue::Mapping(out)
        }
    }
}

/// Struct fields are serialized as lowerCamelCase identifiers
fn is_field_name(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn number(n: &serde_json::Number) -> YamlValue {
    if let Some(i) = n.as_i64() {
        YamlValue::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        YamlValue::Number(u.into())
    } else {
        n.as_f64()
            .map(|f| YamlValue::Number(f.into()))
            .unwrap_or(YamlValue::Null)
    }
}
