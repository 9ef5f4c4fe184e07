use crate::types::{EntityAttrs, OwnershipAttrs};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Graph key for a record: `eid` when present and non-empty, otherwise `name`.
///
/// Values are compared verbatim, nothing is trimmed or case-folded.
#[must_use]
pub fn resolve_id<'a>(eid: Option<&'a str>, name: &'a str) -> &'a str {
    match eid {
        Some(eid) if !eid.is_empty() => eid,
        _ => name,
    }
}

/// Nested subsidiary entry inside a `children` field.
///
/// Every scalar is optional. Strings are kept verbatim, numbers and booleans
/// are rendered as text and `null` counts as absent. Absent attributes become
/// empty strings on the graph.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChildDescriptor {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub eid: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub entity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub percent: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sh_type: Option<String>,
    /// Quasi-structured text or an already decoded list
    #[serde(default)]
    pub children: Option<Value>,
}

impl ChildDescriptor {
    /// Name if present and non-empty
    #[must_use]
    pub fn usable_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Resolved graph key, `None` when the record has no usable name
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.usable_name()
            .map(|name| resolve_id(self.eid.as_deref(), name))
    }

    #[must_use]
    pub fn entity_attrs(&self) -> EntityAttrs {
        EntityAttrs {
            name: text(&self.name),
            entity_type: text(&self.entity_type),
            short_name: text(&self.short_name),
            level: text(&self.level),
        }
    }

    #[must_use]
    pub fn ownership_attrs(&self) -> OwnershipAttrs {
        OwnershipAttrs {
            amount: text(&self.amount),
            percent: text(&self.percent),
            sh_type: text(&self.sh_type),
        }
    }

    /// Move the nested children out, `None` when there are none
    pub fn take_children(&mut self) -> Option<ChildrenPayload> {
        self.children.take().and_then(ChildrenPayload::from_value)
    }
}

/// One input row: an entity, its optional owner and its nested children
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwnershipRecord {
    #[serde(flatten)]
    pub entity: ChildDescriptor,
    #[serde(default, deserialize_with = "lenient_text")]
    pub parent_id: Option<String>,
}

impl OwnershipRecord {
    #[must_use]
    pub fn usable_name(&self) -> Option<&str> {
        self.entity.usable_name()
    }

    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.entity.entity_id()
    }

    #[must_use]
    pub fn entity_attrs(&self) -> EntityAttrs {
        self.entity.entity_attrs()
    }

    #[must_use]
    pub fn ownership_attrs(&self) -> OwnershipAttrs {
        self.entity.ownership_attrs()
    }

    /// Owning entity id if present and non-empty
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        non_empty(self.parent_id.as_deref())
    }

    #[must_use]
    pub fn children_payload(&self) -> Option<ChildrenPayload> {
        self.entity
            .children
            .clone()
            .and_then(ChildrenPayload::from_value)
    }
}

/// Raw `children` field, classified before decoding
#[derive(Debug, Clone, PartialEq)]
pub enum ChildrenPayload {
    /// Quasi-structured text that still needs sanitizing
    Text(String),
    /// Already decoded list of descriptor values
    List(Vec<Value>),
    /// Any other non-empty value, carrying its JSON kind
    Unsupported(&'static str),
}

impl ChildrenPayload {
    /// Classify a field value. `null`, `""`, `"[]"` and `[]` mean there are
    /// no children; any other value that is neither text nor a list is
    /// [`Unsupported`](Self::Unsupported) and gets reported by the parser.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) if text.is_empty() || text == "[]" => None,
            Value::String(text) => Some(Self::Text(text)),
            Value::Array(items) if items.is_empty() => None,
            Value::Array(items) => Some(Self::List(items)),
            other => Some(Self::Unsupported(value_kind(&other))),
        }
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
