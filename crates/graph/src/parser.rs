use crate::error::{GraphError, Result};
use crate::records::{value_kind, ChildDescriptor, ChildrenPayload};
use crate::sanitize::decode_quasi_json;
use serde_json::Value;

/// Descriptors decoded from one `children` payload
#[derive(Debug, Default)]
pub struct ParsedChildren {
    pub descriptors: Vec<ChildDescriptor>,
    /// The whole payload was dropped (undecodable or unsupported type)
    pub dropped: bool,
    /// List items that were not descriptor objects
    pub malformed_items: usize,
}

/// Decode a payload into raw list items without logging
pub fn decode_payload(payload: ChildrenPayload) -> Result<Vec<Value>> {
    match payload {
        ChildrenPayload::Text(raw) => Ok(decode_quasi_json(&raw)?),
        ChildrenPayload::List(items) => Ok(items),
        ChildrenPayload::Unsupported(kind) => Err(GraphError::UnsupportedPayload(kind)),
    }
}

/// Decode the children of `parent_id`.
///
/// Failures never propagate: the payload (or the offending item) is logged
/// and dropped so that siblings and ancestors are unaffected.
#[must_use]
pub fn parse_children(parent_id: &str, payload: ChildrenPayload) -> ParsedChildren {
    let raw = match &payload {
        ChildrenPayload::Text(raw) => Some(raw.clone()),
        _ => None,
    };

    let items = match decode_payload(payload) {
        Ok(items) => items,
        Err(err) => {
            match raw {
                Some(raw) => log::warn!(
                    "Could not parse children text {raw:?} for parent '{parent_id}': {err}"
                ),
                None => log::warn!("Ignoring children of parent '{parent_id}': {err}"),
            }
            return ParsedChildren {
                dropped: true,
                ..ParsedChildren::default()
            };
        }
    };

    let mut parsed = ParsedChildren::default();
    for item in items {
        if !item.is_object() {
            log::warn!(
                "Skipping child of parent '{parent_id}': expected an object, found {}",
                value_kind(&item)
            );
            parsed.malformed_items += 1;
            continue;
        }
        match serde_json::from_value::<ChildDescriptor>(item) {
            Ok(descriptor) => parsed.descriptors.push(descriptor),
            Err(err) => {
                log::warn!("Skipping malformed child of parent '{parent_id}': {err}");
                parsed.malformed_items += 1;
            }
        }
    }
    parsed
}
