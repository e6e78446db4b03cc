//! Raw handle descriptors as they arrive from diagram node records
//!
//! Editor state is loosely typed: a node's `data.handles` (or the older
//! `data.handleIds`) may hold bare id strings, descriptor objects using any of
//! several id field names, or junk. Everything deserializes; junk is kept as
//! [`RawHandle::Other`] and dropped later during normalization.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Id field names accepted on descriptor objects, in lookup order
pub const ID_ALIASES: [&str; 4] = ["id", "handleId", "handle", "handleID"];

/// One entry of a node's raw handle list
#[derive(Debug, Clone, PartialEq)]
pub enum RawHandle {
    /// A bare identifier string
    Id(String),
    /// A descriptor object
    Descriptor(HandleDescriptor),
    /// Anything else (numbers, null, nested arrays)
    Other,
}

/// A descriptor object with its recognized fields extracted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleDescriptor {
    /// Id candidates in [`ID_ALIASES`] order
    pub ids: [Option<String>; 4],
    pub side: Option<String>,
    pub handle_type: Option<String>,
    pub top_pct: Option<f64>,
    pub left_pct: Option<f64>,
}

impl HandleDescriptor {
    /// Descriptor carrying its id in the `id` field
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            ids: [Some(id.into()), None, None, None],
            ..Self::default()
        }
    }

    /// Override the side the handle is drawn on
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self
    }

    /// Override the rendering role (`target` / `source`)
    pub fn with_type(mut self, handle_type: impl Into<String>) -> Self {
        self.handle_type = Some(handle_type.into());
        self
    }

    pub fn with_top_pct(mut self, pct: f64) -> Self {
        self.top_pct = Some(pct);
        self
    }

    pub fn with_left_pct(mut self, pct: f64) -> Self {
        self.left_pct = Some(pct);
        self
    }

    /// First non-empty id among the aliases
    pub fn resolved_id(&self) -> Option<&str> {
        self.ids
            .iter()
            .flatten()
            .map(String::as_str)
            .find(|id| !id.is_empty())
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let string_field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
        let number_field = |key: &str| map.get(key).and_then(Value::as_f64);

        Self {
            ids: ID_ALIASES.map(string_field),
            side: string_field("side"),
            handle_type: string_field("type"),
            top_pct: number_field("topPct"),
            left_pct: number_field("leftPct"),
        }
    }
}

impl RawHandle {
    /// The identifier text this entry names, if any
    pub fn id_text(&self) -> Option<&str> {
        match self {
            RawHandle::Id(id) => Some(id.as_str()).filter(|id| !id.is_empty()),
            RawHandle::Descriptor(d) => d.resolved_id(),
            RawHandle::Other => None,
        }
    }
}

impl From<Value> for RawHandle {
    fn from(value: Value) -> Self {
        match value {
            Value::String(id) => RawHandle::Id(id),
            Value::Object(map) => RawHandle::Descriptor(HandleDescriptor::from_map(&map)),
            _ => RawHandle::Other,
        }
    }
}

impl From<&str> for RawHandle {
    fn from(id: &str) -> Self {
        RawHandle::Id(id.to_string())
    }
}

impl From<HandleDescriptor> for RawHandle {
    fn from(descriptor: HandleDescriptor) -> Self {
        RawHandle::Descriptor(descriptor)
    }
}

impl<'de> Deserialize<'de> for RawHandle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawHandle::from)
    }
}

/// A diagram node record: its type and the data the editor stored for it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub data: Option<NodeData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub handles: Option<Vec<RawHandle>>,
    #[serde(rename = "handleIds", default, deserialize_with = "lenient_list")]
    pub handle_ids: Option<Vec<RawHandle>>,
}

impl NodeRecord {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            data: None,
        }
    }

    /// Attach a `data.handles` list
    pub fn with_handles<I>(mut self, handles: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawHandle>,
    {
        let data = self.data.get_or_insert_with(NodeData::default);
        data.handles = Some(handles.into_iter().map(Into::into).collect());
        self
    }

    /// The node's raw handle list: `data.handles`, else `data.handleIds`
    pub fn raw_handles(&self) -> Option<&[RawHandle]> {
        let data = self.data.as_ref()?;
        data.handles
            .as_deref()
            .or(data.handle_ids.as_deref())
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<RawHandle>>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().map(RawHandle::from).collect()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string_and_descriptor() {
        let handles: Vec<RawHandle> =
            serde_json::from_value(json!(["in-left-1", {"handleId": "out-top-2", "side": "bottom"}]))
                .unwrap();
        assert_eq!(handles[0], RawHandle::Id("in-left-1".to_string()));
        match &handles[1] {
            RawHandle::Descriptor(d) => {
                assert_eq!(d.resolved_id(), Some("out-top-2"));
                assert_eq!(d.side.as_deref(), Some("bottom"));
            }
            other => panic!("expected descriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_order_skips_empty() {
        let raw = RawHandle::from(json!({"id": "", "handle": "in-top-1", "handleID": "in-top-2"}));
        assert_eq!(raw.id_text(), Some("in-top-1"));
    }

    #[test]
    fn test_junk_entries_are_other() {
        let handles: Vec<RawHandle> = serde_json::from_value(json!([3, null, ["x"]])).unwrap();
        assert!(handles.iter().all(|h| *h == RawHandle::Other));
    }

    #[test]
    fn test_non_numeric_pct_ignored() {
        let raw = RawHandle::from(json!({"id": "in-left-1", "topPct": "50", "leftPct": 30}));
        match raw {
            RawHandle::Descriptor(d) => {
                assert_eq!(d.top_pct, None);
                assert_eq!(d.left_pct, Some(30.0));
            }
            other => panic!("expected descriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_node_record_prefers_handles() {
        let node: NodeRecord = serde_json::from_value(json!({
            "type": "encoder",
            "data": {"handles": ["in-left-1"], "handleIds": ["in-left-2"]}
        }))
        .unwrap();
        assert_eq!(node.node_type.as_deref(), Some("encoder"));
        assert_eq!(node.raw_handles().map(|h| h.len()), Some(1));
        assert_eq!(node.raw_handles().unwrap()[0].id_text(), Some("in-left-1"));
    }

    #[test]
    fn test_node_record_falls_back_to_handle_ids() {
        let node: NodeRecord = serde_json::from_value(json!({
            "type": "encoder",
            "data": {"handleIds": ["in-left-2"]}
        }))
        .unwrap();
        assert_eq!(node.raw_handles().unwrap()[0].id_text(), Some("in-left-2"));
    }

    #[test]
    fn test_node_record_tolerates_odd_shapes() {
        let node: NodeRecord = serde_json::from_value(json!({
            "type": 42,
            "data": {"handles": "in-left-1"}
        }))
        .unwrap();
        assert_eq!(node.node_type, None);
        assert!(node.raw_handles().is_none());

        let node: NodeRecord = serde_json::from_value(json!({"type": "router", "data": null})).unwrap();
        assert!(node.raw_handles().is_none());
    }
}
