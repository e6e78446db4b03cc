//! Handle identity: `{kind}-{side}-{index}` connection point names

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HandleIdError;

use super::grammar;

/// Largest index a handle identifier can carry (nineteen decimal digits)
pub const MAX_INDEX: u64 = 9_999_999_999_999_999_999;

/// Direction role of a handle in storage form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    In,
    Out,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::In => "in",
            Kind::Out => "out",
        }
    }

    /// Look up a kind by its exact storage name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "in" => Some(Kind::In),
            "out" => Some(Kind::Out),
            _ => None,
        }
    }

    /// Rendering-form role for this kind (in ↔ target, out ↔ source)
    pub fn handle_type(self) -> HandleType {
        match self {
            Kind::In => HandleType::Target,
            Kind::Out => HandleType::Source,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction role of a handle in rendering form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleType {
    Target,
    Source,
}

impl HandleType {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleType::Target => "target",
            HandleType::Source => "source",
        }
    }

    /// Look up a type by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "target" => Some(HandleType::Target),
            "source" => Some(HandleType::Source),
            _ => None,
        }
    }

    /// Case-insensitive lookup used for editor-supplied overrides
    pub fn parse_loose(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_lowercase())
    }

    pub fn kind(self) -> Kind {
        match self {
            HandleType::Target => Kind::In,
            HandleType::Source => Kind::Out,
        }
    }
}

impl fmt::Display for HandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge of a node's bounding box a handle sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    /// Look up a side by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            "top" => Some(Side::Top),
            "bottom" => Some(Side::Bottom),
            _ => None,
        }
    }

    /// Case-insensitive, whitespace-tolerant lookup for editor and renderer input
    pub fn parse_loose(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_lowercase())
    }

    /// Ordering rank when listing handles: top, right, bottom, left
    pub fn precedence(self) -> u8 {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    /// Whether handles on this side are spread along the x axis (`leftPct`)
    /// rather than the y axis (`topPct`)
    pub fn spreads_horizontally(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connection point identifier: `(kind, side, index)`
///
/// The canonical text `"{kind}-{side}-{index}"` (e.g. `out-right-3`) is the
/// only valid encoding. `Display` produces it and `FromStr` accepts nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub kind: Kind,
    pub side: Side,
    pub index: u64,
}

impl HandleId {
    /// Strict construction: rejects indices outside `1..=MAX_INDEX`
    pub fn new(kind: Kind, side: Side, index: u64) -> Result<Self, HandleIdError> {
        if index == 0 || index > MAX_INDEX {
            return Err(HandleIdError::IndexOutOfRange { index });
        }
        Ok(Self { kind, side, index })
    }

    /// Lenient parse: `None` for anything that is not canonical handle text
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Repair-and-construct from loosely-typed editor state.
    ///
    /// - `kind`: `target` → `in`, `source` → `out`; anything else that is not
    ///   `in`/`out` becomes `out`
    /// - `side`: lower-cased; anything that is not a side becomes `right`
    /// - `index`: anything that does not coerce to a positive integer becomes `1`
    pub fn repair(kind: &str, side: &str, index: impl Into<LooseIndex>) -> Self {
        let kind = match kind {
            "target" => Kind::In,
            "source" => Kind::Out,
            other => Kind::from_name(other).unwrap_or(Kind::Out),
        };
        let side = Side::from_name(&side.to_lowercase()).unwrap_or(Side::Right);
        let index = index.into().coerce().unwrap_or(1);
        Self { kind, side, index }
    }

    /// Rendering-form role of this handle
    pub fn handle_type(&self) -> HandleType {
        self.kind.handle_type()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.kind, self.side, self.index)
    }
}

impl FromStr for HandleId {
    type Err = HandleIdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        grammar::parse(text)
    }
}

impl Serialize for HandleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HandleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A handle index as found in loosely-typed editor state
#[derive(Debug, Clone, PartialEq)]
pub enum LooseIndex {
    Int(i128),
    Float(f64),
    Text(String),
    Missing,
}

impl LooseIndex {
    /// Coerce to a usable handle index, if the value denotes one
    ///
    /// Integers must lie in `1..=MAX_INDEX`; floats must additionally be finite
    /// and integral; text is trimmed and read as a decimal number.
    pub fn coerce(&self) -> Option<u64> {
        match self {
            LooseIndex::Int(n) => u64::try_from(*n)
                .ok()
                .filter(|n| (1..=MAX_INDEX).contains(n)),
            LooseIndex::Float(f) => coerce_float(*f),
            LooseIndex::Text(s) => {
                let s = s.trim();
                match s.parse::<u64>() {
                    Ok(n) => Some(n).filter(|n| (1..=MAX_INDEX).contains(n)),
                    Err(_) => s.parse::<f64>().ok().and_then(coerce_float),
                }
            }
            LooseIndex::Missing => None,
        }
    }
}

fn coerce_float(f: f64) -> Option<u64> {
    // MAX_INDEX rounds up to 1e19 as f64, so the bound is exclusive
    if f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f < MAX_INDEX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

impl From<i64> for LooseIndex {
    fn from(n: i64) -> Self {
        LooseIndex::Int(n.into())
    }
}

impl From<u64> for LooseIndex {
    fn from(n: u64) -> Self {
        LooseIndex::Int(n.into())
    }
}

impl From<i32> for LooseIndex {
    fn from(n: i32) -> Self {
        LooseIndex::Int(n.into())
    }
}

impl From<u32> for LooseIndex {
    fn from(n: u32) -> Self {
        LooseIndex::Int(n.into())
    }
}

impl From<usize> for LooseIndex {
    fn from(n: usize) -> Self {
        i128::try_from(n).map_or(LooseIndex::Missing, LooseIndex::Int)
    }
}

impl From<f64> for LooseIndex {
    fn from(f: f64) -> Self {
        LooseIndex::Float(f)
    }
}

impl From<&str> for LooseIndex {
    fn from(s: &str) -> Self {
        LooseIndex::Text(s.to_string())
    }
}

impl From<String> for LooseIndex {
    fn from(s: String) -> Self {
        LooseIndex::Text(s)
    }
}

impl<T: Into<LooseIndex>> From<Option<T>> for LooseIndex {
    fn from(value: Option<T>) -> Self {
        value.map_or(LooseIndex::Missing, Into::into)
    }
}

impl From<&serde_json::Value> for LooseIndex {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    LooseIndex::Int(i.into())
                } else if let Some(u) = n.as_u64() {
                    LooseIndex::Int(u.into())
                } else {
                    n.as_f64().map_or(LooseIndex::Missing, LooseIndex::Float)
                }
            }
            serde_json::Value::String(s) => LooseIndex::Text(s.clone()),
            _ => LooseIndex::Missing,
        }
    }
}
