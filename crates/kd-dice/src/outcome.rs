//! Single-die outcomes and adjustment records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::denomination::DieDenomination;

/// Host symbol metadata for one face of a die.
///
/// Only the label key and image path are interpreted here; everything else
/// the host attaches (symbol counts and the like) is carried through intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceSymbol {
    /// Localization key of the face's display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Path to an image of the face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other host-defined fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FaceSymbol {
    /// Create symbol metadata with a label key and an image path.
    pub fn new(label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            image: Some(image.into()),
            extra: Map::new(),
        }
    }

    /// Attach an additional host field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Marks an outcome whose face was changed by the karma policy.
///
/// Never exists with `original_result == adjusted_result`; use
/// [`AdjustmentRecord::new`] to enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRecord {
    /// Denomination of the adjusted die (`"?"` when the host gave none).
    #[serde(default = "unknown_denomination", deserialize_with = "die_type_or_unknown")]
    pub die_type: DieDenomination,
    /// Face the host rolled.
    pub original_result: u32,
    /// Face after adjustment.
    pub adjusted_result: u32,
}

fn unknown_denomination() -> DieDenomination {
    DieDenomination::Other("?".to_string())
}

fn die_type_or_unknown<'de, D>(deserializer: D) -> Result<DieDenomination, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|tag| !tag.is_empty())
        .map(DieDenomination::from)
        .unwrap_or_else(unknown_denomination))
}

impl AdjustmentRecord {
    /// Build a record, or `None` if the face did not change.
    pub fn new(die_type: DieDenomination, original: u32, adjusted: u32) -> Option<Self> {
        (original != adjusted).then_some(Self {
            die_type,
            original_result: original,
            adjusted_result: adjusted,
        })
    }

    /// True if the record describes an actual change.
    pub fn is_change(&self) -> bool {
        self.original_result != self.adjusted_result
    }
}

/// The result of rolling one die, as the host reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DieOutcome {
    /// Face index, 1-based.
    #[serde(default)]
    pub result: u32,
    /// Symbol metadata for the face.
    #[serde(rename = "ffg", default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<FaceSymbol>,
    /// Present only when the karma policy changed the face.
    #[serde(rename = "karmic", default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<AdjustmentRecord>,
}

impl DieOutcome {
    /// An outcome showing `face`, without symbol metadata.
    pub fn new(face: u32) -> Self {
        Self {
            result: face,
            ..Self::default()
        }
    }

    /// Attach symbol metadata.
    pub fn with_symbol(mut self, symbol: FaceSymbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Read an outcome from host JSON one field at a time.
    ///
    /// Returns `None` only when `value` is not an object. A field that does
    /// not parse is left at its default, so a valid `karmic` record survives
    /// a malformed `result` or `ffg`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            result: obj
                .get("result")
                .and_then(Value::as_u64)
                .and_then(|f| u32::try_from(f).ok())
                .unwrap_or_default(),
            symbol: obj
                .get("ffg")
                .and_then(|v| FaceSymbol::deserialize(v).ok()),
            adjustment: obj
                .get("karmic")
                .and_then(|v| AdjustmentRecord::deserialize(v).ok()),
        })
    }

    /// True if an adjustment record is attached.
    pub fn is_adjusted(&self) -> bool {
        self.adjustment.is_some()
    }

    /// Move this outcome to `adjusted`.
    ///
    /// Overwrites the face, replaces the symbol only when `symbol` is
    /// `Some`, and attaches an [`AdjustmentRecord`]. Does nothing and returns
    /// `false` when `adjusted` equals the current face.
    pub fn adjust(
        &mut self,
        die_type: DieDenomination,
        adjusted: u32,
        symbol: Option<FaceSymbol>,
    ) -> bool {
        let Some(record) = AdjustmentRecord::new(die_type, self.result, adjusted) else {
            return false;
        };
        self.result = adjusted;
        if let Some(symbol) = symbol {
            self.symbol = Some(symbol);
        }
        self.adjustment = Some(record);
        true
    }
}
