use serde::Serialize;
use serde_json::{Map, Number, Value};

/// JSON keys of the ocean shipment schema, in response order.
pub const SHIPMENT_FIELD_NAMES: [&str; 8] = [
    "bill_of_lading_number",
    "container_number",
    "consignee_name",
    "consignee_address",
    "date_of_export",
    "line_items_count",
    "average_gross_weight",
    "average_price",
];

const UNKNOWN_MARKERS: [&str; 6] = ["unknown", "n/a", "na", "none", "null", "not found"];

/// A single extracted scalar. Numbers stay numbers on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Number),
    Text(String),
}

impl FieldValue {
    /// Normalises one value from the model reply. Null, blank and
    /// "unknown"-style answers collapse to `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty()
                    || UNKNOWN_MARKERS
                        .iter()
                        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
                {
                    None
                } else {
                    Some(Self::Text(trimmed.to_string()))
                }
            }
            other => Some(Self::Text(other.to_string())),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShipmentFields {
    pub bill_of_lading_number: Option<FieldValue>,
    pub container_number: Option<FieldValue>,
    pub consignee_name: Option<FieldValue>,
    pub consignee_address: Option<FieldValue>,
    pub date_of_export: Option<FieldValue>,
    pub line_items_count: Option<FieldValue>,
    pub average_gross_weight: Option<FieldValue>,
    pub average_price: Option<FieldValue>,
}

impl ShipmentFields {
    /// Reads the schema keys out of a JSON object; everything else is ignored.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).and_then(FieldValue::from_json);

        Self {
            bill_of_lading_number: field("bill_of_lading_number"),
            container_number: field("container_number"),
            consignee_name: field("consignee_name"),
            consignee_address: field("consignee_address"),
            date_of_export: field("date_of_export"),
            line_items_count: field("line_items_count"),
            average_gross_weight: field("average_gross_weight"),
            average_price: field("average_price"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// How the model reply was interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Parsed(ShipmentFields),
    Unparsed { raw_response: String },
}

impl ExtractionOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub fn into_record(self) -> ExtractedRecord {
        match self {
            Self::Parsed(fields) => ExtractedRecord {
                fields,
                raw_response: None,
            },
            Self::Unparsed { raw_response } => ExtractedRecord {
                fields: ShipmentFields::default(),
                raw_response: Some(raw_response),
            },
        }
    }
}

/// Response body: always the eight schema keys, plus `raw_response` when the
/// model reply could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedRecord {
    #[serde(flatten)]
    pub fields: ShipmentFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ExtractedRecord {
    pub fn is_fallback(&self) -> bool {
        self.raw_response.is_some()
    }
}
