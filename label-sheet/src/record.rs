//! Product records and the defaults drawn for missing or malformed fields.

use crate::barcode;
use crate::config::{MalformedPolicy, SheetConfig};
use crate::error::{LabelError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown Product";
pub const DEFAULT_PRICE: &str = "0.00";
pub const MISSING_EXPIRY: &str = "N/A";

/// Price as captured upstream: a number, text still to be parsed, or any
/// other JSON value, which never parses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Text(String),
    Other(Value),
}

/// Barcode payload as captured upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum UpcValue {
    Code(String),
    /// A JSON value that is neither text nor a number.
    Invalid(Value),
}

impl From<&str> for UpcValue {
    fn from(code: &str) -> Self {
        UpcValue::Code(code.to_string())
    }
}

impl From<String> for UpcValue {
    fn from(code: String) -> Self {
        UpcValue::Code(code)
    }
}

/// One product as supplied by the catalog.
///
/// Deserialization never fails on a field's JSON type; unusable values are
/// kept and judged by [`ProductRecord::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default)]
    pub price: Option<PriceValue>,
    #[serde(default, deserialize_with = "upc_value")]
    pub upc: Option<UpcValue>,
    #[serde(
        default,
        alias = "expirationDate",
        alias = "expiry",
        deserialize_with = "optional_text"
    )]
    pub expiration_date: Option<String>,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, price: f64, upc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: Some(PriceValue::Amount(price)),
            upc: Some(UpcValue::Code(upc.into())),
            expiration_date: None,
        }
    }

    pub fn with_expiry(mut self, expiry: impl Into<String>) -> Self {
        self.expiration_date = Some(expiry.into());
        self
    }

    /// Resolve every field to the text drawn on the label, applying the
    /// documented defaults. Under [`MalformedPolicy::Reject`] a price or UPC
    /// that is present but unusable fails with the record's index.
    pub fn resolve(&self, index: usize, config: &SheetConfig) -> Result<LabelText> {
        let policy = config.malformed_policy;
        let mut substitutions = Vec::new();

        let name = match self.name.trim() {
            "" => {
                substitutions.push(Substitution::new("name", &self.name));
                UNKNOWN_NAME.to_string()
            }
            name => name.to_string(),
        };

        let price = match &self.price {
            None => {
                substitutions.push(Substitution::new("price", ""));
                DEFAULT_PRICE.to_string()
            }
            Some(value) => match parse_price(value, &config.currency_symbol) {
                Some(amount) => format!("{:.2}", amount),
                None => {
                    let raw = value.to_string();
                    if raw.trim().is_empty() {
                        substitutions.push(Substitution::new("price", &raw));
                    } else {
                        unusable(index, "price", raw, policy, &mut substitutions)?;
                    }
                    DEFAULT_PRICE.to_string()
                }
            },
        };

        let upc = match &self.upc {
            None => {
                substitutions.push(Substitution::new("upc", ""));
                barcode::PLACEHOLDER_PAYLOAD.to_string()
            }
            Some(UpcValue::Code(code)) => match code.trim() {
                "" => {
                    substitutions.push(Substitution::new("upc", code));
                    barcode::PLACEHOLDER_PAYLOAD.to_string()
                }
                code if barcode::is_encodable(code) => code.to_string(),
                code => {
                    unusable(index, "upc", code.to_string(), policy, &mut substitutions)?;
                    barcode::PLACEHOLDER_PAYLOAD.to_string()
                }
            },
            Some(UpcValue::Invalid(value)) => {
                unusable(index, "upc", value.to_string(), policy, &mut substitutions)?;
                barcode::PLACEHOLDER_PAYLOAD.to_string()
            }
        };

        let expiry = match self.expiration_date.as_deref().map(str::trim) {
            None | Some("") => MISSING_EXPIRY.to_string(),
            Some(expiry) => expiry.to_string(),
        };

        for substitution in &substitutions {
            tracing::warn!(
                record = index,
                field = substitution.field,
                value = %substitution.value,
                "substituted default for unusable field"
            );
        }

        Ok(LabelText {
            name,
            price,
            upc,
            expiry,
            substitutions,
        })
    }
}

/// A field value that is present but cannot be drawn: fail under
/// [`MalformedPolicy::Reject`], otherwise record the substitution.
fn unusable(
    index: usize,
    field: &'static str,
    value: String,
    policy: MalformedPolicy,
    substitutions: &mut Vec<Substitution>,
) -> Result<()> {
    if policy == MalformedPolicy::Reject {
        return Err(LabelError::MalformedRecord {
            index,
            field,
            value,
        });
    }
    substitutions.push(Substitution { field, value });
    Ok(())
}

/// A field that was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub field: &'static str,
    pub value: String,
}

impl Substitution {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// The text a slot draws for one record, defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelText {
    pub name: String,
    /// Two-decimal amount without currency symbol.
    pub price: String,
    pub upc: String,
    pub expiry: String,
    pub substitutions: Vec<Substitution>,
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceValue::Amount(amount) => write!(f, "{}", amount),
            PriceValue::Text(text) => f.write_str(text),
            PriceValue::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Numeric amount of `value`. Text may carry `currency` before or after the
/// number.
fn parse_price(value: &PriceValue, currency: &str) -> Option<f64> {
    let amount = match value {
        PriceValue::Amount(amount) => *amount,
        PriceValue::Text(text) => {
            let text = text.trim();
            let text = match currency {
                "" => text,
                symbol => text
                    .strip_prefix(symbol)
                    .or_else(|| text.strip_suffix(symbol))
                    .unwrap_or(text),
            };
            text.trim().parse::<f64>().ok()?
        }
        PriceValue::Other(_) => return None,
    };
    amount.is_finite().then_some(amount)
}

/// Text fields accept strings and numbers; any other value reads as empty.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// UPCs arrive as text or, from spreadsheets, as bare numbers.
fn upc_value<'de, D>(deserializer: D) -> std::result::Result<Option<UpcValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(UpcValue::Code(text)),
        Some(Value::Number(n)) => Some(UpcValue::Code(n.to_string())),
        Some(other) => Some(UpcValue::Invalid(other)),
    })
}
