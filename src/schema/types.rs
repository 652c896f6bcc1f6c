//! Schema type definitions
//!
//! Two shapes live here:
//! - the at-rest encoding (`ProductType`, `PropertyRecord`, `DataType`) as the
//!   external store persists it
//! - the typed form (`FieldDefinition`, `FieldKind`) the validator consumes,
//!   where each kind carries only the constraints it can interpret
//!
//! Supported kinds: Enum, Number, Text, Boolean, Date.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::options::{parse_options, OptionSet};

/// Identifier of a product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub i64);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TypeId {
    fn from(id: i64) -> Self {
        TypeId(id)
    }
}

/// Field kind with its kind-specific constraints.
///
/// Serialize-only: the stored form is [`PropertyRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum FieldKind {
    /// String restricted to `options` (empty set accepts any string)
    Enum {
        options: OptionSet,
    },
    /// Number with optional inclusive bounds
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// String with an optional search pattern
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Boolean,
    Date,
}

impl FieldKind {
    /// Returns the kind tag
    pub fn name(&self) -> &'static str {
        self.data_type().as_str()
    }

    /// Returns the at-rest tag for this kind
    pub fn data_type(&self) -> DataType {
        match self {
            FieldKind::Enum { .. } => DataType::Enum,
            FieldKind::Number { .. } => DataType::Number,
            FieldKind::Text { .. } => DataType::Text,
            FieldKind::Boolean => DataType::Boolean,
            FieldKind::Date => DataType::Date,
        }
    }
}

/// One named, typed, constrained attribute of a product type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// Attribute bag key
    pub key: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether the key must be present
    pub required: bool,
    /// Evaluation order
    pub sort_order: i32,
}

impl FieldDefinition {
    /// Create an optional field of the given kind
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            required: false,
            sort_order: 0,
        }
    }

    /// Create an optional enum field
    pub fn enumeration<I, S>(key: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            key,
            FieldKind::Enum {
                options: options.into_iter().collect(),
            },
        )
    }

    /// Create an optional number field
    pub fn number(key: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(key, FieldKind::Number { min, max })
    }

    /// Create an optional text field
    pub fn text(key: impl Into<String>, pattern: Option<&str>) -> Self {
        Self::new(
            key,
            FieldKind::Text {
                pattern: pattern.map(str::to_string),
            },
        )
    }

    /// Create an optional boolean field
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Boolean)
    }

    /// Create an optional date field
    pub fn date(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Date)
    }

    /// Marks the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the sort order
    pub fn at(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// At-rest kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Enum,
    Number,
    Text,
    Boolean,
    Date,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Enum => "Enum",
            DataType::Number => "Number",
            DataType::Text => "Text",
            DataType::Boolean => "Boolean",
            DataType::Date => "Date",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_active() -> bool {
    true
}

/// Property definition as persisted by the schema store.
///
/// Every constraint column is present regardless of `data_type`; only the
/// columns matching the tag survive conversion to a [`FieldDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub key: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub is_required: bool,
    /// JSON array of strings, Enum only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl PropertyRecord {
    /// Create an active, optional record with no constraints
    pub fn new(key: impl Into<String>, data_type: DataType) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            data_type,
            is_required: false,
            options_json: None,
            min: None,
            max: None,
            regex: None,
            sort_order: 0,
            is_active: true,
        }
    }

    /// Converts the record to its typed form.
    ///
    /// Constraints belonging to other kinds are dropped. A blank regex means
    /// no pattern.
    pub fn to_definition(&self) -> FieldDefinition {
        let kind = match self.data_type {
            DataType::Enum => FieldKind::Enum {
                options: parse_options(self.options_json.as_deref()),
            },
            DataType::Number => FieldKind::Number {
                min: self.min,
                max: self.max,
            },
            DataType::Text => FieldKind::Text {
                pattern: self
                    .regex
                    .as_ref()
                    .filter(|p| !p.trim().is_empty())
                    .cloned(),
            },
            DataType::Boolean => FieldKind::Boolean,
            DataType::Date => FieldKind::Date,
        };

        FieldDefinition {
            key: self.key.clone(),
            kind,
            required: self.is_required,
            sort_order: self.sort_order,
        }
    }
}

/// A product type and its stored property definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: TypeId,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

impl ProductType {
    /// Create an active product type with no properties
    pub fn new(id: impl Into<TypeId>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            is_active: true,
            properties: Vec::new(),
        }
    }

    /// Appends a property record
    pub fn with_property(mut self, property: PropertyRecord) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns the active definitions ordered by `sort_order`.
    ///
    /// The sort is stable, so equal sort orders keep their stored order.
    pub fn active_definitions(&self) -> Vec<FieldDefinition> {
        let mut defs: Vec<FieldDefinition> = self
            .properties
            .iter()
            .filter(|p| p.is_active)
            .map(PropertyRecord::to_definition)
            .collect();
        defs.sort_by_key(|d| d.sort_order);
        defs
    }

    /// Validates the stored schema itself (not an attribute bag)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err(format!("Product type {} must have a code", self.id));
        }

        let mut seen = HashSet::new();
        for prop in self.properties.iter().filter(|p| p.is_active) {
            if prop.key.trim().is_empty() {
                return Err(format!(
                    "Product type '{}' has a property with a blank key",
                    self.code
                ));
            }

            if !seen.insert(prop.key.as_str()) {
                return Err(format!(
                    "Product type '{}' defines '{}' more than once",
                    self.code, prop.key
                ));
            }

            if prop.data_type == DataType::Number {
                if let (Some(min), Some(max)) = (prop.min, prop.max) {
                    if min > max {
                        return Err(format!(
                            "Property '{}' has min {} greater than max {}",
                            prop.key, min, max
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
