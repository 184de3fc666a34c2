//! Form schema definitions.
//!
//! A [`FormSchema`] is an ordered list of [`FieldDefinition`]s; field order is
//! display order. Each field carries its [`FieldType`], label, and an optional
//! [`FieldValidation`] constraint bag whose keys depend on the type.
//!
//! The serialized shape is the JSON contract served to clients:
//!
//! ```json
//! { "name": "age", "type": "number", "label": "Age", "required": false,
//!   "validation": { "min": 18, "max": 100 } }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use formkit_core::settings_loader::{is_json_path, toml_to_json};
use formkit_core::{FormError, FormResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of input a field collects.
///
/// Type names outside the known set deserialize to [`FieldType::Unknown`],
/// which keeps the name so the schema is served back unchanged. Such fields
/// only get the required check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// A number, submitted as a JSON number or numeric string.
    Number,
    /// One value out of `options`.
    Select,
    /// Several values out of `options`, submitted as an array.
    MultiSelect,
    /// An ISO `YYYY-MM-DD` date string.
    Date,
    /// Multi-line text.
    Textarea,
    /// A boolean toggle.
    Switch,
    /// A type this version does not recognise, by its wire name.
    Unknown(String),
}

impl FieldType {
    /// Returns the wire name, e.g. `"multi-select"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Date => "date",
            Self::Textarea => "textarea",
            Self::Switch => "switch",
            Self::Unknown(name) => name,
        }
    }

    /// Parses a wire name. Never fails; unrecognised names become
    /// [`FieldType::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi-select" => Self::MultiSelect,
            "date" => Self::Date,
            "textarea" => Self::Textarea,
            "switch" => Self::Switch,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// One selectable choice of a `select` or `multi-select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// The submitted value.
    pub value: String,
    /// The text shown to the user.
    pub label: String,
}

impl FieldOption {
    /// Creates a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A compiled regular expression that serializes as its source text.
///
/// The pattern text is kept verbatim, including anchors and escaping.
/// Matching is a search, so unanchored patterns match anywhere.
#[derive(Clone)]
pub struct Pattern(regex::Regex);

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Configuration`] if the pattern does not compile.
    pub fn new(source: &str) -> FormResult<Self> {
        regex::Regex::new(source)
            .map(Self)
            .map_err(|e| FormError::Configuration(format!("Invalid regex '{source}': {e}")))
    }

    /// Returns the pattern source text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}

/// The type-dependent constraint bag of a field.
///
/// Which keys apply depends on the field type:
///
/// | type | keys |
/// |---|---|
/// | text, textarea | `minLength`, `maxLength`, `regex` |
/// | number | `min`, `max` |
/// | date | `minDate` |
/// | multi-select | `minSelected`, `maxSelected` |
///
/// Numeric bounds are kept as JSON numbers so that `18` is served and
/// rendered as `18`, not `18.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Minimum text length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum text length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Pattern the text must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<Pattern>,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<serde_json::Number>,
    /// Inclusive numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<serde_json::Number>,
    /// Inclusive lower bound for dates, as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    /// Minimum number of selected options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    /// Maximum number of selected options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,
}

impl FieldValidation {
    /// Creates an empty constraint bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum text length.
    #[must_use]
    pub const fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Sets the maximum text length.
    #[must_use]
    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Sets the pattern.
    #[must_use]
    pub fn regex(mut self, pattern: Pattern) -> Self {
        self.regex = Some(pattern);
        self
    }

    /// Sets the numeric lower bound.
    #[must_use]
    pub fn min(mut self, n: impl Into<serde_json::Number>) -> Self {
        self.min = Some(n.into());
        self
    }

    /// Sets the numeric upper bound.
    #[must_use]
    pub fn max(mut self, n: impl Into<serde_json::Number>) -> Self {
        self.max = Some(n.into());
        self
    }

    /// Sets the earliest allowed date.
    #[must_use]
    pub fn min_date(mut self, date: impl Into<String>) -> Self {
        self.min_date = Some(date.into());
        self
    }

    /// Sets the minimum selection count.
    #[must_use]
    pub const fn min_selected(mut self, n: usize) -> Self {
        self.min_selected = Some(n);
        self
    }

    /// Sets the maximum selection count.
    #[must_use]
    pub const fn max_selected(mut self, n: usize) -> Self {
        self.max_selected = Some(n);
        self
    }
}

/// Complete definition of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// The field name, used as the record key. Unique within a schema.
    pub name: String,
    /// The field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable label.
    pub label: String,
    /// Placeholder text for empty inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` and `multi-select` fields, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Type-dependent constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldDefinition {
    /// Creates an optional field whose label defaults to its name.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        Self {
            name,
            field_type,
            label,
            placeholder: None,
            required: false,
            options: Vec::new(),
            validation: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets whether this field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Appends a choice.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(FieldOption::new(value, label));
        self
    }

    /// Sets the constraint bag.
    #[must_use]
    pub fn validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// A declarative form: title, description, and ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// The form title.
    pub title: String,
    /// Introductory text shown above the fields.
    #[serde(default)]
    pub description: String,
    /// The fields, in display order.
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// Creates an empty schema with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field names in display order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Checks the structural invariants: every field has a non-empty name
    /// and no two fields share one.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Configuration`] naming the offending field.
    pub fn check(&self) -> FormResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(FormError::Configuration(
                    "Schema field with an empty name".to_string(),
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::Configuration(format!(
                    "Duplicate schema field '{}'",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// Parses and checks a schema from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a regex does not compile,
    /// or [`check`](Self::check) fails.
    pub fn from_json_str(json: &str) -> FormResult<Self> {
        let schema: Self = serde_json::from_str(json)
            .map_err(|e| FormError::Configuration(format!("Failed to parse schema JSON: {e}")))?;
        schema.check()?;
        Ok(schema)
    }

    /// Parses and checks a schema from TOML (fields as `[[fields]]` tables).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a regex does not compile,
    /// or [`check`](Self::check) fails.
    pub fn from_toml_str(toml_str: &str) -> FormResult<Self> {
        let value: toml::Value = toml::from_str(toml_str)
            .map_err(|e| FormError::Configuration(format!("Failed to parse schema TOML: {e}")))?;
        let schema: Self = serde_json::from_value(toml_to_json(value))
            .map_err(|e| FormError::Configuration(format!("Invalid schema: {e}")))?;
        schema.check()?;
        Ok(schema)
    }

    /// Loads a schema file, choosing JSON or TOML by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> FormResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FormError::Configuration(format!(
                "Failed to read schema file '{}': {e}",
                path.display()
            ))
        })?;
        if is_json_path(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}
