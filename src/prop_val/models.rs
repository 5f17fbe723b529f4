use std::collections::BTreeMap;
use thiserror::Error;

/// One row of the `property_value` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PropertyValue {
    pub property_name: String,
    pub label_type: String,
    pub value: i32,
}

/// The (name, label type, value) triple handed to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub name: String,
    pub label_type: String,
    pub value: i32,
}

/// Property name to row, ordered by name so that the same set of rows always
/// renders the same HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySheet(pub BTreeMap<String, PropertyRow>);

impl PropertySheet {
    pub fn rows(&self) -> impl Iterator<Item = &PropertyRow> {
        self.0.values()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PropertyValue> for PropertySheet {
    fn from_iter<T: IntoIterator<Item = PropertyValue>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|pv| {
                    (
                        pv.property_name.clone(),
                        PropertyRow {
                            name: pv.property_name,
                            label_type: pv.label_type,
                            value: pv.value,
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Upserts staged during one form submission. Nothing here touches the
/// database; `PropertyStore::save_all` commits the whole set at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    staged: BTreeMap<String, PropertyValue>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }
    /// Stage an update-or-insert for `name`. A later call for the same name
    /// replaces the earlier one.
    pub fn upsert(&mut self, name: &str, label_type: &str, value: i32) {
        self.staged.insert(
            name.to_string(),
            PropertyValue {
                property_name: name.to_string(),
                label_type: label_type.to_string(),
                value,
            },
        );
    }
    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        self.staged.values()
    }
    pub fn len(&self) -> usize {
        self.staged.len()
    }
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("value {raw:?} for property {name:?} is not an integer")]
    NotAnInteger { name: String, raw: String },
    #[error("submitted a value with no property name")]
    BlankName,
}

/// Parse a submitted form value the way a number input sends it. Leading and
/// trailing whitespace is ignored.
pub fn parse_value(name: &str, raw: &str) -> Result<i32, SubmitError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| SubmitError::NotAnInteger {
            name: name.to_string(),
            raw: raw.to_string(),
        })
}
