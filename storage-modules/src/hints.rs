use serde::{Deserialize, Serialize};

/// Structured reading of a data-hint key.
///
/// Modules describe their data with free-form hint keys such as
/// `"objectType message"`, `"string message#subject"`,
/// `"directory documents/notes/"` or `"item documents/notes/calendar"`.
/// The hint value is a human-readable description and is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataHint {
    /// An object type implemented by the module.
    ObjectType { name: String },
    /// An attribute of an object type.
    Attribute {
        attribute_type: String,
        object_type: String,
        attribute: String,
    },
    /// The purpose of a directory path.
    Directory { path: String },
    /// A special item path.
    Item { path: String },
    /// Anything not matching the forms above, kept verbatim.
    Other { key: String },
}

impl DataHint {
    pub fn parse(key: &str) -> Self {
        let trimmed = key.trim();
        let Some((kind, rest)) = trimmed.split_once(char::is_whitespace) else {
            return Self::Other { key: key.into() };
        };
        let rest = rest.trim();
        if rest.is_empty() {
            return Self::Other { key: key.into() };
        }
        match kind {
            "objectType" => Self::ObjectType { name: rest.into() },
            "directory" => Self::Directory { path: rest.into() },
            "item" => Self::Item { path: rest.into() },
            attribute_type => match rest.split_once('#') {
                Some((object_type, attribute))
                    if !object_type.is_empty() && !attribute.is_empty() =>
                {
                    Self::Attribute {
                        attribute_type: attribute_type.into(),
                        object_type: object_type.into(),
                        attribute: attribute.into(),
                    }
                }
                _ => Self::Other { key: key.into() },
            },
        }
    }
}
