use serde::{Deserialize, Serialize};

/// One entry of the destination selection control, as fetched from the
/// public country directory on startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryOption {
    pub value: String,
    pub label: String,
}

impl CountryOption {
    pub fn new(name: impl Into<String>) -> Self {
        let label = name.into();
        Self {
            value: label.to_lowercase(),
            label,
        }
    }
}
