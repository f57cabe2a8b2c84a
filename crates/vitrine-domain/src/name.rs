//! Display-name splitting.

use serde::{Deserialize, Serialize};

/// A display name split into given names (`prenoms`) and family name (`nom`).
///
/// Token claims and the profile payload carry both parts, so the split must be
/// stable for a given input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub prenoms: String,
    pub nom: String,
}

impl PersonName {
    /// Split a full display name.
    ///
    /// The last whitespace-delimited token is the family name; everything before
    /// it, re-joined with single spaces, forms the given names. A single token
    /// fills both parts. An empty or blank name yields two empty strings.
    ///
    /// ```
    /// use vitrine_domain::name::PersonName;
    ///
    /// let name = PersonName::split("  Jean   Paul Dupont ");
    /// assert_eq!(name.prenoms, "Jean Paul");
    /// assert_eq!(name.nom, "Dupont");
    /// ```
    pub fn split(full_name: &str) -> Self {
        let mut segments: Vec<&str> = full_name.split_whitespace().collect();

        let Some(nom) = segments.pop() else {
            return Self {
                prenoms: String::new(),
                nom: String::new(),
            };
        };

        let prenoms = segments.join(" ");
        let prenoms = if prenoms.is_empty() {
            nom.to_owned()
        } else {
            prenoms
        };

        Self {
            prenoms,
            nom: nom.to_owned(),
        }
    }
}
