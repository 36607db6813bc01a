//! Parsing of delimited setting strings into arrays and name-value maps.

use std::collections::HashMap;

pub const DEFAULT_SEPARATOR: &str = ";";
pub const DEFAULT_NAME_VALUE_SEPARATOR: &str = "=";

/// Options controlling how a delimited string is split into an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Trim surrounding whitespace from each element.
    pub trim: bool,
    /// Literal separator between elements.
    pub separator: String,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            trim: true,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ArrayOptions {
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Options controlling how a delimited string is split into name-value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryOptions {
    pub trim_names: bool,
    pub trim_values: bool,
    /// Separates a name from its value, e.g. `=` in `a=1`.
    pub name_value_separator: String,
    /// Separates pairs from each other, e.g. `;` in `a=1;b=2`.
    pub element_separator: String,
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self {
            trim_names: true,
            trim_values: false,
            name_value_separator: DEFAULT_NAME_VALUE_SEPARATOR.to_string(),
            element_separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl DictionaryOptions {
    pub fn with_trim_names(mut self, trim: bool) -> Self {
        self.trim_names = trim;
        self
    }

    pub fn with_trim_values(mut self, trim: bool) -> Self {
        self.trim_values = trim;
        self
    }

    pub fn with_name_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.name_value_separator = separator.into();
        self
    }

    pub fn with_element_separator(mut self, separator: impl Into<String>) -> Self {
        self.element_separator = separator.into();
        self
    }
}

/// Splits on a literal separator and drops empty pieces.
///
/// An empty separator does not split at all.
fn split_non_empty<'a>(s: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let (whole, pieces) = if separator.is_empty() {
        (Some(s), None)
    } else {
        (None, Some(s.split(separator)))
    };

    whole
        .into_iter()
        .chain(pieces.into_iter().flatten())
        .filter(|p| !p.is_empty())
}

/// Parses a delimited string such as `"a;b; c"` into its elements.
///
/// Whitespace-only elements are always dropped, whether or not `trim` is set.
/// Empty input yields an empty vector.
pub fn parse_array(raw: &str, options: &ArrayOptions) -> Vec<String> {
    split_non_empty(raw, &options.separator)
        .map(|part| if options.trim { part.trim() } else { part })
        .filter(|part| !part.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a name-value string such as `"a=1;b=2"` into a map.
///
/// Elements that do not split into exactly one name and one value are
/// skipped, as are pairs whose name or value is empty after trimming. When a
/// name repeats, the last value wins. Empty input yields an empty map.
pub fn parse_dictionary(raw: &str, options: &DictionaryOptions) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for element in split_non_empty(raw, &options.element_separator) {
        let parts: Vec<&str> = split_non_empty(element, &options.name_value_separator).collect();
        let [name, value] = parts[..] else {
            continue;
        };

        let name = if options.trim_names { name.trim() } else { name };
        let value = if options.trim_values { value.trim() } else { value };
        if name.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(name.to_string(), value.to_string());
    }

    map
}

/// Serializes a map back into a name-value string, ordered by name.
///
/// Parsing the output with the same options reproduces the map as long as
/// neither separator occurs in any name or value.
pub fn format_dictionary(map: &HashMap<String, String>, options: &DictionaryOptions) -> String {
    let mut pairs: Vec<(&String, &String)> = map.iter().collect();
    pairs.sort();

    pairs
        .into_iter()
        .map(|(name, value)| format!("{name}{}{value}", options.name_value_separator))
        .collect::<Vec<_>>()
        .join(&options.element_separator)
}
