//! Data models for matrix configurations and grid cells

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The raw value stored in a grid cell.
///
/// Values come straight from the configuration's `matrix` field, so the
/// JSON number/string distinction is kept: `1` and `"1"` are different values
/// (they share a palette key, but only the number can be the inactive zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(serde_json::Number),
    Text(String),
}

impl CellValue {
    /// Build a numeric value from an integer.
    pub fn int(n: i64) -> Self {
        CellValue::Number(n.into())
    }

    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True only for the JSON number zero. The string `"0"` is not zero.
    pub fn is_zero(&self) -> bool {
        match self {
            CellValue::Number(n) => n.as_f64() == Some(0.0),
            CellValue::Text(_) => false,
        }
    }

    /// True for numbers and for strings that read as a number.
    ///
    /// Blank strings count as numeric, matching how a browser coerces them.
    pub fn is_numeric(&self) -> bool {
        match self {
            CellValue::Number(_) => true,
            CellValue::Text(s) => is_numeric_str(s),
        }
    }

    /// The palette key governing this cell.
    ///
    /// Integral numbers print without a fractional part (`1.0` -> `"1"`).
    pub fn key(&self) -> String {
        match self {
            CellValue::Number(n) => number_key(n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// The literal text drawn when labels are enabled.
    pub fn label(&self) -> String {
        self.key()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", number_key(n)),
            CellValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => n.to_string(),
    }
}

fn is_numeric_str(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return true;
    }
    let unsigned = trimmed.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }
    // f64::from_str also takes "inf", "infinity" and "nan" in any case
    trimmed.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'))
        && trimmed.parse::<f64>().is_ok()
}

/// One grid position: an immutable value and its current display color.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub color: String,
}

/// An ordered `key -> CSS color` mapping.
///
/// Serializes as a JSON object. Unlike a `HashMap`, entries keep the order in
/// which the document listed them, which decides which key wins when two
/// keys share a color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, String)>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, color: impl Into<String>) {
        let key = key.into();
        let color = color.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((key, color)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c.as_str()))
    }
}

impl<K: Into<String>, C: Into<String>> FromIterator<(K, C)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut map = ColorMap::new();
        for (k, c) in iter {
            map.insert(k, c);
        }
        map
    }
}

impl Serialize for ColorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, c) in &self.entries {
            map.serialize_entry(k, c)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColorMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColorMapVisitor;

        impl<'de> Visitor<'de> for ColorMapVisitor {
            type Value = ColorMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping keys to color strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ColorMap, A::Error> {
                let mut map = ColorMap::new();
                while let Some((key, color)) = access.next_entry::<String, String>()? {
                    map.insert(key, color);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ColorMapVisitor)
    }
}

/// A complete matrix configuration document.
///
/// ```json
/// {
///   "numColorMap": { "1": "#e53935" },
///   "borderColorMap": { "A": "#212121" },
///   "matrix": [[0, 1, "A"]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixConfig {
    /// Fill colors for numeric values, keyed by the value's string form
    pub num_color_map: ColorMap,
    /// Border/background colors for letter values
    pub border_color_map: ColorMap,
    /// Row-major grid of raw values
    pub matrix: Vec<Vec<CellValue>>,
}

impl MatrixConfig {
    /// Grid dimensions as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.matrix.len(), self.matrix.first().map_or(0, |r| r.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(json: &str) -> CellValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_cell_value_untagged() {
        assert_eq!(num("3"), CellValue::int(3));
        assert_eq!(num("\"A\""), CellValue::text("A"));
        assert!(serde_json::from_str::<CellValue>("true").is_err());
        assert!(serde_json::from_str::<CellValue>("null").is_err());
    }

    #[test]
    fn test_zero_is_number_only() {
        assert!(num("0").is_zero());
        assert!(num("0.0").is_zero());
        assert!(!CellValue::text("0").is_zero());
        assert!(!CellValue::int(1).is_zero());
    }

    #[test]
    fn test_numeric_strings() {
        assert!(CellValue::text("12").is_numeric());
        assert!(CellValue::text(" 1.5 ").is_numeric());
        assert!(CellValue::text("").is_numeric());
        assert!(!CellValue::text("A").is_numeric());
        assert!(!CellValue::text("NaN").is_numeric());
        assert!(CellValue::int(7).is_numeric());
    }

    #[test]
    fn test_infinity_spellings() {
        for s in ["Infinity", "-Infinity", "+Infinity", "1e400"] {
            assert!(CellValue::text(s).is_numeric(), "{s}");
        }
        for s in ["inf", "INF", "+infinity", "-inf", "nan", "infinity", "++1"] {
            assert!(!CellValue::text(s).is_numeric(), "{s}");
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(CellValue::int(2).key(), "2");
        assert_eq!(num("2.0").key(), "2");
        assert_eq!(num("2.5").key(), "2.5");
        assert_eq!(num("-1").key(), "-1");
        assert_eq!(CellValue::text("B").key(), "B");
        assert_eq!(CellValue::text("2").key(), CellValue::int(2).key());
    }

    #[test]
    fn test_color_map_keeps_document_order() {
        let map: ColorMap =
            serde_json::from_str(r#"{"3": "green", "1": "red", "2": "blue"}"#).unwrap();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["3", "1", "2"]);
        assert_eq!(map.get("1"), Some("red"));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"3":"green","1":"red","2":"blue"}"#);
    }

    #[test]
    fn test_color_map_insert_replaces_in_place() {
        let mut map: ColorMap = [("a", "red"), ("b", "blue")].into_iter().collect();
        map.insert("a", "pink");
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", "pink"), ("b", "blue")]);
    }

    #[test]
    fn test_matrix_config_preserves_integers() {
        let json = r#"{"numColorMap":{"1":"red"},"borderColorMap":{},"matrix":[[1,"A",0]]}"#;
        let config: MatrixConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.dimensions(), (1, 3));
        assert_eq!(serde_json::to_string(&config).unwrap(), json);
    }
}
