//! Item rows of a loading session
//!
//! Quantities are kept exactly as typed into the loading form. They are only
//! coerced to numbers when totals are computed (see `service::numeric`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Quality grade for bulk-loaded goods billed by weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    A,
    B,
    C,
}

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::A, Grade::B, Grade::C];

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A Grade",
            Grade::B => "B Grade",
            Grade::C => "C Grade",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    /// Accepts "A", "A Grade" and "Grade A" in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let letter = normalized
            .strip_suffix("grade")
            .or_else(|| normalized.strip_prefix("grade"))
            .unwrap_or(&normalized)
            .trim();
        match letter {
            "a" => Ok(Grade::A),
            "b" => Ok(Grade::B),
            "c" => Ok(Grade::C),
            _ => Err(format!("unknown grade: {}", s.trim())),
        }
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Carton-based item row (regular loading)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegularItem {
    #[serde(deserialize_with = "de_text")]
    pub product: String,
    #[serde(deserialize_with = "de_text")]
    pub size: String,
    #[serde(deserialize_with = "de_text")]
    pub pack_per_ctn: String,
    #[serde(deserialize_with = "de_text")]
    pub total_ctn: String,
    #[serde(deserialize_with = "de_text")]
    pub avg_weight_kg: String,
}

impl RegularItem {
    /// Description shown on the challan, e.g. "Premium Baby (M)"
    pub fn description(&self) -> String {
        let product = self.product.trim();
        let size = self.size.trim();
        if size.is_empty() {
            product.to_string()
        } else {
            format!("{} ({})", product, size).trim().to_string()
        }
    }
}

/// Grade-based item row, billed by bags and weight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeItem {
    #[serde(
        deserialize_with = "de_optional_grade",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<Grade>,
    #[serde(deserialize_with = "de_text")]
    pub bags: String,
    #[serde(deserialize_with = "de_text")]
    pub kgs: String,
}

/// Poly bag packaging row, independent of the loading type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyItem {
    #[serde(deserialize_with = "de_text")]
    pub name: String,
    #[serde(deserialize_with = "de_text")]
    pub size: String,
    #[serde(deserialize_with = "de_text")]
    pub kgs: String,
}

/// Which item table a row operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Regular,
    Grade,
    Poly,
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" | "item" | "carton" => Ok(ItemKind::Regular),
            "grade" => Ok(ItemKind::Grade),
            "poly" => Ok(ItemKind::Poly),
            other => Err(format!("unknown item kind: {} (expected regular, grade or poly)", other)),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Regular => f.write_str("regular"),
            ItemKind::Grade => f.write_str("grade"),
            ItemKind::Poly => f.write_str("poly"),
        }
    }
}

/// Editable field of an item row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Product,
    Size,
    PackPerCtn,
    TotalCtn,
    AvgWeightKg,
    Grade,
    Bags,
    Kgs,
    Name,
}

impl FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "product" => Ok(ItemField::Product),
            "size" => Ok(ItemField::Size),
            "packperctn" => Ok(ItemField::PackPerCtn),
            "totalctn" => Ok(ItemField::TotalCtn),
            "avgweightkg" | "avgweight" => Ok(ItemField::AvgWeightKg),
            "grade" => Ok(ItemField::Grade),
            "bags" => Ok(ItemField::Bags),
            "kgs" => Ok(ItemField::Kgs),
            "name" => Ok(ItemField::Name),
            _ => Err(format!("unknown item field: {}", s.trim())),
        }
    }
}

impl RegularItem {
    pub(crate) fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Product => Some(&mut self.product),
            ItemField::Size => Some(&mut self.size),
            ItemField::PackPerCtn => Some(&mut self.pack_per_ctn),
            ItemField::TotalCtn => Some(&mut self.total_ctn),
            ItemField::AvgWeightKg => Some(&mut self.avg_weight_kg),
            _ => None,
        }
    }
}

impl GradeItem {
    /// Applies a form value. Blank grade clears it; an unknown grade is ignored.
    pub(crate) fn apply(&mut self, field: ItemField, value: &str) {
        match field {
            ItemField::Grade if value.trim().is_empty() => self.grade = None,
            ItemField::Grade => {
                if let Ok(grade) = value.parse() {
                    self.grade = Some(grade);
                }
            }
            ItemField::Bags => self.bags = value.to_string(),
            ItemField::Kgs => self.kgs = value.to_string(),
            _ => {}
        }
    }
}

impl PolyItem {
    pub(crate) fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Name => Some(&mut self.name),
            ItemField::Size => Some(&mut self.size),
            ItemField::Kgs => Some(&mut self.kgs),
            _ => None,
        }
    }
}

/// Form values arrive as strings, numbers or null depending on who wrote the draft
#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Int(i64),
    Float(f64),
    Flag(bool),
}

pub(crate) fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value: Option<FormValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(FormValue::Text(s)) => s,
        Some(FormValue::Int(n)) => n.to_string(),
        Some(FormValue::Float(n)) => n.to_string(),
        Some(FormValue::Flag(b)) => b.to_string(),
    })
}

fn de_optional_grade<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Grade>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing_variants() {
        assert_eq!("A".parse::<Grade>().unwrap(), Grade::A);
        assert_eq!("b grade".parse::<Grade>().unwrap(), Grade::B);
        assert_eq!("Grade C".parse::<Grade>().unwrap(), Grade::C);
        assert!("D".parse::<Grade>().is_err());
    }

    #[test]
    fn test_description_with_and_without_size() {
        let item = RegularItem {
            product: "Premium Baby".to_string(),
            size: "M".to_string(),
            ..Default::default()
        };
        assert_eq!(item.description(), "Premium Baby (M)");

        let no_size = RegularItem {
            product: "Freshkins Std Pant ".to_string(),
            ..Default::default()
        };
        assert_eq!(no_size.description(), "Freshkins Std Pant");

        let size_only = RegularItem {
            size: "XL".to_string(),
            ..Default::default()
        };
        assert_eq!(size_only.description(), "(XL)");
    }

    #[test]
    fn test_form_values_accept_numbers_and_blanks() {
        let json = r#"{"grade": "", "bags": 100, "kgs": 800.5}"#;
        let item: GradeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.grade, None);
        assert_eq!(item.bags, "100");
        assert_eq!(item.kgs, "800.5");

        let json = r#"{"grade": "A Grade", "bags": null}"#;
        let item: GradeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.grade, Some(Grade::A));
        assert_eq!(item.bags, "");
        assert_eq!(item.kgs, "");
    }

    #[test]
    fn test_item_field_names() {
        assert_eq!("pack-per-ctn".parse::<ItemField>().unwrap(), ItemField::PackPerCtn);
        assert_eq!("avgWeightKg".parse::<ItemField>().unwrap(), ItemField::AvgWeightKg);
        assert_eq!("total_ctn".parse::<ItemField>().unwrap(), ItemField::TotalCtn);
        assert!("colour".parse::<ItemField>().is_err());
    }

    #[test]
    fn test_unknown_grade_update_is_ignored() {
        let mut item = GradeItem {
            grade: Some(Grade::B),
            ..Default::default()
        };
        item.apply(ItemField::Grade, "Z");
        assert_eq!(item.grade, Some(Grade::B));
        item.apply(ItemField::Grade, " ");
        assert_eq!(item.grade, None);
    }
}
