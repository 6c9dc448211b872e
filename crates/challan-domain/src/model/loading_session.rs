//! Loading session: one vehicle dispatch event as edited in the loading form

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::items::{de_text, GradeItem, ItemField, ItemKind, PolyItem, RegularItem};

/// Loading mode; selects which item table is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingType {
    #[default]
    Regular,
    Grade,
}

impl LoadingType {
    pub fn label(&self) -> &'static str {
        match self {
            LoadingType::Regular => "Regular (Carton Based)",
            LoadingType::Grade => "Grade Based (A/B/C)",
        }
    }
}

impl std::str::FromStr for LoadingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" | "carton" => Ok(LoadingType::Regular),
            "grade" => Ok(LoadingType::Grade),
            other => Err(format!("unknown loading type: {} (expected regular or grade)", other)),
        }
    }
}

/// Header fields of the challan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingHeader {
    #[serde(deserialize_with = "de_text")]
    pub dispatch_from: String,
    #[serde(deserialize_with = "de_text")]
    pub dispatch_to: String,
    #[serde(deserialize_with = "de_text")]
    pub vehicle_no: String,
    #[serde(deserialize_with = "de_text")]
    pub driver_name: String,
    #[serde(deserialize_with = "de_text")]
    pub driver_no: String,
    #[serde(deserialize_with = "de_text")]
    pub transporter_name: String,
    #[serde(deserialize_with = "de_text")]
    pub lr_no: String,
    #[serde(deserialize_with = "de_text")]
    pub challan_no: String,
    #[serde(deserialize_with = "de_blank_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "de_blank_datetime", skip_serializing_if = "Option::is_none")]
    pub vehicle_in: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de_blank_datetime", skip_serializing_if = "Option::is_none")]
    pub vehicle_out: Option<NaiveDateTime>,
}

/// The active item table of a session. Only this ever reaches the challan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadingItems<'a> {
    Regular(&'a [RegularItem]),
    Grade(&'a [GradeItem]),
}

impl LoadingItems<'_> {
    pub fn len(&self) -> usize {
        match self {
            LoadingItems::Regular(items) => items.len(),
            LoadingItems::Grade(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory loading session.
///
/// Both item tables are kept so switching the loading type back and forth in
/// the form does not lose rows, but only the one selected by `loading_type`
/// is exposed through [`LoadingSession::active_items`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingSession {
    #[serde(flatten)]
    pub header: LoadingHeader,
    #[serde(default)]
    pub loading_type: LoadingType,
    #[serde(default)]
    pub items: Vec<RegularItem>,
    #[serde(default)]
    pub grade_items: Vec<GradeItem>,
    #[serde(default)]
    pub poly_items: Vec<PolyItem>,
}

impl LoadingSession {
    /// Fresh session as the loading view opens it: one empty row per table
    pub fn new(dispatch_from: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            header: LoadingHeader {
                dispatch_from: dispatch_from.into(),
                date: Some(date),
                ..Default::default()
            },
            loading_type: LoadingType::Regular,
            items: vec![RegularItem::default()],
            grade_items: vec![GradeItem::default()],
            poly_items: vec![PolyItem::default()],
        }
    }

    pub fn active_items(&self) -> LoadingItems<'_> {
        match self.loading_type {
            LoadingType::Regular => LoadingItems::Regular(&self.items),
            LoadingType::Grade => LoadingItems::Grade(&self.grade_items),
        }
    }

    pub fn set_loading_type(&mut self, loading_type: LoadingType) {
        self.loading_type = loading_type;
    }

    /// Append an empty row; returns its index
    pub fn add_item(&mut self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Regular => {
                self.items.push(RegularItem::default());
                self.items.len() - 1
            }
            ItemKind::Grade => {
                self.grade_items.push(GradeItem::default());
                self.grade_items.len() - 1
            }
            ItemKind::Poly => {
                self.poly_items.push(PolyItem::default());
                self.poly_items.len() - 1
            }
        }
    }

    /// Set one field of one row. Out-of-range indices and fields that do not
    /// belong to `kind` leave the session unchanged.
    pub fn update_item(&mut self, kind: ItemKind, index: usize, field: ItemField, value: &str) {
        match kind {
            ItemKind::Regular => {
                if let Some(slot) = self.items.get_mut(index).and_then(|i| i.field_mut(field)) {
                    *slot = value.to_string();
                }
            }
            ItemKind::Grade => {
                if let Some(item) = self.grade_items.get_mut(index) {
                    item.apply(field, value);
                }
            }
            ItemKind::Poly => {
                if let Some(slot) = self.poly_items.get_mut(index).and_then(|i| i.field_mut(field)) {
                    *slot = value.to_string();
                }
            }
        }
    }

    /// Remove one row, keeping the order of the rest. Out of range is a no-op.
    pub fn remove_item(&mut self, kind: ItemKind, index: usize) {
        match kind {
            ItemKind::Regular if index < self.items.len() => {
                self.items.remove(index);
            }
            ItemKind::Grade if index < self.grade_items.len() => {
                self.grade_items.remove(index);
            }
            ItemKind::Poly if index < self.poly_items.len() => {
                self.poly_items.remove(index);
            }
            _ => {}
        }
    }
}

fn de_blank_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            // Full timestamps ("2026-01-25T00:00:00.000Z") keep only the date part
            let day = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn de_blank_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let s = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };
    parse_form_datetime(s)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {}", s)))
}

/// Parse a vehicle in/out value as the form (or a person) writes it
pub fn parse_form_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        // Full timestamps ("...T04:00:00.000Z", "+05:30") keep their wall-clock time
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 25).unwrap()
    }

    #[test]
    fn test_new_session_has_one_empty_row_each() {
        let session = LoadingSession::new("Ranala", today());
        assert_eq!(session.items.len(), 1);
        assert_eq!(session.grade_items.len(), 1);
        assert_eq!(session.poly_items.len(), 1);
        assert_eq!(session.loading_type, LoadingType::Regular);
        assert_eq!(session.header.date, Some(today()));
    }

    #[test]
    fn test_active_items_follow_loading_type() {
        let mut session = LoadingSession::new("", today());
        session.add_item(ItemKind::Grade);
        assert!(matches!(session.active_items(), LoadingItems::Regular(items) if items.len() == 1));

        session.set_loading_type(LoadingType::Grade);
        assert!(matches!(session.active_items(), LoadingItems::Grade(items) if items.len() == 2));
    }

    #[test]
    fn test_update_item_sets_field() {
        let mut session = LoadingSession::new("", today());
        session.update_item(ItemKind::Regular, 0, ItemField::TotalCtn, "250");
        session.update_item(ItemKind::Poly, 0, ItemField::Name, "Outer Poly S");
        session.update_item(ItemKind::Grade, 0, ItemField::Grade, "A Grade");
        assert_eq!(session.items[0].total_ctn, "250");
        assert_eq!(session.poly_items[0].name, "Outer Poly S");
        assert_eq!(session.grade_items[0].grade, Some(crate::model::Grade::A));
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let mut session = LoadingSession::new("", today());
        let before = session.clone();
        session.update_item(ItemKind::Regular, 5, ItemField::TotalCtn, "10");
        session.update_item(ItemKind::Poly, 1, ItemField::Kgs, "10");
        assert_eq!(session, before);
    }

    #[test]
    fn test_update_foreign_field_is_noop() {
        let mut session = LoadingSession::new("", today());
        let before = session.clone();
        session.update_item(ItemKind::Regular, 0, ItemField::Bags, "10");
        session.update_item(ItemKind::Poly, 0, ItemField::Product, "x");
        assert_eq!(session, before);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut session = LoadingSession::new("", today());
        session.add_item(ItemKind::Poly);
        session.add_item(ItemKind::Poly);
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            session.update_item(ItemKind::Poly, i, ItemField::Name, name);
        }
        session.remove_item(ItemKind::Poly, 1);
        let names: Vec<&str> = session.poly_items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);

        session.remove_item(ItemKind::Poly, 9);
        assert_eq!(session.poly_items.len(), 2);
    }

    #[test]
    fn test_deserialize_form_payload() {
        let json = r#"{
            "dispatchFrom": "Mumuksh Impex LLP",
            "dispatchTo": "ABC Distributors",
            "vehicleNo": "MH-18-BC-4412",
            "challanNo": "CH-001",
            "date": "2026-01-25",
            "vehicleIn": "2026-01-25T09:30",
            "vehicleOut": "",
            "loadingType": "grade",
            "items": [{"product": "", "size": "", "pcs": "", "packPerCtn": "", "totalCtn": "", "avgWeightKg": ""}],
            "gradeItems": [{"grade": "B Grade", "bags": "50", "kgs": "380"}],
            "polyItems": [{"name": "", "size": "", "kgs": ""}]
        }"#;
        let session: LoadingSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.header.challan_no, "CH-001");
        assert_eq!(session.loading_type, LoadingType::Grade);
        assert_eq!(session.header.date, NaiveDate::from_ymd_opt(2026, 1, 25));
        assert_eq!(
            session.header.vehicle_in,
            NaiveDate::from_ymd_opt(2026, 1, 25).and_then(|d| d.and_hms_opt(9, 30, 0))
        );
        assert_eq!(session.header.vehicle_out, None);
        assert_eq!(session.grade_items[0].kgs, "380");
    }

    #[test]
    fn test_parse_form_datetime() {
        let expected = today().and_hms_opt(8, 15, 0);
        assert_eq!(parse_form_datetime("2026-01-25T08:15"), expected);
        assert_eq!(parse_form_datetime(" 2026-01-25 08:15 "), expected);
        assert_eq!(parse_form_datetime("2026-01-25T08:15:00"), expected);
        assert_eq!(parse_form_datetime("25/01/2026 08:15"), None);
    }

    #[test]
    fn test_deserialize_full_timestamps() {
        let json = r#"{
            "challanNo": "CH-1",
            "vehicleNo": "MH",
            "date": "2026-01-25T00:00:00.000Z",
            "vehicleIn": "2026-01-25T04:00:00.000Z",
            "vehicleOut": "2026-01-25T09:45:00+05:30"
        }"#;
        let session: LoadingSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.header.date, Some(today()));
        assert_eq!(session.header.vehicle_in, today().and_hms_opt(4, 0, 0));
        assert_eq!(session.header.vehicle_out, today().and_hms_opt(9, 45, 0));
    }

    #[test]
    fn test_json_roundtrip_keeps_session() {
        let mut session = LoadingSession::new("Ranala", today());
        session.header.challan_no = "CH-009".to_string();
        session.update_item(ItemKind::Regular, 0, ItemField::Product, "Premium Baby");
        let json = serde_json::to_string(&session).unwrap();
        let back: LoadingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
