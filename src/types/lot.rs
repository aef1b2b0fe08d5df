//! Lot types: size rows, derived summaries and the save payload

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::services::measure::format_weight;

/// Specification mode that disables the spec-weight column
pub const PLANE: &str = "PLANE";

/// One line of the lot drawer: a size and the sets/weights recorded for it.
///
/// Raw fields hold the text the seller typed so that "not entered yet" stays
/// distinguishable from zero. Averages are 3-decimal strings, empty until the
/// row's numbers are first edited or the lot is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRow {
    #[serde(default, deserialize_with = "text_or_number")]
    pub size: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub set: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub gross_wt: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub net_wt: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub avg_gross_wt: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub avg_net_wt: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub avg_spec_wt: String,
}

impl SizeRow {
    /// Row with only a size selected
    pub fn with_size(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            ..Self::default()
        }
    }

    /// Raw value of an editable field
    pub fn field(&self, field: LotField) -> &str {
        match field {
            LotField::Size => &self.size,
            LotField::Set => &self.set,
            LotField::GrossWt => &self.gross_wt,
            LotField::NetWt => &self.net_wt,
        }
    }

    pub(crate) fn field_mut(&mut self, field: LotField) -> &mut String {
        match field {
            LotField::Size => &mut self.size,
            LotField::Set => &mut self.set,
            LotField::GrossWt => &mut self.gross_wt,
            LotField::NetWt => &mut self.net_wt,
        }
    }

    pub fn set_averages(&mut self, averages: RowAverages) {
        self.avg_gross_wt = averages.avg_gross_wt;
        self.avg_net_wt = averages.avg_net_wt;
        self.avg_spec_wt = averages.avg_spec_wt;
    }

    /// Every editable field has a value
    pub fn is_complete(&self) -> bool {
        LotField::ALL
            .iter()
            .all(|&field| is_present(self.field(field)))
    }
}

/// Presence check for entered text: anything but blank counts, including "0"
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Accepts JSON strings and numbers (prior lot data stores both), null as empty
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected text or number, found {}",
            other
        ))),
    }
}

/// Whole numbers serialize as integers (`3`, not `3.0`)
fn whole_or_fraction<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Fields a seller can edit; averages are derived and never set directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LotField {
    Size,
    Set,
    GrossWt,
    NetWt,
}

impl LotField {
    pub const ALL: [LotField; 4] = [Self::Size, Self::Set, Self::GrossWt, Self::NetWt];

    /// Payload key of the field
    pub fn key(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Set => "set",
            Self::GrossWt => "grossWt",
            Self::NetWt => "netWt",
        }
    }

    /// Column label
    pub fn label(self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::Set => "Set",
            Self::GrossWt => "Gross Wt. (g)",
            Self::NetWt => "Net Wt. (g)",
        }
    }

    /// Editing this field changes the row's averages
    pub fn affects_averages(self) -> bool {
        !matches!(self, Self::Size)
    }

    /// Next field (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Size => Self::Set,
            Self::Set => Self::GrossWt,
            Self::GrossWt => Self::NetWt,
            Self::NetWt => Self::Size,
        }
    }

    /// Previous field (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Size => Self::NetWt,
            Self::Set => Self::Size,
            Self::GrossWt => Self::Set,
            Self::NetWt => Self::GrossWt,
        }
    }
}

impl fmt::Display for LotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LotField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LotField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown lot field: {}", s))
    }
}

/// Product specification mode (`PLANE`, `STONE`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specification(String);

impl Specification {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain products have no spec weight
    pub fn is_plane(&self) -> bool {
        self.0 == PLANE
    }

    /// Column label for the spec weight, None for plain products
    pub fn weight_label(&self) -> Option<String> {
        (!self.is_plane()).then(|| format!("{} Wt (g)", self.0))
    }
}

impl Default for Specification {
    fn default() -> Self {
        Self::new(PLANE)
    }
}

impl From<&str> for Specification {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the drawer adds a new lot or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerMode {
    #[default]
    Create,
    Edit,
}

impl DrawerMode {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "Add",
            Self::Edit => "Edit",
        }
    }
}

/// Derived averages of a single row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowAverages {
    pub avg_gross_wt: String,
    pub avg_net_wt: String,
    pub avg_spec_wt: String,
}

/// Per-size summary row of the "Size & Totals" table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeGroupSummary {
    pub size: String,
    pub count: u64,
    pub average_net_wt: f64,
    #[serde(serialize_with = "whole_or_fraction")]
    pub total_sets: f64,
    pub average_gross_wt: f64,
}

impl SizeGroupSummary {
    pub fn average_spec_wt(&self) -> f64 {
        self.average_gross_wt - self.average_net_wt
    }
}

/// Sums across every row of the lot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotTotals {
    #[serde(serialize_with = "whole_or_fraction")]
    pub total_sets: f64,
    #[serde(serialize_with = "whole_or_fraction")]
    pub total_gross_wt: f64,
    #[serde(serialize_with = "whole_or_fraction")]
    pub total_net_wt: f64,
}

impl LotTotals {
    pub fn spec_wt(&self) -> f64 {
        self.total_gross_wt - self.total_net_wt
    }
}

/// Payload handed to the host when a lot is saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLot {
    pub lot_sizes: Vec<SizeRow>,
    #[serde(default)]
    pub totals: LotTotals,
}

impl SavedLot {
    /// Product stock fields derived from this lot
    pub fn stock_update(&self) -> StockUpdate {
        StockUpdate {
            gross_wt: format_weight(self.totals.total_gross_wt),
            net_wt: format_weight(self.totals.total_net_wt),
            instock_gram: format_weight(self.totals.total_gross_wt),
            instock_set: format_count(self.totals.total_sets),
            sizes: self
                .lot_sizes
                .iter()
                .filter(|row| is_present(&row.size))
                .map(|row| row.size.clone())
                .collect(),
        }
    }
}

/// Stock columns a catalogue product carries for a lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub gross_wt: String,
    pub net_wt: String,
    pub instock_gram: String,
    pub instock_set: String,
    pub sizes: Vec<String>,
}

/// Set counts print without a trailing `.0` when whole
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Prior lot data as stored by a host: bare rows or a saved payload
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LotFile {
    Rows(Vec<SizeRow>),
    Saved(SavedLot),
}

impl LotFile {
    pub fn into_rows(self) -> Vec<SizeRow> {
        match self {
            Self::Rows(rows) => rows,
            Self::Saved(saved) => saved.lot_sizes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== SizeRow serde ==========

    #[test]
    fn test_row_deserializes_numbers_as_text() {
        let row: SizeRow =
            serde_json::from_str(r#"{"size":"S","set":2,"grossWt":10.5,"netWt":"8"}"#).unwrap();
        assert_eq!(row.size, "S");
        assert_eq!(row.set, "2");
        assert_eq!(row.gross_wt, "10.5");
        assert_eq!(row.net_wt, "8");
        assert!(row.avg_gross_wt.is_empty());
    }

    #[test]
    fn test_row_missing_and_null_fields_are_empty() {
        let row: SizeRow = serde_json::from_str(r#"{"size":null}"#).unwrap();
        assert_eq!(row, SizeRow::default());
    }

    #[test]
    fn test_row_rejects_bool_field() {
        let result = serde_json::from_str::<SizeRow>(r#"{"set":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_row_serializes_payload_keys() {
        let row = SizeRow::with_size("M");
        let json = serde_json::to_value(&row).unwrap();
        for key in [
            "size",
            "set",
            "grossWt",
            "netWt",
            "avgGrossWt",
            "avgNetWt",
            "avgSpecWt",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }

    // ========== Presence ==========

    #[test]
    fn test_zero_text_is_present() {
        assert!(is_present("0"));
        assert!(!is_present(""));
        assert!(!is_present("   "));
    }

    #[test]
    fn test_row_complete() {
        let mut row = SizeRow::with_size("S");
        assert!(!row.is_complete());
        row.set = "1".into();
        row.gross_wt = "2".into();
        row.net_wt = "0".into();
        assert!(row.is_complete());
    }

    // ========== LotField ==========

    #[test]
    fn test_field_from_str() {
        assert_eq!("grossWt".parse::<LotField>().unwrap(), LotField::GrossWt);
        assert_eq!("SET".parse::<LotField>().unwrap(), LotField::Set);
        assert!("avgNetWt".parse::<LotField>().is_err());
    }

    #[test]
    fn test_field_cycle() {
        let mut field = LotField::Size;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, LotField::Size);
        assert_eq!(LotField::Size.prev(), LotField::NetWt);
    }

    // ========== Specification ==========

    #[test]
    fn test_specification_default_is_plane() {
        let spec = Specification::default();
        assert!(spec.is_plane());
        assert_eq!(spec.weight_label(), None);
    }

    #[test]
    fn test_specification_weight_label() {
        let spec = Specification::from("STONE");
        assert_eq!(spec.weight_label().as_deref(), Some("STONE Wt (g)"));
    }

    // ========== Totals / payload ==========

    #[test]
    fn test_totals_serialize_whole_numbers_as_integers() {
        let totals = LotTotals {
            total_sets: 3.0,
            total_gross_wt: 15.0,
            total_net_wt: 12.5,
        };
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(
            json,
            r#"{"totalSets":3,"totalGrossWt":15,"totalNetWt":12.5}"#
        );
    }

    #[test]
    fn test_stock_update_from_saved_lot() {
        let saved = SavedLot {
            lot_sizes: vec![SizeRow::with_size("S"), SizeRow::default(), SizeRow::with_size("M")],
            totals: LotTotals {
                total_sets: 3.0,
                total_gross_wt: 15.0,
                total_net_wt: 12.0,
            },
        };
        let stock = saved.stock_update();
        assert_eq!(stock.gross_wt, "15.000");
        assert_eq!(stock.net_wt, "12.000");
        assert_eq!(stock.instock_gram, "15.000");
        assert_eq!(stock.instock_set, "3");
        assert_eq!(stock.sizes, vec!["S", "M"]);
    }

    #[test]
    fn test_stock_update_rounds_halfway_weights_up() {
        let saved = SavedLot {
            lot_sizes: vec![SizeRow::with_size("S")],
            totals: LotTotals {
                total_sets: 1.0,
                total_gross_wt: 0.3125,
                total_net_wt: 0.0625,
            },
        };
        let stock = saved.stock_update();
        assert_eq!(stock.gross_wt, "0.313");
        assert_eq!(stock.net_wt, "0.063");
        assert_eq!(stock.instock_gram, "0.313");
    }

    #[test]
    fn test_lot_file_accepts_rows_or_payload() {
        let rows: LotFile = serde_json::from_str(r#"[{"size":"S"}]"#).unwrap();
        assert_eq!(rows.into_rows().len(), 1);

        let saved: LotFile = serde_json::from_str(
            r#"{"lotSizes":[{"size":"S"},{"size":"M"}],"totals":{"totalSets":0,"totalGrossWt":0,"totalNetWt":0}}"#,
        )
        .unwrap();
        assert_eq!(saved.into_rows().len(), 2);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(3.0), "3");
        assert_eq!(format_count(2.5), "2.5");
    }
}
