use csv::StringRecord;
use std::collections::HashMap;
use thiserror::Error;

use crate::process::utils::clean_str;

/// Placeholder used in diagnostics when a row has no `museum_id`.
pub const MISSING_ID: &str = "N/A";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("missing coordinates")]
    MissingCoordinates,
    #[error("invalid {field} value {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// One CSV record keyed by header, with values already cleaned.
///
/// Columns the record is too short to reach are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), clean_str(value)))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Owned copy of a column, for carrying through into properties.
    pub fn value(&self, column: &str) -> Option<String> {
        self.fields.get(column).cloned()
    }

    pub fn museum_id(&self) -> &str {
        self.get("museum_id").unwrap_or(MISSING_ID)
    }

    /// `(longitude, latitude)`, in GeoJSON order.
    pub fn coordinates(&self) -> Result<(f64, f64), RowError> {
        let lat_str = self.get("Latitude").unwrap_or_default().trim();
        let lon_str = self.get("Longitude").unwrap_or_default().trim();

        if lat_str.is_empty() || lon_str.is_empty() {
            return Err(RowError::MissingCoordinates);
        }

        let lat = parse_coordinate("Latitude", lat_str)?;
        let lon = parse_coordinate("Longitude", lon_str)?;
        Ok((lon, lat))
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, RowError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        let headers = StringRecord::from(pairs.iter().map(|(h, _)| *h).collect::<Vec<_>>());
        let record = StringRecord::from(pairs.iter().map(|(_, v)| *v).collect::<Vec<_>>());
        Row::from_record(&headers, &record)
    }

    #[test]
    fn test_values_are_cleaned() {
        let r = row(&[("Name_of_museum", "Tate\u{a0}Modern")]);
        assert_eq!(r.get("Name_of_museum"), Some("Tate Modern"));
        assert_eq!(r.get("Postcode"), None);
    }

    #[test]
    fn test_short_record_leaves_columns_absent() {
        let headers = StringRecord::from(vec!["museum_id", "Latitude", "Longitude"]);
        let record = StringRecord::from(vec!["7"]);
        let r = Row::from_record(&headers, &record);
        assert_eq!(r.museum_id(), "7");
        assert_eq!(r.get("Latitude"), None);
        assert_eq!(r.coordinates(), Err(RowError::MissingCoordinates));
    }

    #[test]
    fn test_coordinates_are_lon_lat() {
        let r = row(&[("Latitude", " 51.5 "), ("Longitude", "-0.1")]);
        assert_eq!(r.coordinates(), Ok((-0.1, 51.5)));
    }

    #[test]
    fn test_empty_coordinate_is_missing() {
        let r = row(&[("museum_id", "42"), ("Latitude", ""), ("Longitude", "-0.1")]);
        assert_eq!(r.coordinates(), Err(RowError::MissingCoordinates));
        let r = row(&[("Latitude", "51.5"), ("Longitude", "\u{a0}")]);
        assert_eq!(r.coordinates(), Err(RowError::MissingCoordinates));
    }

    #[test]
    fn test_non_numeric_and_non_finite_coordinates_are_invalid() {
        let r = row(&[("Latitude", "north"), ("Longitude", "-0.1")]);
        assert_eq!(
            r.coordinates(),
            Err(RowError::InvalidCoordinate {
                field: "Latitude",
                value: "north".into()
            })
        );
        let r = row(&[("Latitude", "51.5"), ("Longitude", "NaN")]);
        assert!(matches!(
            r.coordinates(),
            Err(RowError::InvalidCoordinate { field: "Longitude", .. })
        ));
    }

    #[test]
    fn test_museum_id_placeholder() {
        assert_eq!(Row::default().museum_id(), MISSING_ID);
    }
}
