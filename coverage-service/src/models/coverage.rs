//! Row and view types for the coverage query.

use serde::Serialize;
use sqlx::FromRow;

/// One demographics row, as fetched from the database.
#[derive(Debug, Clone, FromRow)]
pub struct CoverageRow {
    pub latitude: f64,
    pub longitude: f64,
    pub count_of_licensees: i64,
    pub coverage_rate: f64,
}

/// The flat record served at `/api/v1.0/locations`.
///
/// Unlike the locations-service view, licensee counts are part of the
/// output here and the coverage rate is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageView {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Count_of_Licensees")]
    pub count_of_licensees: i64,
    #[serde(rename = "Coverage_Rate")]
    pub coverage_rate: f64,
}

impl From<CoverageRow> for CoverageView {
    fn from(row: CoverageRow) -> Self {
        CoverageView {
            latitude: row.latitude,
            longitude: row.longitude,
            count_of_licensees: row.count_of_licensees,
            coverage_rate: row.coverage_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_passes_fields_through() {
        let row = CoverageRow {
            latitude: 34.1,
            longitude: -118.4,
            count_of_licensees: 7,
            coverage_rate: 85.5,
        };

        let view = CoverageView::from(row);
        assert_eq!(view.latitude, 34.1);
        assert_eq!(view.longitude, -118.4);
        assert_eq!(view.count_of_licensees, 7);
        assert_eq!(view.coverage_rate, 85.5);
    }

    #[test]
    fn view_serializes_with_wire_field_names() {
        let view = CoverageView {
            latitude: 34.1,
            longitude: -118.4,
            count_of_licensees: 7,
            coverage_rate: 85.5,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["Latitude"], 34.1);
        assert_eq!(json["Longitude"], -118.4);
        assert_eq!(json["Count_of_Licensees"], 7);
        assert_eq!(json["Coverage_Rate"], 85.5);
    }
}
