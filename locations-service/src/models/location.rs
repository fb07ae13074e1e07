//! Row and view types for the locations query.

use serde::Serialize;
use sqlx::FromRow;

/// One joined demographics/population row, as fetched from the database.
///
/// `zip_code` and `count_of_licensees` exist only as join/filter keys and
/// intermediate inputs; they are dropped from the serialized view.
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub latitude: f64,
    pub longitude: f64,
    pub count_of_licensees: i64,
    pub population_under_18_years: i64,
    pub population_density_per_sq_mile: f64,
}

/// The flat record served at `/api/v1.0/locations`.
///
/// Field names are part of the wire contract consumed by the map pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Children_to_Doctor_Ratio")]
    pub children_to_doctor_ratio: f64,
    #[serde(rename = "Population_Density")]
    pub population_density: f64,
}

/// Children under 18 per licensed practitioner; 0 when a ZIP has no
/// practitioners at all.
pub fn children_to_doctor_ratio(population_under_18: i64, count_of_licensees: i64) -> f64 {
    if count_of_licensees > 0 {
        population_under_18 as f64 / count_of_licensees as f64
    } else {
        0.0
    }
}

impl From<LocationRow> for LocationView {
    fn from(row: LocationRow) -> Self {
        LocationView {
            latitude: row.latitude,
            longitude: row.longitude,
            children_to_doctor_ratio: children_to_doctor_ratio(
                row.population_under_18_years,
                row.count_of_licensees,
            ),
            population_density: row.population_density_per_sq_mile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_divides_children_by_licensees() {
        assert_eq!(children_to_doctor_ratio(100, 5), 20.0);
        assert_eq!(children_to_doctor_ratio(1, 3), 1.0 / 3.0);
    }

    #[test]
    fn ratio_is_zero_without_licensees() {
        assert_eq!(children_to_doctor_ratio(80, 0), 0.0);
        assert_eq!(children_to_doctor_ratio(0, 0), 0.0);
    }

    #[test]
    fn view_drops_join_keys_and_derives_ratio() {
        let row = LocationRow {
            latitude: 34.1,
            longitude: -118.4,
            count_of_licensees: 5,
            population_under_18_years: 100,
            population_density_per_sq_mile: 50.2,
        };

        let view = LocationView::from(row);
        assert_eq!(view.latitude, 34.1);
        assert_eq!(view.longitude, -118.4);
        assert_eq!(view.children_to_doctor_ratio, 20.0);
        assert_eq!(view.population_density, 50.2);
    }

    #[test]
    fn view_uses_zero_ratio_for_zero_licensees() {
        let row = LocationRow {
            latitude: 40.7,
            longitude: -73.9,
            count_of_licensees: 0,
            population_under_18_years: 80,
            population_density_per_sq_mile: 12.0,
        };

        let view = LocationView::from(row);
        assert_eq!(view.children_to_doctor_ratio, 0.0);
        assert_eq!(view.population_density, 12.0);
    }

    #[test]
    fn view_serializes_with_wire_field_names() {
        let view = LocationView {
            latitude: 34.1,
            longitude: -118.4,
            children_to_doctor_ratio: 20.0,
            population_density: 50.2,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["Latitude"], 34.1);
        assert_eq!(json["Longitude"], -118.4);
        assert_eq!(json["Children_to_Doctor_Ratio"], 20.0);
        assert_eq!(json["Population_Density"], 50.2);
    }
}
