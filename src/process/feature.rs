// src/process/feature.rs
//! Output document types. Field order here is the key order in the written JSON.

use serde::{Deserialize, Serialize};

use crate::process::date_parser::{date_prefix, parse_closing_year, parse_year};
use crate::process::row::{Row, RowError};

/// Prefix for each feature's `@id`; the museum id is appended.
pub static MUSEUM_ID_BASE: &str = "https://museweb.dcs.bbk.ac.uk/Museum/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    Feature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: CollectionType,
    pub indexing: DatasetIndexing,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionType::FeatureCollection,
            indexing: DatasetIndexing::default(),
            features,
        }
    }
}

/// Provenance and licence of the dataset, identical for every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetIndexing {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub license: String,
    pub identifier: String,
}

impl Default for DatasetIndexing {
    fn default() -> Self {
        Self {
            context: "https://schema.org/".into(),
            kind: "Dataset".into(),
            name: "Mapping Museums Dataset from Birkbeck, University of London".into(),
            description: "Data downloaded from the Mapping Museums website at www.mappingmuseums.org Accessed on 7th November 2025.".into(),
            license: "https://creativecommons.org/licenses/by/4.0/".into(),
            identifier: "https://museweb.dcs.bbk.ac.uk/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub geometry: Geometry,
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<Vec<Description>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
}

impl Feature {
    /// Build the feature for one row, or say why the row has to be skipped.
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        let (lon, lat) = row.coordinates()?;

        let descriptions = row
            .get("Notes")
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(|notes| {
                vec![Description {
                    value: notes.to_string(),
                }]
            });

        Ok(Self {
            id: format!("{}{}", MUSEUM_ID_BASE, row.get("museum_id").unwrap_or_default()),
            kind: FeatureType::Feature,
            geometry: Geometry::Point {
                coordinates: [lon, lat],
            },
            properties: Properties::from_row(row),
            descriptions,
            when: When::from_row(row),
        })
    }

    pub fn coordinates(&self) -> [f64; 2] {
        match self.geometry {
            Geometry::Point { coordinates } => coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct When {
    pub timespans: Vec<Timespan>,
}

impl When {
    /// Only a complete span is kept; one missing end drops both.
    pub fn from_row(row: &Row) -> Option<Self> {
        let start = date_prefix(row.get("fromdate"))?;
        let end = date_prefix(row.get("todate"))?;
        Some(Self {
            timespans: vec![Timespan {
                start: TimeMarker { at: start.into() },
                end: TimeMarker { at: end.into() },
            }],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    pub start: TimeMarker,
    pub end: TimeMarker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMarker {
    #[serde(rename = "in")]
    pub at: String,
}

/// Per-museum attributes. Everything except the four year keys is the cleaned
/// column value as-is; `created`/`closed` repeat `year_opened`/`year_closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub museum_id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub village_town_city: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub admin_area: Option<String>,
    pub accreditation: Option<String>,
    pub governance: Option<String>,
    pub size: Option<String>,
    pub size_provenance: Option<String>,
    pub subject_matter: Option<String>,
    pub year_opened: Option<String>,
    pub year_closed: Option<String>,
    pub domus_subject_matter: Option<String>,
    pub domus_identifier: Option<String>,
    pub primary_provenance_of_data: Option<String>,
    pub identifier_used_in_primary_data_source: Option<String>,
    pub area_deprivation_index: Option<String>,
    pub area_deprivation_index_crime: Option<String>,
    pub area_deprivation_index_education: Option<String>,
    pub area_deprivation_index_employment: Option<String>,
    pub area_deprivation_index_health: Option<String>,
    pub area_deprivation_index_housing: Option<String>,
    pub area_deprivation_index_income: Option<String>,
    pub area_deprivation_index_services: Option<String>,
    pub area_geodemographic_group: Option<String>,
    pub area_geodemographic_group_code: Option<String>,
    pub area_geodemographic_subgroup: Option<String>,
    pub area_geodemographic_subgroup_code: Option<String>,
    pub area_geodemographic_supergroup: Option<String>,
    pub area_geodemographic_supergroup_code: Option<String>,
    pub notes: Option<String>,
    pub created: Option<String>,
    pub closed: Option<String>,
}

impl Properties {
    pub fn from_row(row: &Row) -> Self {
        let year_opened = parse_year(row.get("Year_opened"));
        let year_closed = parse_closing_year(row.get("Year_closed"));

        Self {
            museum_id: row.value("museum_id"),
            name: row.value("Name_of_museum"),
            title: row.value("Name_of_museum"),
            address_line_1: row.value("Address_line_1"),
            address_line_2: row.value("Address_line_2"),
            village_town_city: row.value("Village,_Town_or_City"),
            postcode: row.value("Postcode"),
            latitude: row.value("Latitude"),
            longitude: row.value("Longitude"),
            admin_area: row.value("Admin_area"),
            accreditation: row.value("Accreditation"),
            governance: row.value("Governance"),
            size: row.value("Size"),
            size_provenance: row.value("Size_provenance"),
            subject_matter: row.value("Subject_Matter"),
            created: year_opened.clone(),
            closed: year_closed.clone(),
            year_opened,
            year_closed,
            domus_subject_matter: row.value("DOMUS_Subject_Matter"),
            domus_identifier: row.value("DOMUS_identifier"),
            primary_provenance_of_data: row.value("Primary_provenance_of_data"),
            identifier_used_in_primary_data_source: row
                .value("Identifier_used_in_primary_data_source"),
            area_deprivation_index: row.value("Area_Deprivation_index"),
            area_deprivation_index_crime: row.value("Area_Deprivation_index_crime"),
            area_deprivation_index_education: row.value("Area_Deprivation_index_education"),
            area_deprivation_index_employment: row.value("Area_Deprivation_index_employment"),
            area_deprivation_index_health: row.value("Area_Deprivation_index_health"),
            area_deprivation_index_housing: row.value("Area_Deprivation_index_housing"),
            area_deprivation_index_income: row.value("Area_Deprivation_index_income"),
            area_deprivation_index_services: row.value("Area_Deprivation_index_services"),
            area_geodemographic_group: row.value("Area_Geodemographic_group"),
            area_geodemographic_group_code: row.value("Area_Geodemographic_group_code"),
            area_geodemographic_subgroup: row.value("Area_Geodemographic_subgroup"),
            area_geodemographic_subgroup_code: row.value("Area_Geodemographic_subgroup_code"),
            area_geodemographic_supergroup: row.value("Area_Geodemographic_supergroup"),
            area_geodemographic_supergroup_code: row
                .value("Area_Geodemographic_supergroup_code"),
            notes: row.value("Notes"),
        }
    }
}
