// src/process/mod.rs
//! CSV rows in, GeoJSON features out.

pub mod convert;
pub mod date_parser;
pub mod feature;
pub mod row;
pub mod utils;

pub use convert::{
    convert_csv_to_geojson, features_from_reader, is_not_found, write_geojson,
    ConversionSummary,
};
