// src/config.rs

use std::path::PathBuf;

use crate::fetch::download::file_name_from_url;

/// The published Mapping Museums export.
pub static SOURCE_URL: &str =
    "https://museweb.dcs.bbk.ac.uk/static/pdf/MappingMuseumsData2021_09_30.csv";

/// Everything is read from and written under here.
pub static DATA_DIR: &str = "data";

pub static OUTPUT_FILE_NAME: &str = "museums.geojson";

/// Where the downloaded CSV lands, named after the last segment of `SOURCE_URL`.
pub fn source_csv_path() -> PathBuf {
    PathBuf::from(DATA_DIR).join(file_name_from_url(SOURCE_URL))
}

pub fn output_geojson_path() -> PathBuf {
    PathBuf::from(DATA_DIR).join(OUTPUT_FILE_NAME)
}
