use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::Path,
};
use tracing::{debug, info, warn};

use crate::process::{
    feature::{Feature, FeatureCollection},
    row::Row,
};

/// How many rows made it into the output and how many were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
}

/// Convert CSV text (header row first) into a feature collection.
///
/// A row with missing or unparseable coordinates is logged and skipped; it never
/// stops the run. A malformed CSV record does.
pub fn features_from_reader<R: Read>(reader: R) -> Result<(FeatureCollection, ConversionSummary)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers().context("reading CSV header row")?.clone();
    debug!(columns = headers.len(), "read header row");

    let mut features = Vec::new();
    let mut summary = ConversionSummary::default();

    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let row = Row::from_record(&headers, &record);

        match Feature::from_row(&row) {
            Ok(feature) => {
                features.push(feature);
                summary.converted += 1;
            }
            Err(err) => {
                warn!(museum_id = row.museum_id(), "skipping row: {}", err);
                summary.skipped += 1;
            }
        }
    }

    Ok((FeatureCollection::from_features(features), summary))
}

/// Read `input`, convert every row, and write the collection to `output`.
///
/// `output` is only created once the whole input has been converted.
#[tracing::instrument(
    level = "info",
    skip(input, output),
    fields(input = %input.as_ref().display(), output = %output.as_ref().display())
)]
pub fn convert_csv_to_geojson<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<ConversionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let (collection, summary) =
        features_from_reader(file).with_context(|| format!("reading {}", input.display()))?;

    write_geojson(&collection, output)?;

    info!(
        converted = summary.converted,
        skipped = summary.skipped,
        "successfully converted {} valid records to {}",
        summary.converted,
        output.display()
    );
    Ok(summary)
}

/// Pretty-printed with two-space indentation; non-ASCII text is written as-is.
pub fn write_geojson(collection: &FeatureCollection, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, collection)
        .with_context(|| format!("writing GeoJSON to {}", output.display()))?;
    writer.flush()?;
    Ok(())
}

/// True when anything in the error chain is an I/O "not found".
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    })
}
