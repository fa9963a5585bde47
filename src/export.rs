use crate::error::ScrapeError;
use crate::models::ListingRecord;
use std::path::Path;

/// Write `records` to `destination` as CSV.
///
/// Returns the number of rows written. An empty slice writes nothing.
pub async fn export_to_csv(
    records: &[ListingRecord],
    destination: &Path,
) -> Result<usize, ScrapeError> {
    if records.is_empty() {
        return Ok(0);
    }

    // Header row comes from the ListingRecord field names
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::Csv(e.into_error().into()))?;

    tokio::fs::write(destination, bytes)
        .await
        .map_err(|source| ScrapeError::Export {
            path: destination.to_path_buf(),
            source,
        })?;

    Ok(records.len())
}
