use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use crate::models::{Catalog, VenueRecord};

/// Errors that can occur while reading the venue catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Reads venue records from a delimited table with a header row
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Load every record, surfacing I/O and parse failures
    pub fn try_load(&self) -> Result<Vec<VenueRecord>, CatalogError> {
        let file = File::open(&self.path).map_err(|source| CatalogError::Open {
            path: self.source_name(),
            source,
        })?;

        read_venues(file)
    }

    /// Load every record; an unreadable source yields an empty list
    pub fn load(&self) -> Vec<VenueRecord> {
        match self.try_load() {
            Ok(venues) => {
                tracing::debug!("Loaded {} venues from {}", venues.len(), self.path.display());
                venues
            }
            Err(e) => {
                tracing::warn!("Catalog {} unavailable: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Load a timestamped snapshot
    pub fn load_catalog(&self) -> Catalog {
        Catalog::new(self.source_name(), self.load())
    }
}

/// Parse venue records from any reader, preserving row order
///
/// Rows are not validated. Short rows leave trailing fields absent, cells
/// past the header are dropped, and invalid UTF-8 is replaced.
pub fn read_venues<R: Read>(source: R) -> Result<Vec<VenueRecord>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut venues = Vec::new();
    for result in reader.byte_records() {
        let record = result?;

        let venue: VenueRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), String::from_utf8_lossy(cell).into_owned()))
            .collect();

        venues.push(venue);
    }

    Ok(venues)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title,type,price,Zip Code,LGBT +
Blue Moon,Bar / Pub,$,15201,1
Cruze Bar,Club,$$,15222,0
";

    #[test]
    fn test_read_venues_in_order() {
        let venues = read_venues(SAMPLE.as_bytes()).unwrap();

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].field("title"), "Blue Moon");
        assert_eq!(venues[0].zip_code(), "15201");
        assert!(venues[0].has_flag("LGBT +"));
        assert_eq!(venues[1].venue_type(), "Club");
        assert!(!venues[1].has_flag("LGBT +"));
    }

    #[test]
    fn test_short_and_long_rows_pass_through() {
        let data = "title,type,price\nShort,Club\nLong,Bar / Pub,$,extra,cells\n";
        let venues = read_venues(data.as_bytes()).unwrap();

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].field("price"), "");
        assert_eq!(venues[1].field("price"), "$");
        assert_eq!(venues[1].fields().len(), 3);
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let mut data = b"title,type\n".to_vec();
        data.extend_from_slice(b"Caf\xe9,Club\n");

        let venues = read_venues(data.as_slice()).unwrap();

        assert_eq!(venues.len(), 1);
        assert!(venues[0].field("title").starts_with("Caf"));
        assert_eq!(venues[0].venue_type(), "Club");
    }

    #[test]
    fn test_duplicate_header_keeps_last() {
        let data = "type,type\nFirst,Second\n";
        let venues = read_venues(data.as_bytes()).unwrap();

        assert_eq!(venues[0].venue_type(), "Second");
    }

    #[test]
    fn test_empty_source() {
        assert!(read_venues("".as_bytes()).unwrap().is_empty());
        assert!(read_venues("title,type\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let loader = CatalogLoader::new("does/not/exist/venues.csv");

        assert!(matches!(loader.try_load(), Err(CatalogError::Open { .. })));
        assert!(loader.load().is_empty());
        assert!(loader.load_catalog().is_empty());
    }
}
