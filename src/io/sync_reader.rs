//! Synchronous CSV readers
//!
//! Provides a streaming iterator over transaction requests from a CSV file,
//! and the loader for the asset ledger. Delegates CSV format concerns to the
//! csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<NumberedRequest, String>` for each CSV row:
//!
//! ```no_run
//! use transaction_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(numbered) => println!("Request {}: {:?}", numbered.number, numbered.request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants and still consume
//!   a request number, so numbering matches the data rows of the file

use crate::core::InMemoryAssetStore;
use crate::io::csv_format::{
    convert_asset_record, convert_request_record, AssetCsvRecord, RequestCsvRecord,
};
use crate::types::{NumberedRequest, PaymentError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Synchronous request reader
///
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    request_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader trims whitespace from all fields and allows a missing
    /// trailing `notes` column.
    ///
    /// # Errors
    ///
    /// Returns an error message if the file could not be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            request_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<NumberedRequest, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<RequestCsvRecord>();
        let next = deserializer.next()?;
        self.request_num += 1;
        let number = self.request_num;

        Some(match next {
            Ok(record) => convert_request_record(record)
                .map(|request| NumberedRequest { number, request })
                .map_err(|e| format!("Request {}: {}", number, e)),
            Err(e) => Err(format!("Request {}: CSV parse error: {}", number, e)),
        })
    }
}

/// Load an asset ledger CSV into an in-memory asset store
///
/// Unlike request files, a ledger must be entirely valid: the first bad row
/// fails the load.
///
/// # Errors
///
/// - `FileNotFound` if the file does not exist
/// - `IoError` if it cannot be read
/// - `ParseError` with the file line number of the first bad row
pub fn load_assets(path: &Path) -> Result<InMemoryAssetStore, PaymentError> {
    if !path.exists() {
        return Err(PaymentError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut store = InMemoryAssetStore::new();
    for (index, row) in reader.deserialize::<AssetCsvRecord>().enumerate() {
        // Header is line 1
        let line = index as u64 + 2;
        let record = row.map_err(|e| PaymentError::ParseError {
            line: Some(line),
            message: e.to_string(),
        })?;
        let asset = convert_asset_record(record).map_err(|message| PaymentError::ParseError {
            line: Some(line),
            message,
        })?;
        store.insert(asset);
    }

    info!(assets = store.len(), path = %path.display(), "asset ledger loaded");
    Ok(store)
}
