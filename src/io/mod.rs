//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous request reader with iterator interface, and the asset ledger loader
//! - `async_reader` - Asynchronous request reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_asset_record, convert_request_record, write_history_csv, AssetCsvRecord,
    RequestCsvRecord, ResultWriter,
};
pub use sync_reader::{load_assets, SyncReader};
