//! CSV format handling for asset ledgers, requests, and results
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for deserialization of asset and request rows
//! - Conversion from CSV records to domain types
//! - Result and history output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::ProcessingResult;
use crate::types::{
    AssetToken, CurrencyValue, FinancialAsset, NewTransactionRequest, Page, TransactionView,
};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Status written for requests the engine could not create
pub const FAILED_STATUS: &str = "Failed";

/// Asset ledger row: `id,owner,active,balance,asset_type`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AssetCsvRecord {
    pub id: String,
    pub owner: String,
    pub active: bool,
    pub balance: String,
    pub asset_type: String,
}

/// Request row: `specialization,amount,source,target,status,type,notes`
///
/// `notes` may be empty or missing.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RequestCsvRecord {
    pub specialization: String,
    pub amount: String,
    pub source: String,
    pub target: String,
    pub status: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub notes: Option<String>,
}

/// Parse a decimal money string such as `100.5` or `-12.50`
pub fn parse_currency(raw: &str) -> Result<CurrencyValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("amount is required".to_string());
    }

    let decimal =
        Decimal::from_str(trimmed).map_err(|_| format!("Invalid amount '{}'", trimmed))?;
    CurrencyValue::try_from(decimal).map_err(|e| e.to_string())
}

/// Convert an asset row to a `FinancialAsset`
pub fn convert_asset_record(record: AssetCsvRecord) -> Result<FinancialAsset, String> {
    if record.id.is_empty() {
        return Err("asset id is required".to_string());
    }

    let balance = parse_currency(&record.balance)
        .map_err(|e| format!("{} for asset {}", e, record.id))?;

    Ok(FinancialAsset {
        id: record.id,
        owner: record.owner,
        active: record.active,
        balance,
        asset_type: record.asset_type,
    })
}

/// Convert a request row to a `NewTransactionRequest`
///
/// The `Deposit` source and `Withdrawal` target sentinels become pool tokens
/// here. Negative amounts are rejected.
pub fn convert_request_record(record: RequestCsvRecord) -> Result<NewTransactionRequest, String> {
    let specialization = record.specialization.parse()?;

    let amount = parse_currency(&record.amount)?;
    if amount.is_negative() {
        return Err(format!(
            "Invalid amount '{}': transaction amounts must not be negative",
            record.amount.trim()
        ));
    }

    if record.source.is_empty() || record.target.is_empty() {
        return Err("source and target are required".to_string());
    }

    Ok(NewTransactionRequest {
        specialization,
        amount,
        source: AssetToken::source(&record.source),
        target: AssetToken::target(&record.target),
        status_name: record.status,
        type_name: record.type_name,
        notes: record.notes.filter(|notes| !notes.is_empty()),
    })
}

/// Format an amount as a plain two-decimal number
pub fn format_amount(amount: &CurrencyValue) -> String {
    format!("{:.2}", amount.to_decimal())
}

/// Streaming writer for per-request results
///
/// Writes `request,specialization,amount,source,target,status,notes`. Failed
/// requests echo the request as read, with status `Failed` and the error
/// message as notes.
pub struct ResultWriter<'a> {
    writer: Writer<&'a mut dyn Write>,
}

impl<'a> ResultWriter<'a> {
    /// Create a writer and emit the header row
    pub fn new(output: &'a mut dyn Write) -> Result<Self, String> {
        let mut writer = Writer::from_writer(output);
        writer
            .write_record([
                "request",
                "specialization",
                "amount",
                "source",
                "target",
                "status",
                "notes",
            ])
            .map_err(|e| format!("Failed to write CSV header: {}", e))?;

        Ok(Self { writer })
    }

    pub fn write(&mut self, result: &ProcessingResult) -> Result<(), String> {
        let row = match &result.outcome {
            Ok(view) => [
                result.number.to_string(),
                view.specialization.to_string(),
                format_amount(&view.amount),
                view.source_id.clone(),
                view.target_id.clone(),
                view.status_name.clone(),
                view.notes.clone().unwrap_or_default(),
            ],
            Err(e) => [
                result.number.to_string(),
                result.request.specialization.to_string(),
                format_amount(&result.request.amount),
                result.request.source.to_string(),
                result.request.target.to_string(),
                FAILED_STATUS.to_string(),
                e.to_string(),
            ],
        };

        self.writer
            .write_record(&row)
            .map_err(|e| format!("Failed to write result record: {}", e))
    }

    pub fn write_all(&mut self, results: &[ProcessingResult]) -> Result<(), String> {
        results.iter().try_for_each(|result| self.write(result))
    }

    /// Flush buffered rows to the output
    pub fn finish(mut self) -> Result<(), String> {
        self.writer
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))
    }
}

/// Write one page of an asset's history
///
/// Columns: `id,specialization,amount,source,target,type,status,notes,status_time`
pub fn write_history_csv(page: &Page<TransactionView>, output: &mut dyn Write) -> Result<(), String> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "id",
            "specialization",
            "amount",
            "source",
            "target",
            "type",
            "status",
            "notes",
            "status_time",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for view in &page.items {
        writer
            .write_record(&[
                view.id.clone(),
                view.specialization.to_string(),
                format_amount(&view.amount),
                view.source_id.clone(),
                view.target_id.clone(),
                view.type_name.clone().unwrap_or_default(),
                view.status_name.clone(),
                view.notes.clone().unwrap_or_default(),
                view.status_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ])
            .map_err(|e| format!("Failed to write history record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
