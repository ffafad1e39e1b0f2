//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over transaction requests from a CSV file.
//! Supports batch reading for the async strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of NumberedRequests
//!                  ↓
//!           csv_format module
//!           (RequestCsvRecord, convert_request_record)
//! ```

use crate::io::csv_format::{convert_request_record, RequestCsvRecord};
use crate::types::NumberedRequest;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous request reader
///
/// Numbers requests exactly as [`SyncReader`](crate::io::SyncReader) does, so
/// both strategies report the same request numbers.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    request_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            request_num: 0,
        }
    }

    /// Read a batch of requests
    ///
    /// Reads up to `batch_size` valid requests. Invalid rows are logged and
    /// skipped. Returns an empty vector at end of file.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<NumberedRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<RequestCsvRecord>();

        while batch.len() < batch_size {
            let Some(next) = records.next().await else {
                break;
            };
            self.request_num += 1;
            let number = self.request_num;

            match next {
                Ok(record) => match convert_request_record(record) {
                    Ok(request) => batch.push(NumberedRequest { number, request }),
                    Err(e) => warn!(request = number, error = %e, "skipping invalid request"),
                },
                Err(e) => warn!(request = number, error = %e, "skipping malformed CSV row"),
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetToken, CurrencyValue, PoolKind};
    use futures::io::Cursor;

    const HEADER: &str = "specialization,amount,source,target,status,type,notes\n";

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let content = format!(
            "{}ACCOUNT,1,a,b,Pending,Payment,\nACCOUNT,2,a,b,Pending,Payment,\nCARD,3,c,d,Pending,Payment,\n",
            HEADER
        );
        let mut reader = AsyncReader::new(Cursor::new(content.into_bytes()));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].number, 1);
        assert_eq!(batch[1].request.amount, CurrencyValue::from_cents(200));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].number, 3);

        assert!(reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut reader = AsyncReader::new(Cursor::new(HEADER.as_bytes().to_vec()));
        assert!(reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_rows_but_keeps_numbering() {
        let content = format!(
            "{}SAVINGS,1,a,b,Pending,Payment,\nACCOUNT,5.5,Deposit,Withdrawal,Pending,Deposit,\n",
            HEADER
        );
        let mut reader = AsyncReader::new(Cursor::new(content.into_bytes()));

        let batch = reader.read_batch(10).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].number, 2);
        assert_eq!(batch[0].request.source, AssetToken::SystemPool(PoolKind::Deposit));
        assert_eq!(
            batch[0].request.target,
            AssetToken::SystemPool(PoolKind::Withdrawal)
        );
    }
}
