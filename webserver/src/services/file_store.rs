//! Flat-file JSON order store
//!
//! Each fundraiser date gets one JSON-lines file under the data directory,
//! `<data_dir>/<YYYY-MM-DD>.jsonl`, holding one order per line. Writes are
//! appends serialised behind a lock, so a line is never interleaved with
//! another.

use async_trait::async_trait;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use shared::{Order, OrderDate, OrderDraft, OrderId};

use crate::error::WebServerResult;
use crate::traits::OrderStore;

/// Order store persisting to JSON-lines files
pub struct JsonFileOrderStore {
    /// Base directory for all order files
    base_dir: PathBuf,

    write_lock: Mutex<()>,
}

impl JsonFileOrderStore {
    /// Create a store writing to `./orders`
    pub fn new() -> Self {
        Self::with_base_dir("./orders")
    }

    /// Create with custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Make sure the data directory exists before the server accepts orders
    pub async fn initialize(&self) -> WebServerResult<()> {
        fs::create_dir_all(&self.base_dir).await?;
        tracing::debug!("📁 Order directory ready: {}", self.base_dir.display());
        Ok(())
    }

    /// Orders file for a date
    fn date_file_path(&self, date: &OrderDate) -> PathBuf {
        self.base_dir.join(format!("{date}.jsonl"))
    }

    /// Parse a date file, skipping lines that are not orders for `date`
    fn parse_orders(content: &str, date: &OrderDate, path: &Path) -> Vec<Order> {
        let mut orders = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Order>(line) {
                Ok(order) if order.date == *date => orders.push(order),
                Ok(order) => {
                    tracing::warn!(
                        "⚠️ Skipping order {} in {} line {}: dated {}",
                        order.id,
                        path.display(),
                        index + 1,
                        order.date
                    );
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping unreadable line {} in {}: {}", index + 1, path.display(), e);
                }
            }
        }

        orders
    }

    /// True when the file is non-empty and its last byte is not a newline
    ///
    /// A crashed or interrupted write can leave a partial last line behind.
    async fn ends_mid_line(file: &mut fs::File) -> std::io::Result<bool> {
        let len = file.metadata().await?.len();
        if len == 0 {
            return Ok(false);
        }

        file.seek(SeekFrom::Start(len - 1)).await?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).await?;
        Ok(last[0] != b'\n')
    }
}

impl Default for JsonFileOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for JsonFileOrderStore {
    async fn insert_order(&self, draft: OrderDraft) -> WebServerResult<OrderId> {
        let id = OrderId::new();
        let order = draft.into_order(id);
        let path = self.date_file_path(&order.date);
        let line = serde_json::to_string(&order)?;

        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.base_dir).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .await?;

        // Terminate a torn line so this order starts on a line of its own
        let record = if Self::ends_mid_line(&mut file).await? {
            tracing::warn!("⚠️ {} ended mid-line; starting a fresh line", path.display());
            format!("\n{line}\n")
        } else {
            format!("{line}\n")
        };

        file.write_all(record.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("💾 Appended order {} to {}", id, path.display());
        Ok(id)
    }

    async fn find_orders_by_date(&self, date: &OrderDate) -> WebServerResult<Vec<Order>> {
        let path = self.date_file_path(date);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(Self::parse_orders(&content, date, &path))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
