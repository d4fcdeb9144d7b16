//! Snapshot inputs — a full JSON snapshot, or a CSV option chain plus header values.
//!
//! CSV columns: `strike,expiration,type,bid,ask,open_interest,volume`.
//! `type` accepts `put`/`call` or `P`/`C`, case-insensitive.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use condor_core::domain::{MarketSnapshot, OptionContract, OptionType};

use crate::error::LoadError;

/// Everything in a snapshot except the chain and the events.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHeader {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub spot: f64,
    pub vix: f64,
    pub iv_percentile: f64,
}

impl SnapshotHeader {
    pub fn with_chain(self, chain: Vec<OptionContract>) -> MarketSnapshot {
        MarketSnapshot {
            symbol: self.symbol,
            trade_date: self.trade_date,
            spot: self.spot,
            vix: self.vix,
            iv_percentile: self.iv_percentile,
            chain,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChainRecord {
    strike: f64,
    expiration: NaiveDate,
    #[serde(rename = "type")]
    option_type: String,
    bid: f64,
    ask: f64,
    #[serde(default)]
    open_interest: u64,
    #[serde(default)]
    volume: u64,
}

/// Load a complete snapshot from a JSON file.
pub fn load_snapshot_json(path: &Path) -> Result<MarketSnapshot, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let snapshot: MarketSnapshot =
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(
        path = %path.display(),
        symbol = %snapshot.symbol,
        trade_date = %snapshot.trade_date,
        contracts = snapshot.chain.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON, creating parent directories.
pub fn write_snapshot_json(path: &Path, snapshot: &MarketSnapshot) -> Result<(), LoadError> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LoadError::io(parent, e))?;
    }
    std::fs::write(path, json).map_err(|e| LoadError::io(path, e))
}

/// Load an option chain from a CSV file.
pub fn load_chain_csv(path: &Path) -> Result<Vec<OptionContract>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
    let chain = read_chain(file, path)?;
    tracing::info!(path = %path.display(), contracts = chain.len(), "loaded option chain");
    Ok(chain)
}

/// Parse CSV chain records from any reader. `path` labels errors.
pub fn read_chain<R: io::Read>(reader: R, path: &Path) -> Result<Vec<OptionContract>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut chain = Vec::new();
    for (i, record) in rdr.deserialize::<ChainRecord>().enumerate() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let option_type =
            parse_option_type(&record.option_type).ok_or_else(|| LoadError::InvalidRecord {
                path: PathBuf::from(path),
                record: i as u64 + 1,
                reason: format!("unknown option type '{}'", record.option_type),
            })?;
        chain.push(OptionContract {
            strike: record.strike,
            expiration: record.expiration,
            option_type,
            bid: record.bid,
            ask: record.ask,
            open_interest: record.open_interest,
            volume: record.volume,
        });
    }
    Ok(chain)
}

fn parse_option_type(s: &str) -> Option<OptionType> {
    match s.to_ascii_lowercase().as_str() {
        "put" | "p" => Some(OptionType::Put),
        "call" | "c" => Some(OptionType::Call),
        _ => None,
    }
}
