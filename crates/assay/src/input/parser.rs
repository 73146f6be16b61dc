//! CSV/TSV parser with delimiter detection.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::{Cell, DataTable, SourceMetadata};
use crate::error::{AssayError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Spreadsheet extensions that are recognised but not read.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Cell contents read as missing values unless configured otherwise.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Exact cell contents that are read as missing values.
    pub null_values: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let ext = ext.to_ascii_lowercase();
            if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
                return Err(AssayError::UnsupportedFormat(format!(
                    "spreadsheet input (.{}) is not supported, export the sheet to CSV",
                    ext
                )));
            }
        }

        let io_err = |e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let data_table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        tracing::debug!(
            file = %path.display(),
            format = %format,
            rows = data_table.row_count(),
            columns = data_table.column_count(),
            "Loaded table"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse in-memory text, detecting the delimiter unless one is configured.
    pub fn parse_str(&self, text: &str) -> Result<DataTable> {
        let bytes = text.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        // Without a header row this is the first data record, which is not consumed
        let first = reader.headers()?.clone();
        if first.is_empty() {
            return Err(AssayError::EmptyData("No columns found".to_string()));
        }

        let headers = if self.config.has_header {
            dedupe_headers(first.iter())
        } else {
            (0..first.len()).map(|i| format!("column_{}", i + 1)).collect()
        };

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            rows.push(record.iter().map(|v| self.to_cell(v)).collect());
        }

        Ok(DataTable::new(headers, rows))
    }

    fn to_cell(&self, value: &str) -> Cell {
        if self.config.null_values.iter().any(|n| n == value) {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffix repeated header names with `.1`, `.2`, ... so columns stay addressable.
fn dedupe_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for name in names {
        let count = seen.entry(name.to_string()).or_insert(0);
        if *count == 0 {
            headers.push(name.to_string());
        } else {
            headers.push(format!("{}.{}", name, count));
        }
        *count += 1;
    }

    headers
}

/// Lines sampled when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// Pick the delimiter that splits the leading lines into the most columns,
/// preferring one that gives every sampled line the same width.
///
/// Candidates are tried through the CSV reader itself, so delimiters inside
/// quoted fields are not counted. Ties go to the earlier candidate.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let sample: Vec<&[u8]> = bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .take(SNIFF_LINES)
        .collect();

    if sample.is_empty() {
        return Err(AssayError::EmptyData("No lines to analyze".to_string()));
    }
    let sample = sample.join(&b'\n');

    let mut best: Option<(bool, usize, u8)> = None;
    for &candidate in DELIMITERS {
        let widths = field_widths(&sample, candidate);
        let Some(&width) = widths.first() else {
            continue;
        };
        if width < 2 {
            continue;
        }

        let uniform = widths.iter().all(|&w| w == width);
        let beats = match best {
            None => true,
            Some((best_uniform, best_width, _)) => (uniform, width) > (best_uniform, best_width),
        };
        if beats {
            best = Some((uniform, width, candidate));
        }
    }

    let delimiter = best.map(|(_, _, d)| d).unwrap_or(b',');
    tracing::trace!(delimiter = %(delimiter as char).escape_default(), "Detected delimiter");
    Ok(delimiter)
}

/// Field count of each sampled record when split on `delimiter`.
fn field_widths(sample: &[u8], delimiter: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample)
        .records()
        .filter_map(|record| record.ok())
        .map(|record| record.len())
        .collect()
}
