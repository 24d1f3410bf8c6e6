// Two-pass parser for the wifi scan text format.
//
// The format is line oriented:
//
//   ~^~Kitchen~^~
//   aa:bb:cc:dd:ee:01~~HomeNet~~-48
//   aa:bb:cc:dd:ee:02~~Guest~~-71
//
//   ~^~Bedroom~^~
//   aa:bb:cc:dd:ee:01~~HomeNet~~-63
//
// A `~^~` line opens a new scan for the named location. Every other non-blank
// line is a reading: the first `~~` field is the MAC address and the last
// field is the signal strength in dBm.
//
// The first pass discovers the column set (every distinct MAC, in order of
// first appearance) so the second pass can allocate each row at full width.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::matrix::FeatureMatrix;

const LOCATION_MARKER: &str = "~^~";
const FIELD_SEPARATOR: &str = "~~";

/// One classified, non-blank line of a scan file.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Location(&'a str),
    Reading { mac: &'a str, strength: &'a str },
}

/// Classify a raw line. Returns `Ok(None)` for blank lines.
fn classify(line: &str, line_no: usize) -> Result<Option<Line<'_>>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    if let Some(rest) = line.strip_prefix(LOCATION_MARKER) {
        let label = rest.trim_end();
        let label = label.strip_suffix(LOCATION_MARKER).unwrap_or(label);
        return Ok(Some(Line::Location(label.trim())));
    }

    let mut fields = line.split(FIELD_SEPARATOR);
    let mac = fields.next().unwrap_or_default().trim();
    let strength = match fields.last() {
        Some(s) => s.trim(),
        None => anyhow::bail!(
            "line {line_no}: malformed reading {line:?} (expected `mac~~...~~strength`)"
        ),
    };
    if mac.is_empty() {
        anyhow::bail!("line {line_no}: reading has an empty MAC address");
    }

    Ok(Some(Line::Reading { mac, strength }))
}

/// Read and parse a scan file from disk.
pub fn parse_scan_file(path: &Path) -> Result<FeatureMatrix> {
    info!(path = %path.display(), "Reading scan file");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scan file {}", path.display()))?;
    parse_scan_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse scan text into a feature matrix.
pub fn parse_scan_str(text: &str) -> Result<FeatureMatrix> {
    // Pass 1: column discovery
    let mut columns: HashMap<&str, usize> = HashMap::new();
    let mut access_points: Vec<String> = Vec::new();
    let mut location_count = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        match classify(raw, idx + 1)? {
            Some(Line::Location(_)) => location_count += 1,
            Some(Line::Reading { mac, .. }) => {
                if !columns.contains_key(mac) {
                    columns.insert(mac, access_points.len());
                    access_points.push(mac.to_string());
                }
            }
            None => {}
        }
    }

    if location_count == 0 {
        anyhow::bail!("no location scans found (expected lines starting with `{LOCATION_MARKER}`)");
    }

    debug!(
        locations = location_count,
        access_points = access_points.len(),
        "Discovered matrix dimensions"
    );

    // Pass 2: fill rows
    let width = access_points.len();
    let mut labels: Vec<String> = Vec::with_capacity(location_count);
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(location_count);

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        match classify(raw, line_no)? {
            Some(Line::Location(label)) => {
                labels.push(label.to_string());
                rows.push(vec![f64::NAN; width]);
            }
            Some(Line::Reading { mac, strength }) => {
                let Some(row) = rows.last_mut() else {
                    anyhow::bail!("line {line_no}: reading for {mac} appears before any location header");
                };
                let value: f64 = strength.parse().with_context(|| {
                    format!("line {line_no}: invalid signal strength {strength:?} for {mac}")
                })?;
                // f64 parsing accepts "nan" and "inf", neither is a reading
                if !value.is_finite() {
                    anyhow::bail!(
                        "line {line_no}: invalid signal strength {strength:?} for {mac} (must be a finite number)"
                    );
                }
                // Column was registered in pass 1
                let col = columns[mac];
                row[col] = value;
            }
            None => {}
        }
    }

    let matrix = FeatureMatrix {
        labels,
        access_points,
        rows,
    };

    info!(
        locations = matrix.n_locations(),
        access_points = matrix.n_access_points(),
        missing = matrix.missing_count(),
        "Parsed scan file"
    );

    Ok(matrix)
}
