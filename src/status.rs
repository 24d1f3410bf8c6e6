// Status display. Shows the configured input, output directory, and charts
// already rendered there.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;

/// Display setup status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    let scan_file = &config.scan_file;
    if scan_file.exists() {
        let file_size = std::fs::metadata(scan_file)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());
        println!("Scan file: {} ({})", scan_file.display(), file_size);
    } else {
        println!("Scan file: {} (not found)", scan_file.display());
        println!("  Set WIFILOC_SCAN_FILE or pass a path to `wifiloc analyze`");
    }

    println!(
        "Imputation: missing readings become {} dBm",
        config.no_signal_dbm
    );
    println!(
        "Histogram grid: {} subplots per row, {} output",
        config.subplots_per_row,
        config.image_format.extension()
    );

    let output_dir = &config.output_dir;
    if !output_dir.exists() {
        println!("Output directory: {} (not created yet)", output_dir.display());
        println!("\nRun `wifiloc analyze` to render charts.");
        return Ok(());
    }

    println!("Output directory: {}", output_dir.display());
    let outputs = list_outputs(output_dir)?;
    if outputs.is_empty() {
        println!("  No charts or reports yet");
    } else {
        for (name, size) in &outputs {
            println!("  {} ({})", name, format_bytes(*size));
        }
    }

    Ok(())
}

/// Chart and report files in `dir`, sorted by name.
fn list_outputs(dir: &Path) -> Result<Vec<(String, u64)>> {
    let mut outputs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_output = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e, "png" | "svg" | "md" | "json"));
        if is_output {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            outputs.push((entry.file_name().to_string_lossy().into_owned(), size));
        }
    }
    outputs.sort();
    Ok(outputs)
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
