use crate::bars::label_bins;
use crate::histogram::Histogram;
use histo_common::{HistoError, Result};
use std::path::Path;

pub fn histogram_json(hist: &Histogram) -> serde_json::Value {
    serde_json::json!({
        "bound": hist.bound,
        "bin_width": hist.bin_width,
        "total": hist.total,
        "excluded": hist.excluded,
        "bins": hist.bins,
        "bars": label_bins(&hist.bins),
    })
}

pub fn export_json(output_path: &Path, hist: &Histogram) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, &histogram_json(hist))
        .map_err(|e| HistoError::Other(e.to_string()))?;
    Ok(())
}
