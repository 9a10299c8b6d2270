use crate::histogram::Bin;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub const BAR_GLYPH: &str = "█";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// Label each bin by its right edge. With more than one bin the first label
/// spells out the full range, since its lower edge is otherwise implicit.
pub fn label_bins(bins: &[Bin]) -> Vec<LabeledValue> {
    let mut bars: Vec<LabeledValue> = bins
        .iter()
        .map(|b| LabeledValue {
            label: format!("{:.2}", b.right()),
            value: b.count as f64,
        })
        .collect();
    if bins.len() > 1 {
        bars[0].label = format!("{:.2} -> {:.2}", bins[0].left(), bins[0].right());
    }
    bars
}

fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}

/// Columns taken by everything except the bar itself.
pub fn gutter_width(bars: &[LabeledValue]) -> usize {
    let label_w = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let value_w = bars.iter().map(|b| fmt_value(b.value).len()).max().unwrap_or(0);
    label_w + value_w + 4 // " |" + "| "
}

pub fn draw_bars<W: Write>(out: &mut W, bars: &[LabeledValue], width: usize) -> io::Result<()> {
    let label_w = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max_v = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    for bar in bars {
        let blen = if max_v > 0.0 {
            ((bar.value.max(0.0) / max_v) * width as f64) as usize
        } else {
            0
        };
        writeln!(
            out,
            "{:<lw$} |{:<bw$}| {}",
            bar.label,
            BAR_GLYPH.repeat(blen.min(width)),
            fmt_value(bar.value),
            lw = label_w,
            bw = width
        )?;
    }
    Ok(())
}
