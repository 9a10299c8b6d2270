pub mod bars;
pub mod export;
pub mod histogram;
pub mod reader;

pub use bars::{draw_bars, gutter_width, label_bins, LabeledValue};
pub use export::{export_json, histogram_json};
pub use histo_common::{HistoError, Result};
pub use histogram::{group_to_bins, resolve_bounds, validate_bin_count, Bin, Bound, Histogram};
pub use reader::{read_sources, read_values, resolve_inputs, InputSource};
