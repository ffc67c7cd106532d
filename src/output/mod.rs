pub mod formatter;

pub use formatter::{format_result, format_score, format_tsv, should_use_colors};
