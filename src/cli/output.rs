//! Output formatting utilities

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
///
/// `Auto` means TSV for lists and `Table` (pretty key/value text) for a
/// single record.
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Tsv
            } else {
                OutputFormat::Table
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_depends_on_context() {
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Tsv);
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Json, true), OutputFormat::Json);
    }
}
