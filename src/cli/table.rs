//! List output in tabular formats
//!
//! Rows arrive already rendered by the admin layer; this module only lays
//! them out.

use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::admin::ListRow;
use crate::cli::helpers::{single_line, truncate_str};
use crate::cli::OutputFormat;

/// Widest cell shown in bordered tables before truncation
const TABLE_CELL_WIDTH: usize = 40;

/// Write rendered rows to stdout
///
/// Only the tabular formats (`Table`, `Tsv`, `Csv`, `Id`) are handled here;
/// structured formats serialize whole records instead.
pub fn print_rows(headers: &[&str], rows: &[ListRow], format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_rows(&mut out, headers, rows, format)?;
    out.flush().into_diagnostic()
}

/// Layout worker behind [`print_rows`]
pub fn write_rows<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[ListRow],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().map(|h| h.to_string()));
            for row in rows {
                builder.push_record(row.texts().iter().map(|t| truncate_str(t, TABLE_CELL_WIDTH)));
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            writeln!(out, "{}", table).into_diagnostic()?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(headers).into_diagnostic()?;
            for row in rows {
                writer.write_record(row.texts()).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Id => {
            for row in rows {
                writeln!(out, "{}", row.id).into_diagnostic()?;
            }
        }
        _ => {
            writeln!(out, "{}", headers.join("\t").to_uppercase()).into_diagnostic()?;
            for row in rows {
                let cells: Vec<String> = row.texts().iter().map(|t| single_line(t)).collect();
                writeln!(out, "{}", cells.join("\t")).into_diagnostic()?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::FieldValue;

    fn rows() -> Vec<ListRow> {
        vec![
            ListRow {
                id: 1,
                cells: vec![FieldValue::Integer(1), FieldValue::from("Acme"), FieldValue::from("X1")],
            },
            ListRow {
                id: 2,
                cells: vec![FieldValue::Integer(2), FieldValue::from("Hooli, Inc."), FieldValue::Null],
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_rows(&mut buf, &["ID", "Manufacturer", "Model"], &rows(), format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_tsv_output() {
        assert_eq!(
            render(OutputFormat::Tsv),
            "ID\tMANUFACTURER\tMODEL\n1\tAcme\tX1\n2\tHooli, Inc.\t\n"
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = render(OutputFormat::Csv);
        assert!(csv.starts_with("ID,Manufacturer,Model\n"));
        assert!(csv.contains("2,\"Hooli, Inc.\",\n"));
    }

    #[test]
    fn test_id_output() {
        assert_eq!(render(OutputFormat::Id), "1\n2\n");
    }

    #[test]
    fn test_table_has_headers_and_cells() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("Manufacturer"));
        assert!(table.contains("Hooli, Inc."));
    }
}
