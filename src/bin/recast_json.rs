//! recast-json: convert a MongoDB extended-JSON export to CSV or SQL
//!
//! Usage:
//!   # Read from file, print CSV to stdout
//!   recast-json dump.json --to csv
//!
//!   # Read from stdin, write people.sql (table name "people")
//!   cat dump.json | recast-json --to sql --output people
//!
//!   # Opt in to RFC 4180 quoting instead of the legacy raw cells
//!   recast-json dump.json --to csv --rfc4180

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use recast::convert::{
    json_to_csv, json_to_csv_documents, json_to_sql, json_to_sql_documents, Conversion,
    ConvertOptions, CsvQuoting, Document, SqlQuoting,
};
use std::fs::File;
use std::io::{BufReader, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "recast-json")]
#[command(about = "Convert a MongoDB extended-JSON export to CSV or SQL", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output format
    #[arg(long, short = 't', value_enum)]
    to: Target,

    /// Output base name; writes <name>.<ext> instead of stdout
    #[arg(long, short = 'o')]
    output: Option<String>,

    /// SQL table name (defaults to the output base name, then "json_table")
    #[arg(long)]
    table: Option<String>,

    /// Delimiter joining array values into one cell
    #[arg(long)]
    array_delimiter: Option<String>,

    /// Quote CSV fields per RFC 4180 instead of the legacy raw output
    #[arg(long)]
    rfc4180: bool,

    /// Double embedded single quotes in SQL literals
    #[arg(long)]
    escape_quotes: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Target {
    Csv,
    Sql,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut options = ConvertOptions::default();
    options.base_name = args.output.clone();
    options.table_name = args.table.clone();
    if let Some(delimiter) = args.array_delimiter {
        options.csv.array_delimiter = delimiter.clone();
        options.sql.array_delimiter = delimiter;
    }
    if args.rfc4180 {
        options.csv.quoting = CsvQuoting::Rfc4180;
    }
    if args.escape_quotes {
        options.sql.quoting = SqlQuoting::Escaped;
    }

    let content = read_input(args.input.as_deref())?;

    // Try SIMD parsing first; its serde impl deserializes straight into the
    // order-preserving document maps. simd-json parses in place, so it gets
    // a scratch copy and the fallback re-parses the untouched buffer with
    // serde_json, which reports a proper error for malformed input.
    let mut scratch = content.clone();
    let conversion = match simd_json::serde::from_slice::<Vec<Document>>(&mut scratch) {
        Ok(documents) => match args.to {
            Target::Csv => json_to_csv_documents(&documents, &options)?,
            Target::Sql => json_to_sql_documents(&documents, &options)?,
        },
        Err(_) => {
            let text = String::from_utf8_lossy(&content);
            match args.to {
                Target::Csv => json_to_csv(&text, &options)?,
                Target::Sql => json_to_sql(&text, &options)?,
            }
        }
    };

    write_output(&conversion, args.output.is_some())
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            BufReader::new(file)
                .read_to_end(&mut content)
                .with_context(|| format!("failed to read {}", path))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

fn write_output(conversion: &Conversion, to_file: bool) -> Result<()> {
    if to_file {
        std::fs::write(&conversion.file_name, &conversion.content)
            .with_context(|| format!("failed to write {}", conversion.file_name))?;
        eprintln!("wrote {} ({})", conversion.file_name, conversion.mime_type);
    } else {
        let mut stdout = std::io::stdout();
        stdout.write_all(conversion.content.as_bytes())?;
        writeln!(stdout)?;
    }
    Ok(())
}
