//! recast-csv: convert CSV text to JSON documents or a SQL script
//!
//! Usage:
//!   # Read from file, print JSON to stdout
//!   recast-csv table.csv --to json
//!
//!   # Read from stdin, write people.sql (table name "people")
//!   cat table.csv | recast-csv --to sql --output people
//!
//!   # Opt in to doubling embedded quotes in SQL literals
//!   recast-csv table.csv --to sql --escape-quotes

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use recast::convert::{csv_to_json, csv_to_sql, Conversion, ConvertOptions, SqlQuoting};
use std::fs::File;
use std::io::{BufReader, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "recast-csv")]
#[command(about = "Convert CSV text to JSON documents or a SQL script", long_about = None)]
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

    /// Double embedded single quotes in SQL literals
    #[arg(long)]
    escape_quotes: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Target {
    Json,
    Sql,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut options = ConvertOptions::default();
    options.base_name = args.output.clone();
    options.table_name = args.table.clone();
    if args.escape_quotes {
        options.sql.quoting = SqlQuoting::Escaped;
    }

    let content = read_input(args.input.as_deref())?;

    let conversion = match args.to {
        Target::Json => csv_to_json(&content, &options)?,
        Target::Sql => csv_to_sql(&content, &options)?,
    };

    write_output(&conversion, args.output.is_some())
}

fn read_input(path: Option<&str>) -> Result<String> {
    let mut content = String::new();
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            BufReader::new(file)
                .read_to_string(&mut content)
                .with_context(|| format!("failed to read {}", path))?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut content)
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
