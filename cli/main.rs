mod import;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cli_table::{Cell, Style, Table};
use import::RowReader;
use median_core::{resolve_comparator, DeclaredType, MedianAggregate, Value};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
};

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputMode {
    Raw,
    Pretty,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// Rows of `value` or `group,value`; stdin when omitted
    file: Option<PathBuf>,
    /// Declared type of the values (int2, int4, int8, timestamptz, float4, float8, text)
    #[clap(short = 't', long = "type", default_value = "float8")]
    value_type: String,
    #[clap(short, long, default_value_t = OutputMode::Raw)]
    output_mode: OutputMode,
    #[clap(short, long, default_value_t = ',')]
    delimiter: char,
    /// Skip lines starting with this character
    #[clap(long)]
    comment: Option<char>,
    /// Skip the first N rows of input
    #[clap(long, default_value_t = 0)]
    skip: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let declared = DeclaredType::from_name(&opts.value_type)?;
    if !opts.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }
    if opts.comment.is_some_and(|c| !c.is_ascii()) {
        anyhow::bail!("comment must be a single ASCII character");
    }
    let input: Box<dyn Read> = match &opts.file {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let results = aggregate(
        input,
        declared,
        opts.delimiter as u8,
        opts.comment.map(|c| c as u8),
        opts.skip,
    )?;
    let mut stdout = io::stdout().lock();
    write_results(&mut stdout, &results, opts.output_mode)?;
    Ok(())
}

fn aggregate(
    input: impl Read,
    declared: DeclaredType,
    delimiter: u8,
    comment: Option<u8>,
    skip: u64,
) -> anyhow::Result<Vec<(String, Option<Value>)>> {
    let kind = resolve_comparator(declared)?.kind();
    let mut agg = MedianAggregate::new(declared);
    for row in RowReader::new(input, delimiter, comment, skip, kind) {
        let row = row?;
        agg.step(row.group, row.value)
            .with_context(|| format!("row {}", row.line))?;
    }
    log::debug!("{} groups of {} read", agg.len(), agg.declared_type());
    Ok(agg.finish()?)
}

fn write_results(
    writer: &mut dyn Write,
    results: &[(String, Option<Value>)],
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    match output_mode {
        OutputMode::Raw => {
            for (group, median) in results {
                let median = match median {
                    Some(value) => value.to_string(),
                    None => "NULL".to_string(),
                };
                if group.is_empty() {
                    writeln!(writer, "{}", median)?;
                } else {
                    writeln!(writer, "{}|{}", group, median)?;
                }
            }
        }
        OutputMode::Pretty => {
            let table_rows: Vec<Vec<_>> = results
                .iter()
                .map(|(group, median)| {
                    vec![
                        group.cell(),
                        median
                            .as_ref()
                            .map(|v| v.to_string())
                            .unwrap_or_default()
                            .cell(),
                    ]
                })
                .collect();
            let table = table_rows
                .table()
                .title(vec!["group".cell().bold(true), "median".cell().bold(true)]);
            writeln!(writer, "{}", table.display()?)?;
        }
    }
    Ok(())
}
