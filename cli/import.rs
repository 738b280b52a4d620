use anyhow::Context;
use csv::{StringRecord, StringRecordsIntoIter};
use median_core::{MedianFunc, Value, ValueKind};
use std::io::Read;

/// One input row: the group it belongs to and its value, `None` for NULL.
#[derive(Debug, PartialEq)]
pub struct Row {
    pub line: u64,
    pub group: String,
    pub value: Option<Value>,
}

/// Reads `value` or `group<delimiter>value` records.
///
/// Single-field records belong to the unnamed group `""`. An empty value
/// field or `NULL` (any case) is a null row, so a text value can be neither.
/// With a `comment` byte set, lines starting with it are skipped; by default
/// every line is data, including text values starting with `#`.
pub struct RowReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    kind: ValueKind,
    skip: u64,
}

impl<R: Read> RowReader<R> {
    pub fn new(input: R, delimiter: u8, comment: Option<u8>, skip: u64, kind: ValueKind) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(comment)
            .delimiter(delimiter)
            .from_reader(input)
            .into_records();
        Self {
            records,
            kind,
            skip,
        }
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = anyhow::Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err.into())),
            };
            if self.skip > 0 {
                self.skip -= 1;
                continue;
            }
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row = parse_record(&record, self.kind)
                .with_context(|| format!("row {}", line))
                .map(|(group, value)| Row { line, group, value });
            return Some(row);
        }
    }
}

fn parse_record(record: &StringRecord, kind: ValueKind) -> anyhow::Result<(String, Option<Value>)> {
    // An optional group key precedes the aggregate's argument.
    let args = MedianFunc::ARGS;
    let (group, field) = match record.len() {
        n if n == args => ("", &record[0]),
        n if n == args + 1 => (&record[0], &record[args]),
        n => anyhow::bail!("expected {} or {} fields, got {}", args, args + 1, n),
    };
    let value = if field.is_empty() || field.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(Value::parse(kind, field)?)
    };
    Ok((group.to_string(), value))
}
