/// One CSV row as ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    fields: Vec<(&'static str, String)>,
}

impl CsvRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, column: &'static str, value: impl ToString) -> Self {
        self.fields.push((column, value.to_string()));
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(column, _)| *column)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Header from the first record's columns, every value quoted, rows joined by `\n`.
/// Returns an empty string when there are no records.
pub fn to_csv(records: &[CsvRecord]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.columns().collect();
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(headers.join(","));

    for record in records {
        let values: Vec<String> = headers
            .iter()
            .map(|header| quote(record.get(header).unwrap_or_default()))
            .collect();
        rows.push(values.join(","));
    }

    rows.join("\n")
}
