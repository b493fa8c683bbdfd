use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const ID_COLUMN: &str = "URL_ID";
pub const URL_COLUMN: &str = "URL";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Input table has no {0:?} column")]
    MissingColumn(&'static str),
}

/// One page to analyze, as listed in the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub id: String,
    pub url: String,
}

impl UrlEntry {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        UrlEntry {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Read entries from a headered table; `.tsv` files are tab-separated, anything
/// else comma-separated. Every data row yields an entry, even with an empty URL.
pub fn read_entries(path: &Path) -> Result<Vec<UrlEntry>, InputError> {
    let reader = builder(path).from_path(path)?;
    collect_entries(reader)
}

fn builder(path: &Path) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    let is_tsv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
    if is_tsv {
        builder.delimiter(b'\t');
    }
    builder.flexible(true);
    builder
}

fn collect_entries<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<UrlEntry>, InputError> {
    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(InputError::MissingColumn(name))
    };
    let id_idx = column(ID_COLUMN)?;
    let url_idx = column(URL_COLUMN)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or_default().trim().to_string();
        entries.push(UrlEntry::new(field(id_idx), field(url_idx)));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Vec<UrlEntry>, InputError> {
        collect_entries(csv::ReaderBuilder::new().flexible(true).from_reader(raw.as_bytes()))
    }

    #[test]
    fn reads_rows_in_order() {
        let entries = parse(
            "URL_ID,URL\n\
             37,https://example.com/a\n\
             38,https://example.com/b\n\
             39.5,https://example.com/c\n",
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![
                UrlEntry::new("37", "https://example.com/a"),
                UrlEntry::new("38", "https://example.com/b"),
                UrlEntry::new("39.5", "https://example.com/c"),
            ]
        );
    }

    #[test]
    fn columns_found_by_name() {
        let entries = parse(
            "notes, URL ,URL_ID\n\
             skip me,https://example.com/x,a-1\n",
        )
        .unwrap();
        assert_eq!(entries, vec![UrlEntry::new("a-1", "https://example.com/x")]);
    }

    #[test]
    fn empty_url_still_yields_an_entry() {
        let entries = parse("URL_ID,URL\n1,\n2,https://example.com\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], UrlEntry::new("1", ""));
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = parse("ID,URL\n1,https://example.com\n").unwrap_err();
        assert!(matches!(err, InputError::MissingColumn("URL_ID")));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_entries(Path::new("tests/fixtures/no_such_input.csv")).unwrap_err();
        assert!(matches!(err, InputError::Csv(_)));
    }

    #[test]
    fn reads_tsv_by_extension() {
        let entries = read_entries(Path::new("tests/fixtures/urls.tsv")).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], UrlEntry::new("blog-2", "https://example.com/posts/2"));
    }
}
