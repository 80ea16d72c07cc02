//! CSV symbol table loader.
//!
//! Reads `api_symbols.csv`-style tables lazily, one [`SymbolRecord`] per data
//! row in file order. Columns are located by header name, so extra columns and
//! any column order are accepted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{EntryKind, SymbolError, SymbolRecord, Visibility};

const COL_NAME: &str = "name";
const COL_ENTRY: &str = "entry";
const COL_STATUS: &str = "status";
const COL_TYPE: &str = "type";
const COL_PARAMS: &str = "params";

/// Header positions of the columns we care about.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    entry: usize,
    status: usize,
    ty: usize,
    params: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, SymbolError> {
        let find = |col: &str| headers.iter().position(|h| h == col);
        let require = |col: &str| {
            find(col).ok_or_else(|| {
                SymbolError::malformed(Some(1), format!("header is missing the `{}` column", col))
            })
        };

        Ok(Columns {
            name: require(COL_NAME)?,
            entry: require(COL_ENTRY)?,
            status: require(COL_STATUS)?,
            ty: require(COL_TYPE)?,
            params: find(COL_PARAMS),
        })
    }
}

/// Reader for symbol tables.
pub struct SymbolReader<R> {
    reader: csv::Reader<R>,
}

impl SymbolReader<File> {
    /// Open a symbol table on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SymbolError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> SymbolReader<R> {
    /// Wrap any reader producing CSV text.
    pub fn from_reader(rdr: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(rdr);

        SymbolReader { reader }
    }

    /// Validate the header and return the row iterator.
    ///
    /// Header problems are reported here, before any row is read. Row-level
    /// problems surface as `Err` items from the iterator.
    pub fn records(mut self) -> Result<Records<R>, SymbolError> {
        let headers = self.reader.headers()?.clone();
        let columns = Columns::locate(&headers)?;

        tracing::debug!("symbol table columns: {:?}", headers.iter().collect::<Vec<_>>());

        Ok(Records {
            inner: self.reader.into_records(),
            columns,
        })
    }
}

/// Forward-only iterator over the rows of a symbol table.
pub struct Records<R> {
    inner: csv::StringRecordsIntoIter<R>,
    columns: Columns,
}

impl<R: Read> Records<R> {
    fn convert(&self, row: csv::StringRecord) -> Result<SymbolRecord, SymbolError> {
        let line = row.position().map(|p| p.line());
        let cols = self.columns;

        let name = &row[cols.name];
        if name.is_empty() {
            return Err(SymbolError::malformed(line, "symbol name is empty"));
        }

        let entry_kind = EntryKind::parse(&row[cols.entry]);
        let params = match cols.params {
            Some(idx) => row[idx].to_string(),
            None if entry_kind == EntryKind::Function => {
                return Err(SymbolError::malformed(
                    line,
                    format!(
                        "function `{}` found but the header has no `{}` column",
                        name, COL_PARAMS
                    ),
                ));
            }
            None => String::new(),
        };

        Ok(SymbolRecord {
            name: name.to_string(),
            entry_kind,
            visibility: Visibility::parse(&row[cols.status]),
            ty: row[cols.ty].to_string(),
            params,
            line,
        })
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<SymbolRecord, SymbolError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.inner.next()?;
        Some(row.map_err(SymbolError::from).and_then(|row| self.convert(row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<Vec<SymbolRecord>, SymbolError> {
        SymbolReader::from_reader(csv.as_bytes())
            .records()?
            .collect()
    }

    #[test]
    fn test_load_rows_in_order_and_trimmed() {
        let records = load(
            "entry,status,name,type,params\n\
             Function, + , furi_delay_ms ,void, uint32_t\n\
             Variable,-,furi_hal_secret,const char*,\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "furi_delay_ms");
        assert_eq!(records[0].entry_kind, EntryKind::Function);
        assert_eq!(records[0].visibility, Visibility::Public);
        assert_eq!(records[0].params, "uint32_t");
        assert_eq!(records[0].line, Some(2));
        assert_eq!(records[1].ty, "const char*");
        assert_eq!(records[1].visibility, Visibility::Private);
    }

    #[test]
    fn test_quoted_params_with_commas() {
        let records = load(
            "entry,status,name,type,params\n\
             Function,+,furi_thread_set_name,void,\"FuriThread*, const char*\"\n",
        )
        .unwrap();

        assert_eq!(records[0].params, "FuriThread*, const char*");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let records = load("name,extra,entry,status,type\nfoo,x,Variable,+,int\n").unwrap();
        assert_eq!(records[0].name, "foo");
        assert_eq!(records[0].ty, "int");
        assert_eq!(records[0].params, "");
    }

    #[test]
    fn test_missing_required_column() {
        let err = load("entry,status,name\nVariable,+,foo\n").unwrap_err();
        match err {
            SymbolError::MalformedInput { message, .. } => {
                assert!(message.contains("`type`"), "{}", message)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_row_length_mismatch() {
        let err = load(
            "entry,status,name,type,params\n\
             Variable,+,foo,int,\n\
             Variable,+,bar\n",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SymbolError::MalformedInput { line: Some(3), .. }
        ));
    }

    #[test]
    fn test_rows_before_a_bad_row_are_still_yielded() {
        let mut records = SymbolReader::from_reader(
            "entry,status,name,type\nVariable,+,foo,int\nVariable,+\n".as_bytes(),
        )
        .records()
        .unwrap();

        assert_eq!(records.next().unwrap().unwrap().name, "foo");
        assert!(records.next().unwrap().is_err());
    }

    #[test]
    fn test_function_without_params_column() {
        let err = load("entry,status,name,type\nFunction,+,foo,void\n").unwrap_err();
        assert!(matches!(err, SymbolError::MalformedInput { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = load("entry,status,name,type\nVariable,+,  ,int\n").unwrap_err();
        assert!(matches!(
            err,
            SymbolError::MalformedInput { line: Some(2), .. }
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(load("entry,status,name,type,params\n").unwrap().is_empty());
    }
}
