//! Sheet records and the simple lookup tables.
//!
//! A sheet is one CSV file with a header row. Values are always strings;
//! absent cells read as the empty string. The lookup tables here are plain
//! scans with no state; the hierarchy lives in [`crate::table`].

use std::io::Read;

use csv::ReaderBuilder;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::TableError;

/// Raw header-addressed rows of one sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetRecords {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetRecords {
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| TableError::csv(name, e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| TableError::csv(name, e))?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn from_csv_str(name: &str, text: &str) -> Result<Self, TableError> {
        Self::from_reader(name, text.as_bytes())
    }

    /// Index of a named column, case-insensitive.
    pub fn column(&self, column: &str) -> Result<usize, TableError> {
        let wanted = column.to_lowercase();
        self.headers
            .iter()
            .position(|h| *h == wanted)
            .ok_or_else(|| TableError::missing_column(&self.name, column))
    }

    /// Cell text, empty when the row is short.
    pub fn cell(row: &[String], idx: usize) -> &str {
        row.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// A registered caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id_code: String,
    pub name: String,
}

/// `credentials` sheet: `id_code,name`.
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl CredentialTable {
    pub fn from_sheet(sheet: &SheetRecords) -> Result<Self, TableError> {
        let id = sheet.column("id_code")?;
        let name = sheet.column("name")?;
        let entries = sheet
            .rows
            .iter()
            .map(|row| Credential {
                id_code: SheetRecords::cell(row, id).to_string(),
                name: SheetRecords::cell(row, name).to_string(),
            })
            .collect();
        Ok(Self { entries })
    }

    /// First credential whose code matches; empty codes never match.
    pub fn find(&self, id_code: &str) -> Option<&Credential> {
        if id_code.is_empty() {
            return None;
        }
        self.entries.iter().find(|c| c.id_code == id_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `settlement` sheet: `selection,output`.
#[derive(Debug, Clone, Default)]
pub struct SettlementTable {
    entries: Vec<(String, String)>,
}

impl SettlementTable {
    pub fn from_sheet(sheet: &SheetRecords) -> Result<Self, TableError> {
        let selection = sheet.column("selection")?;
        let output = sheet.column("output")?;
        let entries = sheet
            .rows
            .iter()
            .map(|row| {
                (
                    SheetRecords::cell(row, selection).to_string(),
                    SheetRecords::cell(row, output).to_string(),
                )
            })
            .collect();
        Ok(Self { entries })
    }

    /// Output text for a settlement action, if a row exists.
    pub fn output_for(&self, action: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(selection, _)| selection == action)
            .map(|(_, output)| output.as_str())
    }
}

/// `random` sheet: `keyword,answers` with comma-separated answers.
#[derive(Debug, Clone, Default)]
pub struct RandomAnswerTable {
    entries: Vec<(String, Vec<String>)>,
}

impl RandomAnswerTable {
    pub fn from_sheet(sheet: &SheetRecords) -> Result<Self, TableError> {
        let keyword = sheet.column("keyword")?;
        let answers = sheet.column("answers")?;
        let entries = sheet
            .rows
            .iter()
            .map(|row| {
                let list = SheetRecords::cell(row, answers)
                    .split(',')
                    .map(|a| a.trim().to_string())
                    .collect();
                (SheetRecords::cell(row, keyword).to_string(), list)
            })
            .collect();
        Ok(Self { entries })
    }

    /// All answers registered for a keyword (first matching row).
    pub fn answers(&self, keyword: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, list)| list.as_slice())
    }

    /// Pick one answer uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, keyword: &str, rng: &mut R) -> Option<&str> {
        self.answers(keyword)?.choose(rng).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_short_rows_read_as_empty() {
        let sheet = SheetRecords::from_csv_str("credentials", "id_code,name\nA1\n").unwrap();
        let table = CredentialTable::from_sheet(&sheet).unwrap();
        assert_eq!(table.find("A1").unwrap().name, "");
    }

    #[test]
    fn test_missing_column_is_reported() {
        let sheet = SheetRecords::from_csv_str("settlement", "selection\npay\n").unwrap();
        let err = SettlementTable::from_sheet(&sheet).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { ref column, .. } if column == "output"));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let sheet = SheetRecords::from_csv_str("credentials", "ID_CODE, Name\nX9,Mina\n").unwrap();
        let table = CredentialTable::from_sheet(&sheet).unwrap();
        assert_eq!(table.find("X9").unwrap().name, "Mina");
        assert!(table.find("").is_none());
    }

    #[test]
    fn test_random_pick_is_member() {
        let sheet =
            SheetRecords::from_csv_str("random", "keyword,answers\ndice,\"one, two ,three\"\n")
                .unwrap();
        let table = RandomAnswerTable::from_sheet(&sheet).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pick = table.pick("dice", &mut rng).unwrap();
            assert!(["one", "two", "three"].contains(&pick));
        }
        assert!(table.pick("coin", &mut rng).is_none());
    }
}
