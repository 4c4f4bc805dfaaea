use crate::error::{Error, Result};
use crate::table::Lexicon;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{error, info};

#[cfg(feature = "serialize")]
use crate::entry::{Entry, Provenance};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Read a Zyzzyva-style wordlist: one `WORD[ DEFINITION[ [form, ...]]]` per line
pub fn load_wordlist<P>(filename: P) -> Result<Lexicon>
where
    P: AsRef<Path>,
{
    let file = std::fs::File::open(filename)?;
    let lines = io::BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()?;
    Ok(Lexicon::from_lines(lines.iter().map(String::as_str)))
}

/// One row of a saved lexicon
#[cfg(feature = "serialize")]
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    word: String,
    definition: Option<String>,
    forms: String,
    csw_only: Option<bool>,
    nwl_only: Option<bool>,
    points: Option<u32>,
}

#[cfg(feature = "serialize")]
impl From<&Entry> for CsvRecord {
    fn from(entry: &Entry) -> Self {
        CsvRecord {
            word: entry.word().to_owned(),
            definition: entry.definition.clone(),
            forms: entry.forms.join(", "),
            csw_only: entry.csw_only(),
            nwl_only: entry.nwl_only(),
            points: entry.points(),
        }
    }
}

#[cfg(feature = "serialize")]
impl From<CsvRecord> for Entry {
    fn from(record: CsvRecord) -> Self {
        let provenance = match (record.csw_only, record.nwl_only) {
            (Some(true), _) => Some(Provenance::PrimaryOnly),
            (_, Some(true)) => Some(Provenance::SecondaryOnly),
            (Some(false), Some(false)) => Some(Provenance::Both),
            _ => None,
        };
        let forms = record
            .forms
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_owned)
            .collect();
        Entry::from_parts(
            record.word,
            record.definition.filter(|d| !d.is_empty()),
            forms,
            provenance,
            record.points,
        )
    }
}

/// Read a lexicon saved by `save_csv`, with columns
/// `word, definition, forms, csw_only, nwl_only, points`
#[cfg(feature = "serialize")]
pub fn load_csv<P>(filename: P) -> Result<Lexicon>
where
    P: AsRef<Path>,
{
    let mut reader = csv::Reader::from_path(filename)?;
    let entries = reader
        .deserialize::<CsvRecord>()
        .map(|r| r.map(Entry::from))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Lexicon::from_entries(entries))
}

#[cfg(feature = "serialize")]
pub fn save_csv<P>(lexicon: &Lexicon, filename: P) -> Result<()>
where
    P: AsRef<Path>,
{
    let mut writer = csv::Writer::from_path(filename)?;
    for entry in lexicon.iter() {
        writer.serialize(CsvRecord::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}

/// Best-effort loading of a primary & secondary wordlist, and the lexicon merged from them.
///
/// Load failures are logged and leave the slot empty rather than returning an error;
/// merging without both sides loaded is an error.
#[derive(Debug, Default)]
pub struct Loader {
    pub primary: Option<Lexicon>,
    pub secondary: Option<Lexicon>,
    pub data: Option<Lexicon>,
}

fn load_logged(name: &str, path: &Path, load: fn(&Path) -> Result<Lexicon>) -> Option<Lexicon> {
    match load(path) {
        Ok(lexicon) => {
            info!(source = name, path = %path.display(), words = lexicon.len(), "loaded lexicon");
            Some(lexicon)
        }
        Err(err) => {
            error!(source = name, path = %path.display(), %err, "error loading lexicon");
            None
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_primary<P: AsRef<Path>>(&mut self, path: P) -> Option<&Lexicon> {
        self.primary = load_logged("primary", path.as_ref(), |p| load_wordlist(p));
        self.primary.as_ref()
    }

    pub fn load_secondary<P: AsRef<Path>>(&mut self, path: P) -> Option<&Lexicon> {
        self.secondary = load_logged("secondary", path.as_ref(), |p| load_wordlist(p));
        self.secondary.as_ref()
    }

    /// Load a previously merged lexicon
    #[cfg(feature = "serialize")]
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Option<&Lexicon> {
        self.data = load_logged("merged", path.as_ref(), |p| load_csv(p));
        self.data.as_ref()
    }

    pub fn create_merged(&mut self) -> Result<&Lexicon> {
        match (&self.primary, &self.secondary) {
            (Some(primary), Some(secondary)) => {
                let merged = Lexicon::merge(primary, secondary)?;
                Ok(&*self.data.insert(merged))
            }
            _ => Err(Error::LexiconNotLoaded),
        }
    }

    /// Load both wordlists, then merge them
    pub fn load_merged<P, Q>(&mut self, primary: P, secondary: Q) -> Result<&Lexicon>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        self.load_primary(primary);
        self.load_secondary(secondary);
        self.create_merged()
    }

    #[cfg(feature = "serialize")]
    pub fn save_csv<P: AsRef<Path>>(&self, lexicon: &Lexicon, path: P) -> Result<()> {
        save_csv(lexicon, path.as_ref())?;
        info!(path = %path.as_ref().display(), words = lexicon.len(), "saved lexicon");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn wordlist(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_wordlist() {
        let file = wordlist("AA a rough cindery lava [AAS]\n\nAAH to exclaim\nzax\n");
        let lex = load_wordlist(file.path()).unwrap();
        assert_eq!(lex.words().collect::<Vec<_>>(), vec!["AA", "AAH", "ZAX"]);
        assert_eq!(lex.get("AA").unwrap().forms, vec!["AAS"]);

        assert!(matches!(
            load_wordlist("/nonexistent/wordlist.txt"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_loader() {
        let csw = wordlist("CAT a feline\nZAX a tool\n");
        let nwl = wordlist("CAT a small feline\nEMU a bird\n");

        let mut loader = Loader::new();
        assert!(loader.load_primary(csw.path()).is_some());
        assert!(loader.load_secondary("/nonexistent/nwl.txt").is_none());
        assert!(matches!(loader.create_merged(), Err(Error::LexiconNotLoaded)));
        assert!(loader.data.is_none());

        let merged = loader.load_merged(csw.path(), nwl.path()).unwrap();
        assert_eq!(merged.words().collect::<Vec<_>>(), vec!["CAT", "EMU", "ZAX"]);
        assert_eq!(merged.get("ZAX").unwrap().csw_only(), Some(true));
        assert_eq!(merged.get("EMU").unwrap().nwl_only(), Some(true));
        assert!(loader.data.is_some());
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_csv_roundtrip() {
        let csw = Lexicon::new_from_str("CAT a feline, small [CATS, CATTED]\nZAX\n");
        let nwl = Lexicon::new_from_str("CAT\nEMU a \"bird\"\n");
        let mut merged = Lexicon::merge(&csw, &nwl).unwrap();
        merged.compute_points();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.csv");
        save_csv(&merged, &path).unwrap();
        let loaded = load_csv(&path).unwrap();

        assert_eq!(loaded, merged);
        assert_eq!(loaded.columns(), merged.columns());
        assert_eq!(
            loaded.words().collect::<Vec<_>>(),
            merged.words().collect::<Vec<_>>()
        );

        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("word,definition,forms,csw_only,nwl_only,points\n"));

        let mut loader = Loader::new();
        assert!(loader.load_csv(dir.path().join("missing.csv")).is_none());
        assert_eq!(loader.load_csv(&path), Some(&merged));
        let again = dir.path().join("again.csv");
        loader.save_csv(&merged, &again).unwrap();
        assert_eq!(std::fs::read_to_string(&again).unwrap(), header);
    }
}
