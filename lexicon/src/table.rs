use crate::entry::{Entry, Provenance};
use crate::error::{Error, Result};
use crate::parser::RawRecord;
use indexmap::map::Entry as Slot;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// The non-key attributes of an `Entry`, as shown by `Lexicon::render`.
/// The word itself is the row key and always rendered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Definition,
    Forms,
    CswOnly,
    NwlOnly,
    Points,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Definition,
        Column::Forms,
        Column::CswOnly,
        Column::NwlOnly,
        Column::Points,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Definition => "definition",
            Column::Forms => "forms",
            Column::CswOnly => "csw_only",
            Column::NwlOnly => "nwl_only",
            Column::Points => "points",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    fn cell(self, entry: &Entry) -> String {
        fn opt<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        match self {
            Column::Definition => opt(entry.definition.as_deref()),
            Column::Forms => entry.forms.join(", "),
            Column::CswOnly => opt(entry.csw_only()),
            Column::NwlOnly => opt(entry.nwl_only()),
            Column::Points => opt(entry.points()),
        }
    }
}

/// Which optional columns a table carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Columns {
    provenance: bool,
    points: bool,
}

/// An ordered table of `Entry`s, keyed by word.
///
/// Insertion order is only used for display; lookups and matching don't depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: IndexMap<String, Entry>,
    columns: Columns,
    display_projection: Option<Vec<String>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from wordlist text, one record per line. Blank lines are skipped,
    /// unparseable lines are logged and skipped.
    pub fn new_from_str(input_str: &str) -> Self {
        Self::from_lines(input_str.lines())
    }

    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let records = lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| match RawRecord::new_from_str(line) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(line = i + 1, %err, "skipping unparseable wordlist line");
                    None
                }
            });
        Self::from_records(records)
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::from_entries(records.into_iter().map(Entry::from_record))
    }

    /// Sources are assumed to be sorted & deduplicated. If a word does repeat,
    /// the first occurrence is kept.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut lexicon = Self::new();
        for entry in entries {
            lexicon.columns.provenance |= entry.provenance().is_some();
            lexicon.columns.points |= entry.points().is_some();
            lexicon.insert(entry);
        }
        lexicon
    }

    fn insert(&mut self, entry: Entry) {
        match self.entries.entry(entry.word().to_owned()) {
            Slot::Occupied(_) => {
                debug!(word = entry.word(), "duplicate word, keeping first occurrence");
            }
            Slot::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    /// A new table with the same columns & display projection as `self`, holding `entries`
    pub(crate) fn derive<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut lexicon = Lexicon {
            entries: IndexMap::new(),
            columns: self.columns,
            display_projection: self.display_projection.clone(),
        };
        entries.into_iter().for_each(|e| lexicon.insert(e));
        lexicon
    }

    /// Full outer join of two lexicons on the word.
    ///
    /// Words in both are marked `Provenance::Both`, and `primary`'s definition wins
    /// when both have one. Words in only one side are marked `PrimaryOnly` or
    /// `SecondaryOnly`. The result is sorted by word.
    ///
    /// An empty side is treated as not loaded, and fails with `Error::LexiconNotLoaded`.
    pub fn merge(primary: &Lexicon, secondary: &Lexicon) -> Result<Lexicon> {
        if primary.is_empty() || secondary.is_empty() {
            return Err(Error::LexiconNotLoaded);
        }

        let mut words: Vec<&str> = primary
            .words()
            .chain(secondary.words().filter(|w| !primary.contains(w)))
            .collect();
        words.sort_unstable();

        let entries = words
            .into_iter()
            .filter_map(|word| match (primary.get(word), secondary.get(word)) {
                (Some(a), Some(b)) => Some(a.merged_with(b)),
                (Some(a), None) => Some(a.with_provenance(Provenance::PrimaryOnly)),
                (None, Some(b)) => Some(b.with_provenance(Provenance::SecondaryOnly)),
                (None, None) => None,
            });

        let mut merged = Self::from_entries(entries);
        merged.columns.provenance = true;
        merged.columns.points = primary.columns.points || secondary.columns.points;
        debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            merged = merged.len(),
            "merged lexicons"
        );
        Ok(merged)
    }

    /// Set (or overwrite) the point value of every entry
    pub fn compute_points(&mut self) {
        self.entries.values_mut().for_each(Entry::compute_points);
        self.columns.points = true;
    }

    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The optional columns this table carries, in display order
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|c| match c {
                Column::Definition | Column::Forms => true,
                Column::CswOnly | Column::NwlOnly => self.columns.provenance,
                Column::Points => self.columns.points,
            })
            .collect()
    }

    /// Choose which columns `render` shows. This has no effect on anything but rendering.
    pub fn set_display_projection<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_projection = Some(names.into_iter().map(Into::into).collect());
    }

    pub fn display_projection(&self) -> Option<&[String]> {
        self.display_projection.as_deref()
    }

    pub fn clear_display_projection(&mut self) {
        self.display_projection = None;
    }

    fn projected_columns(&self) -> Result<Vec<Column>> {
        let present = self.columns();
        match &self.display_projection {
            None => Ok(present),
            Some(names) => {
                let selected: Vec<Column> = names
                    .iter()
                    .filter_map(|n| Column::from_name(n))
                    .filter(|c| present.contains(c))
                    .collect();
                if selected.is_empty() {
                    Err(Error::InvalidProjection {
                        columns: names.clone(),
                    })
                } else {
                    Ok(selected)
                }
            }
        }
    }

    /// Render as an aligned plain-text table: the word, then each projected column
    /// which is present. Projected names that aren't columns of this table are skipped,
    /// but if *none* of them are, this fails with `Error::InvalidProjection`.
    pub fn render(&self) -> Result<String> {
        let columns = self.projected_columns()?;

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(self.len() + 1);
        rows.push(
            std::iter::once("word")
                .chain(columns.iter().map(|c| c.name()))
                .map(str::to_owned)
                .collect(),
        );
        for entry in self.iter() {
            rows.push(
                std::iter::once(entry.word().to_owned())
                    .chain(columns.iter().map(|c| c.cell(entry)))
                    .collect(),
            );
        }

        let mut widths = vec![0; columns.len() + 1];
        for row in rows.iter() {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        for row in rows.iter() {
            let line = row
                .iter()
                .zip(widths.iter())
                .map(|(cell, &width)| format!("{:width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            output.push_str(line.trim_end());
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(text: &str) -> Lexicon {
        Lexicon::new_from_str(text)
    }

    #[test]
    fn test_build() {
        let lex = lexicon("CAT a feline [CATS]\n\n  \nDOG\ncat a duplicate\nEMU a bird");
        assert_eq!(lex.words().collect::<Vec<_>>(), vec!["CAT", "DOG", "EMU"]);
        assert_eq!(
            lex.get("CAT").and_then(|e| e.definition.as_deref()),
            Some("a feline")
        );
        assert_eq!(lex.columns(), vec![Column::Definition, Column::Forms]);
        assert!(lex.get("DOG").unwrap().definition.is_none());

        // Files saved with a byte order mark
        let lex = lexicon("\u{feff}AA lava\nAB");
        assert_eq!(lex.words().collect::<Vec<_>>(), vec!["AA", "AB"]);
        assert!(lex.contains("AA"));
    }

    #[test]
    fn test_merge_provenance() {
        let csw = lexicon("CAT\nDOG\nZAX");
        let nwl = lexicon("DOG\nEMU");
        let merged = Lexicon::merge(&csw, &nwl).unwrap();

        assert_eq!(
            merged.words().collect::<Vec<_>>(),
            vec!["CAT", "DOG", "EMU", "ZAX"]
        );
        for entry in merged.iter() {
            let in_csw = csw.contains(entry.word());
            let in_nwl = nwl.contains(entry.word());
            assert_eq!(entry.csw_only(), Some(in_csw && !in_nwl));
            assert_eq!(entry.nwl_only(), Some(in_nwl && !in_csw));
        }
        assert_eq!(merged.get("DOG").unwrap().provenance(), Some(Provenance::Both));
        assert!(merged.columns().contains(&Column::CswOnly));
        assert!(merged.columns().contains(&Column::NwlOnly));

        // Inputs are untouched
        assert_eq!(csw.len(), 3);
        assert!(csw.get("CAT").unwrap().provenance().is_none());
    }

    #[test]
    fn test_merge_definitions() {
        let csw = lexicon("CAT a feline\nDOG");
        let nwl = lexicon("CAT a small feline\nDOG a canine");
        let merged = Lexicon::merge(&csw, &nwl).unwrap();
        assert_eq!(
            merged.get("CAT").unwrap().definition.as_deref(),
            Some("a feline")
        );
        assert_eq!(
            merged.get("DOG").unwrap().definition.as_deref(),
            Some("a canine")
        );

        // Membership doesn't depend on the order, but the winning definition does
        let reversed = Lexicon::merge(&nwl, &csw).unwrap();
        assert_eq!(
            reversed.get("CAT").unwrap().definition.as_deref(),
            Some("a small feline")
        );
        assert_eq!(
            merged.words().collect::<Vec<_>>(),
            reversed.words().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_merge_not_loaded() {
        let csw = lexicon("CAT");
        assert!(matches!(
            Lexicon::merge(&csw, &Lexicon::new()),
            Err(Error::LexiconNotLoaded)
        ));
        assert!(matches!(
            Lexicon::merge(&Lexicon::new(), &csw),
            Err(Error::LexiconNotLoaded)
        ));
    }

    #[test]
    fn test_compute_points() {
        let mut lex = lexicon("CAT\nQUIZ");
        assert!(lex.iter().all(|e| e.points().is_none()));
        lex.compute_points();
        assert_eq!(lex.get("CAT").unwrap().points(), Some(5));
        assert_eq!(lex.get("QUIZ").unwrap().points(), Some(22));
        assert_eq!(lex.columns().last(), Some(&Column::Points));
    }

    #[test]
    fn test_render() {
        let mut lex = lexicon("CAT a feline [CATS]\nAA lava");
        let rendered = lex.render().unwrap();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "word  definition  forms");
        assert_eq!(lines[1], "CAT   a feline    CATS");
        assert_eq!(lines[2], "AA    lava");

        lex.set_display_projection(vec!["points", "bogus"]);
        assert!(matches!(
            lex.render(),
            Err(Error::InvalidProjection { columns }) if columns == vec!["points", "bogus"]
        ));

        lex.compute_points();
        let rendered = lex.render().unwrap();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines, vec!["word  points", "CAT   5", "AA    2"]);

        lex.clear_display_projection();
        assert!(lex.render().unwrap().starts_with("word  definition  forms  points"));
    }

    #[test]
    fn test_render_empty_result() {
        let mut lex = lexicon("CAT a feline
DOG");
        lex.set_display_projection(vec!["bogus"]);
        let result = lex.search("Q");
        assert!(result.is_empty());
        assert!(matches!(
            result.render(),
            Err(Error::InvalidProjection { columns }) if columns == vec!["bogus"]
        ));

        lex.set_display_projection(vec!["definition"]);
        let result = lex.search("Q");
        assert_eq!(result.render().unwrap(), "word  definition\n");
    }
}
