use crate::error::Result;
use crate::parser::RawRecord;
use crate::tiles::word_points;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Which of two merged wordlists contain a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Both,
    PrimaryOnly,
    SecondaryOnly,
}

/// One word of a lexicon, with everything known about it.
///
/// `provenance` is only set by merging two lexicons, and `points` only by
/// `Lexicon::compute_points`; both are `None` before that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    word: String,
    pub definition: Option<String>,
    pub forms: Vec<String>,
    provenance: Option<Provenance>,
    points: Option<u32>,
}

/// Uppercase `text`, decomposing accented letters and dropping their marks
pub fn normalize_word(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .collect()
}

impl Entry {
    pub fn new(word: &str) -> Self {
        Entry {
            word: normalize_word(word),
            definition: None,
            forms: vec![],
            provenance: None,
            points: None,
        }
    }

    /// Parse a single wordlist line
    pub fn new_from_str(line: &str) -> Result<Self> {
        Ok(Self::from_record(RawRecord::new_from_str(line)?))
    }

    pub fn from_record(record: RawRecord) -> Self {
        Entry {
            definition: record.definition,
            forms: record.forms,
            ..Entry::new(&record.word)
        }
    }

    pub(crate) fn from_parts(
        word: String,
        definition: Option<String>,
        forms: Vec<String>,
        provenance: Option<Provenance>,
        points: Option<u32>,
    ) -> Self {
        Entry {
            word,
            definition,
            forms,
            provenance,
            points,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    pub fn csw_only(&self) -> Option<bool> {
        self.provenance.map(|p| p == Provenance::PrimaryOnly)
    }

    pub fn nwl_only(&self) -> Option<bool> {
        self.provenance.map(|p| p == Provenance::SecondaryOnly)
    }

    pub fn points(&self) -> Option<u32> {
        self.points
    }

    pub(crate) fn compute_points(&mut self) {
        self.points = Some(word_points(&self.word));
    }

    pub(crate) fn with_provenance(&self, provenance: Provenance) -> Self {
        Entry {
            provenance: Some(provenance),
            ..self.clone()
        }
    }

    /// Combine the same word from two lexicons. `self`'s attributes win
    /// where both are present; forms are the union of both.
    pub(crate) fn merged_with(&self, other: &Entry) -> Self {
        debug_assert_eq!(self.word, other.word);
        let mut forms = self.forms.clone();
        for form in other.forms.iter() {
            if !forms.contains(form) {
                forms.push(form.clone());
            }
        }
        Entry {
            word: self.word.clone(),
            definition: self.definition.clone().or_else(|| other.definition.clone()),
            forms,
            provenance: Some(Provenance::Both),
            points: self.points.or(other.points),
        }
    }
}
