use crate::entry::normalize_word;
use crate::query::{Diagnostic, Query, Slot};
use crate::table::Lexicon;
use tracing::debug;

/// `RUNTIME: O(word length)`
fn is_match_fixed(slots: &[Slot], word: &str) -> bool {
    let mut chars = word.chars();
    let all_slots = slots.iter().all(|slot| match (slot, chars.next()) {
        (_, None) => false,
        (Slot::Any, Some(_)) => true,
        (Slot::Literal(l), Some(c)) => *l == c,
    });
    all_slots && chars.next().is_none()
}

impl Query {
    pub fn is_match(&self, word: &str) -> bool {
        match self {
            Query::FixedPosition(slots) => is_match_fixed(slots, &normalize_word(word)),
            Query::Rack(rack) => rack.can_form(word),
            Query::Regex(regex) => regex.is_match(word),
        }
    }
}

impl Lexicon {
    /// Every entry whose word matches `pattern`, as a new table. See `Query::new_from_str`
    /// for how the pattern is read.
    pub fn search(&self, pattern: &str) -> Lexicon {
        self.search_with_diagnostics(pattern).0
    }

    pub fn search_with_diagnostics(&self, pattern: &str) -> (Lexicon, Vec<Diagnostic>) {
        let classified = Query::new_from_str(pattern);
        for diagnostic in classified.diagnostics.iter() {
            debug!(pattern, %diagnostic, "query diagnostic");
        }
        (self.filter_query(&classified.query), classified.diagnostics)
    }

    /// Every entry whose word matches `query`, unchanged and in the same order,
    /// as a new table with the same columns & display projection
    #[cfg(not(feature = "parallel"))]
    pub fn filter_query(&self, query: &Query) -> Lexicon {
        let matches = self.iter().filter(|e| query.is_match(e.word())).cloned();
        let result = self.derive(matches);
        debug!(query = %query, matches = result.len(), "filtered lexicon");
        result
    }

    #[cfg(feature = "parallel")]
    pub fn filter_query(&self, query: &Query) -> Lexicon {
        use crate::entry::Entry;
        use rayon::prelude::*;

        let entries: Vec<&Entry> = self.iter().collect();
        let matches: Vec<Entry> = entries
            .par_iter()
            .filter(|e| query.is_match(e.word()))
            .map(|&e| e.clone())
            .collect();
        let result = self.derive(matches);
        debug!(query = %query, matches = result.len(), "filtered lexicon");
        result
    }
}
