use crate::entry::normalize_word;
use crate::error::Result;
use crate::tiles::Tile;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Marks a single-letter slot in a fixed-position pattern
pub const WILDCARD: char = '_';
/// Marks a blank tile in a rack
pub const BLANK: char = '?';

/// Regex syntax which is never meaningful in a rack. `?` is left out: it's a blank.
const REGEX_META: &[char] = &['.', '*', '+', '^', '$', '[', ']', '(', ')', '{', '}', '|', '\\'];

/// A query against a lexicon, in one of three sublanguages
#[derive(Debug, Clone)]
pub enum Query {
    /// Letters at fixed positions, `_` for any letter. Matches whole words of the same length.
    FixedPosition(Vec<Slot>),
    /// Words which can be spelled from a rack of tiles
    Rack(Rack),
    /// A case-insensitive regular expression, anchored only if it anchors itself
    Regex(Regex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Any,
    Literal(char),
}

/// A multiset of letters, plus some number of blanks which can stand in for any letter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    counts: IndexMap<char, usize>,
    blanks: usize,
}

/// Something worth telling the user about a query, which doesn't stop it from running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The pattern is a valid regex, but is being treated as a rack
    LooksLikeRegex,
    /// The rack holds more of a tile than a standard bag does
    ExceedsBag {
        tile: Tile,
        wanted: usize,
        available: u32,
    },
}

/// A classified query, along with any diagnostics from classifying it
#[derive(Debug, Clone)]
pub struct Classified {
    pub query: Query,
    pub diagnostics: Vec<Diagnostic>,
}

impl Query {
    /// Classify `input_str` into a sublanguage. This never fails: anything which isn't a
    /// fixed-position pattern is read as a rack.
    ///
    /// Patterns without a `_` are test-compiled as a regex, but are *always* matched as a
    /// rack (`CA?` is both a valid regex and a perfectly good rack). If the pattern uses regex
    /// syntax a rack can't, a `Diagnostic::LooksLikeRegex` points at `Query::regex`.
    ///
    /// Letters are normalized the same way as lexicon words (`entry::normalize_word`).
    pub fn new_from_str(input_str: &str) -> Classified {
        if input_str.contains(WILDCARD) {
            let slots = normalize_word(input_str)
                .chars()
                .map(|c| match c {
                    WILDCARD => Slot::Any,
                    _ => Slot::Literal(c),
                })
                .collect();
            return Classified {
                query: Query::FixedPosition(slots),
                diagnostics: vec![],
            };
        }

        let mut diagnostics = vec![];
        let compiles = Regex::new(input_str).is_ok();
        if compiles && input_str.contains(REGEX_META) {
            diagnostics.push(Diagnostic::LooksLikeRegex);
        }

        let rack = Rack::new(input_str);
        diagnostics.extend(rack.bag_overflows());
        Classified {
            query: Query::Rack(rack),
            diagnostics,
        }
    }

    /// Build an explicit regular expression query
    pub fn regex(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Query::Regex(regex))
    }
}

impl Rack {
    pub fn new(tiles: &str) -> Self {
        let mut rack = Rack::default();
        for c in normalize_word(tiles).chars() {
            match c {
                BLANK => rack.blanks += 1,
                _ => *rack.counts.entry(c).or_insert(0) += 1,
            }
        }
        rack
    }

    pub fn blanks(&self) -> usize {
        self.blanks
    }

    /// How many of (normalized) `c` the rack holds, not counting blanks
    pub fn count(&self, c: char) -> usize {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Total letters short of spelling `word`, once the rack's own letters are used up
    pub fn deficit(&self, word: &str) -> usize {
        let mut needed: IndexMap<char, usize> = IndexMap::new();
        normalize_word(word)
            .chars()
            .for_each(|c| *needed.entry(c).or_insert(0) += 1);
        needed
            .iter()
            .map(|(&c, &n)| n.saturating_sub(self.count(c)))
            .sum()
    }

    /// Every letter of `word` comes from the rack, with blanks covering the deficit.
    /// The rack may have tiles left over.
    pub fn can_form(&self, word: &str) -> bool {
        self.deficit(word) <= self.blanks
    }

    fn bag_overflows(&self) -> Vec<Diagnostic> {
        let tiles = self
            .counts
            .iter()
            .filter_map(|(&c, &n)| Tile::from_char(c).map(|t| (t, n)))
            .chain(std::iter::once((Tile::BLANK, self.blanks)));
        tiles
            .filter(|&(tile, wanted)| wanted > tile.bag_count() as usize)
            .map(|(tile, wanted)| Diagnostic::ExceedsBag {
                tile,
                wanted,
                available: tile.bag_count(),
            })
            .collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::FixedPosition(slots) => {
                write!(f, "fixed ")?;
                slots.iter().try_for_each(|s| match s {
                    Slot::Any => write!(f, "{}", WILDCARD),
                    Slot::Literal(c) => write!(f, "{}", c),
                })
            }
            Query::Rack(rack) => write!(f, "rack {}", rack),
            Query::Regex(regex) => write!(f, "regex /{}/", regex.as_str()),
        }
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters: Vec<(char, usize)> = self.counts.iter().map(|(&c, &n)| (c, n)).collect();
        letters.sort_unstable();
        for (c, n) in letters {
            (0..n).try_for_each(|_| write!(f, "{}", c))?;
        }
        (0..self.blanks).try_for_each(|_| write!(f, "{}", BLANK))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LooksLikeRegex => write!(
                f,
                "pattern looks like a regular expression, but is matched as a rack"
            ),
            Diagnostic::ExceedsBag {
                tile,
                wanted,
                available,
            } => write!(
                f,
                "rack uses {} {:?} tiles, but a bag only has {}",
                wanted, tile, available
            ),
        }
    }
}

#[test]
fn test_classify() {
    use Slot::*;

    let classified = Query::new_from_str("_o__");
    assert!(classified.diagnostics.is_empty());
    match classified.query {
        Query::FixedPosition(slots) => {
            assert_eq!(slots, vec![Any, Literal('O'), Any, Any]);
        }
        q => panic!("expected fixed-position query, got {}", q),
    }

    // `_` wins over everything, other characters are literal
    match Query::new_from_str("^a_.").query {
        Query::FixedPosition(slots) => {
            assert_eq!(slots, vec![Literal('^'), Literal('A'), Any, Literal('.')]);
        }
        q => panic!("expected fixed-position query, got {}", q),
    }

    match Query::new_from_str("ca?").query {
        Query::Rack(rack) => {
            assert_eq!(rack.count('C'), 1);
            assert_eq!(rack.count('A'), 1);
            assert_eq!(rack.count('T'), 0);
            assert_eq!(rack.blanks(), 1);
        }
        q => panic!("expected rack query, got {}", q),
    }

    // Invalid regex syntax is silently a rack
    let classified = Query::new_from_str("AB(");
    assert!(matches!(classified.query, Query::Rack(_)));
    assert!(classified.diagnostics.is_empty());
}

#[test]
fn test_diagnostics() {
    let classified = Query::new_from_str("^A.*Z$");
    assert!(matches!(classified.query, Query::Rack(_)));
    assert_eq!(classified.diagnostics, vec![Diagnostic::LooksLikeRegex]);

    assert!(Query::new_from_str("LALLA??").diagnostics.is_empty());

    let classified = Query::new_from_str("ZZZ???");
    assert_eq!(
        classified.diagnostics,
        vec![
            Diagnostic::ExceedsBag {
                tile: Tile::from_char('Z').unwrap(),
                wanted: 3,
                available: 1,
            },
            Diagnostic::ExceedsBag {
                tile: Tile::BLANK,
                wanted: 3,
                available: 2,
            },
        ]
    );
    assert_eq!(
        classified.diagnostics[0].to_string(),
        "rack uses 3 Z tiles, but a bag only has 1"
    );
}

#[test]
fn test_display() {
    assert_eq!(Query::new_from_str("__o_e").query.to_string(), "fixed __O_E");
    assert_eq!(Query::new_from_str("lalla??").query.to_string(), "rack AALLL??");
    assert_eq!(
        Query::regex("^a.*z$").unwrap().to_string(),
        "regex /^a.*z$/"
    );
    assert!(Query::regex("(").is_err());
}
