use pest::error::Error as PestError;
use pest::iterators::Pair;
use pest::Parser;

pub type Result<T> = std::result::Result<T, PestError<Rule>>;

#[derive(Parser)]
#[grammar = "wordlist.pest"]
struct WordlistParser;

/// The fields of a single wordlist line, trimmed but otherwise as written.
/// This is used to build an `entry::Entry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub word: String,
    pub definition: Option<String>,
    pub forms: Vec<String>,
}

impl RawRecord {
    /// Parse one line of a wordlist.
    ///
    /// Parsing is tolerant: a bracket which isn't a well-formed trailing forms list
    /// is kept as part of the definition. The only error is a line without a word.
    /// A leading byte order mark is ignored.
    pub fn new_from_str(input_str: &str) -> Result<Self> {
        let input_str = input_str.trim_start_matches('\u{feff}');
        let pairs = WordlistParser::parse(Rule::line, input_str)?;

        let mut record = RawRecord {
            word: String::new(),
            definition: None,
            forms: vec![],
        };
        for pair in pairs.flat_map(|p| p.into_inner()) {
            match pair.as_rule() {
                Rule::word => record.word = pair.as_str().to_owned(),
                Rule::definition => {
                    let definition = pair.as_str().trim();
                    if !definition.is_empty() {
                        record.definition = Some(definition.to_owned());
                    }
                }
                Rule::forms => record.forms = parse_forms(pair),
                _ => (),
            }
        }
        Ok(record)
    }
}

/// Given a `Rule::forms` pair, return each non-empty `Rule::form`, trimmed
fn parse_forms(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::form)
        .map(|p| p.as_str().trim())
        .filter(|form| !form.is_empty())
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_record_fields() {
    fn record(word: &str, definition: Option<&str>, forms: &[&str]) -> RawRecord {
        RawRecord {
            word: word.into(),
            definition: definition.map(|d| d.into()),
            forms: forms.iter().map(|&f| f.into()).collect(),
        }
    }

    // Word only
    assert_eq!(
        RawRecord::new_from_str("AA").unwrap(),
        record("AA", None, &[])
    );

    // Definition, no forms
    assert_eq!(
        RawRecord::new_from_str("AA a rough cindery lava").unwrap(),
        record("AA", Some("a rough cindery lava"), &[]),
    );

    // Definition & forms
    assert_eq!(
        RawRecord::new_from_str("AAH to exclaim in amazement [v AAHED, AAHING, AAHS]").unwrap(),
        record(
            "AAH",
            Some("to exclaim in amazement"),
            &["v AAHED", "AAHING", "AAHS"]
        ),
    );

    // Forms without a definition
    assert_eq!(
        RawRecord::new_from_str("CAT [CATS]").unwrap(),
        record("CAT", None, &["CATS"]),
    );
    assert_eq!(
        RawRecord::new_from_str("CAT a feline []").unwrap(),
        record("CAT", Some("a feline"), &[]),
    );

    // Whitespace around every field is trimmed, empty forms are dropped
    assert_eq!(
        RawRecord::new_from_str("  CAT \t a small feline   [CATS ,  CATTED ,]  ").unwrap(),
        record("CAT", Some("a small feline"), &["CATS", "CATTED"]),
    );
}

#[test]
fn test_record_tolerance() {
    // Malformed brackets are part of the definition
    let record = RawRecord::new_from_str("ABC thing [unclosed").unwrap();
    assert_eq!(record.definition.as_deref(), Some("thing [unclosed"));
    assert!(record.forms.is_empty());

    let record = RawRecord::new_from_str("ABC thing [a, b] trailing").unwrap();
    assert_eq!(record.definition.as_deref(), Some("thing [a, b] trailing"));
    assert!(record.forms.is_empty());

    let record = RawRecord::new_from_str("ABC thing ]a, b[").unwrap();
    assert_eq!(record.definition.as_deref(), Some("thing ]a, b["));
    assert!(record.forms.is_empty());

    // Only the last bracket is a forms list
    let record = RawRecord::new_from_str("ABC see [x] here [ABCS]").unwrap();
    assert_eq!(record.definition.as_deref(), Some("see [x] here"));
    assert_eq!(record.forms, vec!["ABCS".to_owned()]);

    // A line needs a word
    assert!(RawRecord::new_from_str("").is_err());
    assert!(RawRecord::new_from_str("   ").is_err());
    assert!(RawRecord::new_from_str("\u{feff}").is_err());
}

#[test]
fn test_record_bom() {
    let record = RawRecord::new_from_str("\u{feff}AA a rough cindery lava [AAS]").unwrap();
    assert_eq!(record.word, "AA");
    assert_eq!(record.definition.as_deref(), Some("a rough cindery lava"));
    assert_eq!(record.forms, vec!["AAS".to_owned()]);
}
