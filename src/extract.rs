//! Extraction of coordinate lists from hand-authored source text.
//!
//! Sources declare their events as `goals = [(x, y), ...]` and `assists = [...]`. Each list
//! is first parsed strictly as a sequence of numeric 2-tuples. Should that fail, the pairs
//! are recovered leniently by pattern matching over the whitespace-stripped contents, so that
//! a stray typo costs at most the pair it occurs in.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::coord::Coordinate;
use crate::dataset::Kind;


/// The list declarations a source may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Goals,
    Assists,
}
impl ListKey {
    pub fn name(&self) -> &'static str {
        match self {
            ListKey::Goals => "goals",
            ListKey::Assists => "assists",
        }
    }

    fn pattern(&self) -> &'static Regex {
        static GOALS: LazyLock<Regex> = LazyLock::new(|| list_pattern(ListKey::Goals));
        static ASSISTS: LazyLock<Regex> = LazyLock::new(|| list_pattern(ListKey::Assists));
        match self {
            ListKey::Goals => &*GOALS,
            ListKey::Assists => &*ASSISTS,
        }
    }
}

impl Display for ListKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The list runs to the first closing bracket, or to the end of an unterminated source.
fn list_pattern(key: ListKey) -> Regex {
    Regex::new(&format!(r"(?s){}\s*=\s*\[(.*?)(?:\]|\z)", key.name())).expect("valid list pattern")
}

static LENIENT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d+(?:\.\d+)?),(\d+(?:\.\d+)?)\)").expect("valid pair pattern")
});

/// As [LENIENT_PAIR], but the final group may also be cut short by the end of the text.
static LENIENT_TRAILING_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d+(?:\.\d+)?),(\d+(?:\.\d+)?)(?:\)|\z)").expect("valid trailing pair pattern")
});

static TITLE_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)plt\.title\(".*?\\n\s*(.*?)"\)"#).expect("valid title pattern")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub goals: Vec<Coordinate>,
    pub assists: Vec<Coordinate>,
}
impl Extraction {
    pub fn of(&self, kind: Kind) -> &[Coordinate] {
        match kind {
            Kind::Goal => &self.goals,
            Kind::Assist => &self.assists,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty() && self.assists.is_empty()
    }
}

/// Extracts the goal and assist lists from `text`. A missing list is empty.
pub fn extract(text: &str) -> Extraction {
    Extraction {
        goals: extract_list(text, ListKey::Goals),
        assists: extract_list(text, ListKey::Assists),
    }
}

pub fn extract_list(text: &str, key: ListKey) -> Vec<Coordinate> {
    let Some(ListContents { contents, terminated }) = list_contents(text, key) else {
        return vec![];
    };
    let contents = contents.trim();
    if contents.is_empty() {
        return vec![];
    }
    match parse_strict(contents) {
        Ok(coordinates) => coordinates,
        Err(err) => {
            debug!("strict parse of '{key}' failed: {err}; recovering pairs leniently");
            if terminated {
                parse_lenient(contents)
            } else {
                parse_lenient_unterminated(contents)
            }
        }
    }
}

struct ListContents<'a> {
    contents: &'a str,
    /// Whether the list was closed by `]` rather than running to the end of the text.
    terminated: bool,
}

fn list_contents(text: &str, key: ListKey) -> Option<ListContents<'_>> {
    let captures = key.pattern().captures(text)?;
    let whole = captures.get(0)?;
    let contents = captures.get(1)?;
    Some(ListContents {
        contents: contents.as_str(),
        terminated: whole.end() > contents.end(),
    })
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrictParseError {
    #[error("expected {expected} at offset {offset}, found '{found}'")]
    Unexpected {
        offset: usize,
        found: char,
        expected: &'static str,
    },

    #[error("expected {0}, found end of input")]
    Truncated(&'static str),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Parses `contents` as a comma-separated sequence of numeric 2-tuples, truncating each
/// number toward zero. A trailing comma is permitted, both after a tuple and inside one, and
/// `#` comments run to the end of their line.
pub fn parse_strict(contents: &str) -> Result<Vec<Coordinate>, StrictParseError> {
    let mut cursor = Cursor::new(contents);
    let mut coordinates = vec![];
    cursor.skip_ignored();
    while !cursor.at_end() {
        coordinates.push(cursor.tuple()?);
        cursor.skip_ignored();
        if cursor.at_end() {
            break;
        }
        cursor.expect(',', "',' between tuples")?;
        cursor.skip_ignored();
    }
    Ok(coordinates)
}

/// Recovers every `(number,number)` group from `contents` after removing all whitespace.
pub fn parse_lenient(contents: &str) -> Vec<Coordinate> {
    recover_pairs(contents, &LENIENT_PAIR)
}

/// Lenient recovery for a list that was never closed, where the final group may also be
/// missing its `)`.
pub fn parse_lenient_unterminated(contents: &str) -> Vec<Coordinate> {
    recover_pairs(contents, &LENIENT_TRAILING_PAIR)
}

fn recover_pairs(contents: &str, pattern: &Regex) -> Vec<Coordinate> {
    let stripped = contents
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    pattern
        .captures_iter(&stripped)
        .filter_map(|captures| {
            let x = truncate(captures.get(1)?.as_str())?;
            let y = truncate(captures.get(2)?.as_str())?;
            Some(Coordinate::new(x, y))
        })
        .collect()
}

fn truncate(number: &str) -> Option<i64> {
    number.parse::<f64>().ok().map(|value| value.trunc() as i64)
}

struct Cursor<'a> {
    text: &'a str,
    offset: usize,
}
impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.offset == self.text.len()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.offset += c.len_utf8();
        }
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => self.bump(),
                Some('#') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<(), StrictParseError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(StrictParseError::Unexpected {
                offset: self.offset,
                found,
                expected,
            }),
            None => Err(StrictParseError::Truncated(expected)),
        }
    }

    fn tuple(&mut self) -> Result<Coordinate, StrictParseError> {
        self.expect('(', "'('")?;
        self.skip_ignored();
        let x = self.number()?;
        self.skip_ignored();
        self.expect(',', "',' between x and y")?;
        self.skip_ignored();
        let y = self.number()?;
        self.skip_ignored();
        if self.peek() == Some(',') {
            self.bump();
            self.skip_ignored();
        }
        self.expect(')', "')'")?;
        Ok(Coordinate::new(x, y))
    }

    fn number(&mut self) -> Result<i64, StrictParseError> {
        let start = self.offset;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        let mut digits = 0;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => digits += 1,
                '.' => {}
                _ => break,
            }
            self.bump();
        }
        let literal = &self.text[start..self.offset];
        if digits == 0 {
            return match self.peek() {
                Some(found) => Err(StrictParseError::Unexpected {
                    offset: self.offset,
                    found,
                    expected: "a number",
                }),
                None => Err(StrictParseError::Truncated("a number")),
            };
        }
        truncate(literal).ok_or_else(|| StrictParseError::InvalidNumber(literal.to_string()))
    }
}

/// Extracts the free-text note from a `plt.title("<heading>\n <note>")` call, where `\n` is
/// the two-character escape. Returns an empty string if there is none.
pub fn extract_annotation(text: &str) -> String {
    TITLE_NOTE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|note| note.as_str().replace('\n', " ").trim().to_string())
        .unwrap_or_default()
}

/// Everything a single source file contributes to the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub extraction: Extraction,
    pub annotation: String,
}
impl Source {
    pub fn parse(text: &str) -> Self {
        Self {
            extraction: extract(text),
            annotation: extract_annotation(text),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }
}
