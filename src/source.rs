use std::{
    io,
    num::ParseFloatError,
    ops::Range,
    path::{Path, PathBuf},
    str::FromStr,
};

use logos::Logos;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use time::{macros::format_description, Date};
use tracing::{debug, warn};

#[derive(Logos, Debug, PartialEq)]
enum Token {
    #[token(",")]
    Comma,
    #[regex(r"\r?\n")]
    Crlf,
    #[regex(r"[^,\r\n]+")]
    Field,
}

/// Which column of a row holds the daily average.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// 0-based position in the row.
    Index(usize),
    /// Name looked up in the header row.
    Name(String),
}

impl Default for Column {
    /// The fourth column, as in `Date,Min,Max,Avg`.
    fn default() -> Self {
        Self::Index(3)
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(String::from("Empty column selector"));
        }
        match s.parse() {
            Ok(index) => Ok(Self::Index(index)),
            Err(_) => Ok(Self::Name(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub column: Column,
    /// The first non-blank row is a header and carries no value.
    pub header: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            column: Column::default(),
            header: true,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("Could not read `{}`", path.display())]
    #[diagnostic(code(growing_days::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unexpected character on line {line}")]
    #[diagnostic(
        code(growing_days::lex),
        help("fields are separated by `,` and rows by line breaks")
    )]
    Lex {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Missing header row")]
    #[diagnostic(
        code(growing_days::missing_header),
        help("a named column can only be resolved against a header row")
    )]
    MissingHeader,

    #[error("No column named `{name}`")]
    #[diagnostic(code(growing_days::unknown_column))]
    UnknownColumn {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("header")]
        span: SourceSpan,
    },

    #[error("Line {line} has no field at column {column}")]
    #[diagnostic(code(growing_days::missing_field))]
    MissingField {
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("this row")]
        span: SourceSpan,
    },

    #[error("Line {line}: `{value}` is not a number")]
    #[diagnostic(code(growing_days::bad_value))]
    BadValue {
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a temperature")]
        span: SourceSpan,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Parsed from the first column when it looks like `YYYY-MM-DD`.
    pub date: Option<Date>,
    pub value: f64,
}

/// Daily averages read from a delimited table, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    readings: Vec<Reading>,
}

impl Series {
    pub fn read(path: impl AsRef<Path>, layout: &Layout) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes from {}", text.len(), path.display());
        Self::parse(&path.display().to_string(), &text, layout)
    }

    /// `name` only shows up in diagnostics.
    pub fn parse(name: &str, text: &str, layout: &Layout) -> Result<Self, SourceError> {
        let named = || NamedSource::new(name, text.to_string());
        let mut rows = split_rows(text).map_err(|(line, span)| SourceError::Lex {
            line,
            src: named(),
            span: span.into(),
        })?;

        let header = if layout.header && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };

        let column = match &layout.column {
            Column::Index(index) => *index,
            Column::Name(wanted) => {
                let header = header.as_ref().ok_or(SourceError::MissingHeader)?;
                header
                    .fields
                    .iter()
                    .position(|(field, _)| field.trim() == wanted.as_str())
                    .ok_or_else(|| SourceError::UnknownColumn {
                        name: wanted.clone(),
                        src: named(),
                        span: header.span.clone().into(),
                    })?
            }
        };

        let mut readings: Vec<Reading> = Vec::with_capacity(rows.len());
        for row in rows {
            let (field, span) =
                row.fields
                    .get(column)
                    .ok_or_else(|| SourceError::MissingField {
                        line: row.line,
                        column,
                        src: named(),
                        span: row.span.clone().into(),
                    })?;

            let value = field
                .trim()
                .parse::<f64>()
                .map_err(|source| SourceError::BadValue {
                    line: row.line,
                    value: field.trim().to_string(),
                    source,
                    src: named(),
                    span: span.clone().into(),
                })?;

            let date = row
                .fields
                .first()
                .and_then(|(field, _)| {
                    Date::parse(field.trim(), format_description!("[year]-[month]-[day]")).ok()
                });

            if let (Some(previous), Some(current)) =
                (readings.last().and_then(|r| r.date), date)
            {
                if previous >= current {
                    warn!(line = row.line, "days are not ordered: {previous} then {current}");
                }
            }

            readings.push(Reading { date, value });
        }

        debug!("parsed {} daily averages from {name}", readings.len());
        Ok(Self { readings })
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().map(|reading| reading.value).collect()
    }

    pub fn date_of(&self, day: usize) -> Option<Date> {
        self.readings.get(day).and_then(|reading| reading.date)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl FromStr for Series {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("<input>", s, &Layout::default())
    }
}

#[derive(Debug)]
struct Row<'a> {
    // 1-based, counting blank lines
    line: usize,
    fields: Vec<(&'a str, Range<usize>)>,
    span: Range<usize>,
}

/// Splits `text` into non-blank rows of fields, keeping byte spans for diagnostics.
/// On failure returns the line and span of the offending input.
fn split_rows(text: &str) -> Result<Vec<Row<'_>>, (usize, Range<usize>)> {
    let mut rows = Vec::new();
    let mut lexer = Token::lexer(text);

    let mut line = 1;
    let mut line_start = 0;
    let mut fields: Vec<(&str, Range<usize>)> = Vec::new();
    let mut pending: Option<(&str, Range<usize>)> = None;
    let mut blank = true;

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(Token::Field) => {
                let slice = lexer.slice();
                pending = Some((slice, span));
                blank &= slice.trim().is_empty();
            }
            Ok(Token::Comma) => {
                fields.push(pending.take().unwrap_or(("", span.start..span.start)));
                blank = false;
            }
            Ok(Token::Crlf) => {
                if !blank {
                    fields.push(pending.take().unwrap_or(("", span.start..span.start)));
                    rows.push(Row {
                        line,
                        fields: std::mem::take(&mut fields),
                        span: line_start..span.start,
                    });
                }
                pending = None;
                line += 1;
                line_start = span.end;
                blank = true;
            }
            Err(()) => return Err((line, span)),
        }
    }

    if !blank {
        fields.push(pending.take().unwrap_or(("", text.len()..text.len())));
        rows.push(Row {
            line,
            fields,
            span: line_start..text.len(),
        });
    }

    Ok(rows)
}
