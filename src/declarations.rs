//! Parameter declaration builder.
//!
//! Turns one classified declaration line into a [`Parameter`] record (plus
//! one value record per categorical/ordinal item) and registers it in the
//! parser's parameter index.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    ast::{Comment, DeclSyntax, Domain, LineKind, ParamKind, Parameter, RealBound, Record, ValueRecord},
    lexer::{classify, split_comment},
    parser::{ParseError, Parser},
    store::{ID_PREFIX, Id},
};

static CURRENT_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^\s\[{]+)\s+(?P<kind>[A-Za-z]+)").unwrap());

static CURRENT_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\S+)\s+[A-Za-z]+\s*\[(?P<range>[^\]]*)\]\s*\[(?P<default>[^\]]*)\]\s*(?P<flag>\w+)?$")
        .unwrap()
});

static CURRENT_SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\S+)\s+[A-Za-z]+\s*\{(?P<values>[^}]*)\}\s*\[(?P<default>[^\]]*)\]$").unwrap()
});

static LEGACY_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\s\[{]+)\s*\[(?P<range>[^\]]*)\]\s*\[(?P<default>[^\]]*)\]\s*(?P<flag>\w+)?$")
        .unwrap()
});

static LEGACY_SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\s\[{]+)\s*\{(?P<values>[^}]*)\}\s*\[(?P<default>[^\]]*)\]$").unwrap()
});

/// Declaration text split into its parts, before any validation.
struct RawDeclaration<'t> {
    name: &'t str,
    body: RawBody<'t>,
    default: &'t str,
    log: bool,
}

enum RawBody<'t> {
    Range(&'t str),
    Set(&'t str),
}

fn parse_bounds<T>(
    name: &str,
    range: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<(T, T), ParseError>
where
    T: PartialOrd,
{
    let malformed = || ParseError::MalformedRange {
        name: name.to_string(),
        range: range.trim().to_string(),
    };

    let (lower, upper) = range.split_once(',').ok_or_else(malformed)?;
    let lower = parse(lower).ok_or_else(malformed)?;
    let upper = parse(upper).ok_or_else(malformed)?;
    if lower > upper {
        return Err(malformed());
    }
    Ok((lower, upper))
}

fn check_reserved(text: &str) -> Result<(), ParseError> {
    if text.starts_with(ID_PREFIX) {
        return Err(ParseError::ReservedName(text.to_string()));
    }
    Ok(())
}

impl Parser<'_> {
    /// Classify `line` and build the parameter it declares.
    pub fn parse_declaration_line(&mut self, line: &str) -> Result<Id, ParseError> {
        match classify(line) {
            LineKind::Parameter(kind, syntax) => self.parse_declaration(kind, syntax, line),
            _ => Err(ParseError::MalformedDeclaration(line.trim().to_string())),
        }
    }

    pub fn parse_real(&mut self, line: &str) -> Result<Id, ParseError> {
        self.parse_declaration(ParamKind::Real, DeclSyntax::Current, line)
    }

    pub fn parse_integer(&mut self, line: &str) -> Result<Id, ParseError> {
        self.parse_declaration(ParamKind::Integer, DeclSyntax::Current, line)
    }

    pub fn parse_categorical(&mut self, line: &str) -> Result<Id, ParseError> {
        self.parse_declaration(ParamKind::Categorical, DeclSyntax::Current, line)
    }

    pub fn parse_ordinal(&mut self, line: &str) -> Result<Id, ParseError> {
        self.parse_declaration(ParamKind::Ordinal, DeclSyntax::Current, line)
    }

    /// Build a parameter of `kind` from a declaration line.
    ///
    /// Fails with [`ParseError::KindMismatch`] when the line declares another
    /// kind than the one requested.
    pub fn parse_declaration(&mut self, kind: ParamKind, syntax: DeclSyntax, line: &str) -> Result<Id, ParseError> {
        let (code, comment) = split_comment(line.trim());
        let raw = match syntax {
            DeclSyntax::Current => split_current(kind, code)?,
            DeclSyntax::Legacy => split_legacy(kind, code)?,
        };

        check_reserved(raw.name)?;
        if self.parameters.contains_key(raw.name) {
            return Err(ParseError::DuplicateParameter(raw.name.to_string()));
        }

        let domain = self.build_domain(kind, &raw)?;
        let param = Parameter {
            name: raw.name.to_string(),
            domain,
            log: raw.log && kind.is_numeric(),
        };

        let id = self.store.insert(Record::Parameter(param));
        if let Some(text) = comment {
            let comment = self.store.insert(Record::Comment(Comment {
                text: text.to_string(),
            }));
            self.store.attach_comment(id, comment)?;
        }
        self.parameters.insert(raw.name.to_string(), id);

        debug!(name = raw.name, %kind, %id, "declared parameter");
        Ok(id)
    }

    fn build_domain(&mut self, kind: ParamKind, raw: &RawDeclaration<'_>) -> Result<Domain, ParseError> {
        let name = raw.name;
        let out_of_range = || ParseError::DefaultOutOfRange {
            name: name.to_string(),
            default: raw.default.trim().to_string(),
        };
        let malformed_default = || ParseError::MalformedDefault {
            name: name.to_string(),
            default: raw.default.trim().to_string(),
        };

        match (kind, &raw.body) {
            (ParamKind::Real, RawBody::Range(range)) => {
                let (lower, upper) = parse_bounds(name, range, RealBound::parse)?;
                let default = RealBound::parse(raw.default).ok_or_else(malformed_default)?;
                if default < lower || default > upper {
                    return Err(out_of_range());
                }
                Ok(Domain::Real { lower, upper, default })
            }
            (ParamKind::Integer, RawBody::Range(range)) => {
                let (lower, upper) = parse_bounds(name, range, |t| t.trim().parse::<i64>().ok())?;
                let default = raw.default.trim().parse::<i64>().map_err(|_| malformed_default())?;
                if default < lower || default > upper {
                    return Err(out_of_range());
                }
                Ok(Domain::Integer { lower, upper, default })
            }
            (ParamKind::Categorical | ParamKind::Ordinal, RawBody::Set(set)) => {
                let items: Vec<&str> = set.split(',').map(str::trim).collect();
                if items.iter().any(|item| item.is_empty()) {
                    return Err(ParseError::MalformedRange {
                        name: name.to_string(),
                        range: set.trim().to_string(),
                    });
                }
                for item in &items {
                    check_reserved(item)?;
                }

                let default_text = raw.default.trim();
                let position = items
                    .iter()
                    .position(|item| *item == default_text)
                    .ok_or_else(out_of_range)?;

                let values: Vec<Id> = items
                    .iter()
                    .map(|item| {
                        self.store.insert(Record::Value(ValueRecord {
                            text: item.to_string(),
                        }))
                    })
                    .collect();
                let default = values[position];

                if kind == ParamKind::Categorical {
                    Ok(Domain::Categorical { values, default })
                } else {
                    Ok(Domain::Ordinal { values, default })
                }
            }
            _ => Err(ParseError::MalformedDeclaration(name.to_string())),
        }
    }
}

fn split_current(kind: ParamKind, code: &str) -> Result<RawDeclaration<'_>, ParseError> {
    let malformed = || ParseError::MalformedDeclaration(code.to_string());

    let head = CURRENT_HEAD.captures(code).ok_or_else(malformed)?;
    let keyword = &head["kind"];
    if keyword != kind.as_str() {
        return Err(ParseError::KindMismatch {
            expected: kind,
            found: keyword.to_string(),
        });
    }

    if kind.is_numeric() {
        let caps = CURRENT_NUMERIC.captures(code).ok_or_else(malformed)?;
        let log = match caps.name("flag").map(|m| m.as_str()) {
            None => false,
            Some("log") => true,
            Some(_) => return Err(malformed()),
        };
        Ok(RawDeclaration {
            name: caps.name("name").ok_or_else(malformed)?.as_str(),
            body: RawBody::Range(caps.name("range").ok_or_else(malformed)?.as_str()),
            default: caps.name("default").ok_or_else(malformed)?.as_str(),
            log,
        })
    } else {
        let caps = CURRENT_SET.captures(code).ok_or_else(malformed)?;
        Ok(RawDeclaration {
            name: caps.name("name").ok_or_else(malformed)?.as_str(),
            body: RawBody::Set(caps.name("values").ok_or_else(malformed)?.as_str()),
            default: caps.name("default").ok_or_else(malformed)?.as_str(),
            log: false,
        })
    }
}

/// Legacy lines carry no keyword: `i` in the suffix marks an integer, `l` a
/// log scale, and braces a categorical.
fn split_legacy(kind: ParamKind, code: &str) -> Result<RawDeclaration<'_>, ParseError> {
    let malformed = || ParseError::MalformedDeclaration(code.to_string());

    if let Some(caps) = LEGACY_SET.captures(code) {
        if kind != ParamKind::Categorical {
            return Err(ParseError::KindMismatch {
                expected: kind,
                found: ParamKind::Categorical.to_string(),
            });
        }
        return Ok(RawDeclaration {
            name: caps.name("name").ok_or_else(malformed)?.as_str(),
            body: RawBody::Set(caps.name("values").ok_or_else(malformed)?.as_str()),
            default: caps.name("default").ok_or_else(malformed)?.as_str(),
            log: false,
        });
    }

    let caps = LEGACY_NUMERIC.captures(code).ok_or_else(malformed)?;
    let (found, log) = match caps.name("flag").map(|m| m.as_str()) {
        None => (ParamKind::Real, false),
        Some("l") => (ParamKind::Real, true),
        Some("i") => (ParamKind::Integer, false),
        Some("il" | "li") => (ParamKind::Integer, true),
        Some(_) => return Err(malformed()),
    };
    if found != kind {
        return Err(ParseError::KindMismatch {
            expected: kind,
            found: found.to_string(),
        });
    }

    Ok(RawDeclaration {
        name: caps.name("name").ok_or_else(malformed)?.as_str(),
        body: RawBody::Range(caps.name("range").ok_or_else(malformed)?.as_str()),
        default: caps.name("default").ok_or_else(malformed)?.as_str(),
        log,
    })
}
