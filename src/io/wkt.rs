use std::{error, fmt};

use crate::geom::{Geometry, MultiPolygon, Polygon, Ring};

/// Describes a malformed or unsupported WKT input
#[derive(Debug)]
#[non_exhaustive]
pub enum WktError {
    UnexpectedEnd,
    Unexpected { expected: &'static str, found: String },
    InvalidNumber(String),
    /// Only POLYGON and MULTIPOLYGON are repairable geometry
    UnsupportedType(String),
}

impl error::Error for WktError { }

impl fmt::Display for WktError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "Unexpected end of WKT input"),
            Self::Unexpected { expected, found } => write!(f, "Expected {}, found '{}'", expected, found),
            Self::InvalidNumber(text) => write!(f, "Invalid number '{}'", text),
            Self::UnsupportedType(name) => write!(f, "Unsupported geometry type '{}'", name),
        }
    }
}

/// Parses `POLYGON (...)` or `MULTIPOLYGON (...)` text, including the
/// `EMPTY` forms. Rings may repeat their closing vertex or not; both are
/// accepted.
pub fn parse(input: &str) -> Result<Geometry, WktError> {
    let mut parser = Parser::new(input);
    let geometry = parser.parse_geometry()?;
    parser.expect_end()?;
    Ok(geometry)
}

/// Serializes a repaired multipolygon; the empty set prints as
/// `MULTIPOLYGON EMPTY`.
pub fn to_wkt(multipolygon: &MultiPolygon) -> String {
    if multipolygon.is_empty() {
        return "MULTIPOLYGON EMPTY".to_string();
    }
    let mut out = String::from("MULTIPOLYGON (");
    for (i, polygon) in multipolygon.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_polygon(&mut out, polygon);
    }
    out.push(')');
    out
}

fn write_polygon(out: &mut String, polygon: &Polygon) {
    out.push('(');
    for (i, ring) in polygon.rings().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&ring.to_string());
    }
    out.push(')');
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        self.pos += self
            .rest()
            .len()
            .saturating_sub(self.rest().trim_start().len());
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    fn expect(&mut self, c: char) -> Result<(), WktError> {
        match self.peek() {
            Some(found) if found == c => {
                self.pos += found.len_utf8();
                Ok(())
            }
            Some(found) => Err(WktError::Unexpected {
                expected: match c {
                    '(' => "'('",
                    ')' => "')'",
                    ',' => "','",
                    _ => "punctuation",
                },
                found: found.to_string(),
            }),
            None => Err(WktError::UnexpectedEnd),
        }
    }

    fn expect_end(&mut self) -> Result<(), WktError> {
        match self.peek() {
            None => Ok(()),
            Some(found) => Err(WktError::Unexpected {
                expected: "end of input",
                found: found.to_string(),
            }),
        }
    }

    fn keyword(&mut self) -> Result<String, WktError> {
        self.skip_whitespace();
        let word: String = self
            .rest()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if word.is_empty() {
            return match self.peek() {
                Some(found) => Err(WktError::Unexpected {
                    expected: "a geometry keyword",
                    found: found.to_string(),
                }),
                None => Err(WktError::UnexpectedEnd),
            };
        }
        self.pos += word.len();
        Ok(word.to_ascii_uppercase())
    }

    fn number(&mut self) -> Result<f64, WktError> {
        self.skip_whitespace();
        let text: String = self
            .rest()
            .chars()
            .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
            .collect();
        if text.is_empty() {
            return match self.rest().chars().next() {
                Some(found) => Err(WktError::Unexpected {
                    expected: "a number",
                    found: found.to_string(),
                }),
                None => Err(WktError::UnexpectedEnd),
            };
        }
        self.pos += text.len();
        text.parse().map_err(|_| WktError::InvalidNumber(text))
    }

    fn parse_geometry(&mut self) -> Result<Geometry, WktError> {
        match self.keyword()?.as_str() {
            "POLYGON" => Ok(Geometry::Polygon(self.parse_polygon()?)),
            "MULTIPOLYGON" => Ok(Geometry::MultiPolygon(self.parse_multipolygon()?)),
            other => Err(WktError::UnsupportedType(other.to_string())),
        }
    }

    fn at_empty(&mut self) -> Result<bool, WktError> {
        if matches!(self.peek(), Some('E') | Some('e')) {
            match self.keyword()?.as_str() {
                "EMPTY" => Ok(true),
                other => Err(WktError::Unexpected {
                    expected: "EMPTY",
                    found: other.to_string(),
                }),
            }
        } else {
            Ok(false)
        }
    }

    fn parse_polygon(&mut self) -> Result<Polygon, WktError> {
        if self.at_empty()? {
            return Ok(Polygon::new(Ring::new(Vec::new()), Vec::new()));
        }
        self.expect('(')?;
        let mut rings = vec![self.parse_ring()?];
        while self.peek() == Some(',') {
            self.expect(',')?;
            rings.push(self.parse_ring()?);
        }
        self.expect(')')?;
        let shell = rings.remove(0);
        Ok(Polygon::new(shell, rings))
    }

    fn parse_multipolygon(&mut self) -> Result<MultiPolygon, WktError> {
        let mut multipolygon = MultiPolygon::new();
        if self.at_empty()? {
            return Ok(multipolygon);
        }
        self.expect('(')?;
        multipolygon.push(self.parse_polygon()?);
        while self.peek() == Some(',') {
            self.expect(',')?;
            multipolygon.push(self.parse_polygon()?);
        }
        self.expect(')')?;
        Ok(multipolygon)
    }

    fn parse_ring(&mut self) -> Result<Ring, WktError> {
        self.expect('(')?;
        let mut points = Vec::new();
        loop {
            let x = self.number()?;
            let y = self.number()?;
            points.push([x, y]);
            match self.peek() {
                Some(',') => self.expect(',')?,
                Some(')') => break,
                Some(found) => {
                    return Err(WktError::Unexpected {
                        expected: "',' or ')'",
                        found: found.to_string(),
                    })
                }
                None => return Err(WktError::UnexpectedEnd),
            }
        }
        self.expect(')')?;
        Ok(Ring::new(points))
    }
}
