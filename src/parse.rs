//! Text grammar for 2-D polyline sets.
//!
//! A pattern file is zero or more statements of the shape
//!
//! ```text
//! polyline_set["cable1", (255,0,0)] = [ [ (0,0), (1,1), (2,0) ], [ (3,3), (4,4) ] ]
//! ```
//!
//! separated by arbitrary whitespace (newlines included). [`parse_sets`] never
//! fails: a malformed statement is logged and dropped, and parsing resumes at
//! the next `polyline_set` keyword, so one bad set cannot take down its
//! neighbours.

use crate::{
    core::{GridPoint, Rgb},
    error::{CablegridError, CablegridResult},
    model::PolylineSet,
};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Eq,
    /// Anything the lexer could not form a token from; always a parse error.
    Bad(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "`{s}`"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Int(v) => write!(f, "{v}"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::Comma => f.write_str("`,`"),
            Token::Eq => f.write_str("`=`"),
            Token::Bad(s) => write!(f, "bad token `{s}`"),
        }
    }
}

fn lex(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '[' => {
                chars.next();
                tokens.push(Token::LBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::RBracket);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Eq);
            }
            '"' => {
                chars.next();
                let mut s = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    s.push(c);
                }
                if closed {
                    tokens.push(Token::Str(s));
                } else {
                    tokens.push(Token::Bad(format!("\"{s}")));
                }
            }
            c if c == '-' || c.is_ascii_digit() => {
                let mut s = String::new();
                s.push(c);
                chars.next();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        s.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match s.parse::<i64>() {
                    Ok(v) => tokens.push(Token::Int(v)),
                    Err(_) => tokens.push(Token::Bad(s)),
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut s = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' {
                        s.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(s));
            }
            other => {
                chars.next();
                tokens.push(Token::Bad(other.to_string()));
            }
        }
    }

    tokens
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, want: Token, context: &str) -> CablegridResult<()> {
        match self.advance() {
            Some(t) if t == want => Ok(()),
            Some(t) => Err(CablegridError::parse(format!(
                "expected {want} in {context}, found {t}"
            ))),
            None => Err(CablegridError::parse(format!(
                "expected {want} in {context}, found end of input"
            ))),
        }
    }

    fn int(&mut self, context: &str) -> CablegridResult<i64> {
        match self.advance() {
            Some(Token::Int(v)) => Ok(v),
            Some(t) => Err(CablegridError::parse(format!(
                "expected integer in {context}, found {t}"
            ))),
            None => Err(CablegridError::parse(format!(
                "expected integer in {context}, found end of input"
            ))),
        }
    }

    fn coord(&mut self, context: &str) -> CablegridResult<i32> {
        let v = self.int(context)?;
        i32::try_from(v)
            .map_err(|_| CablegridError::parse(format!("coordinate {v} out of range in {context}")))
    }

    fn channel(&mut self) -> CablegridResult<u8> {
        let v = self.int("colour tuple")?;
        u8::try_from(v)
            .map_err(|_| CablegridError::parse(format!("colour channel {v} outside 0..=255")))
    }

    /// `polyline_set["<name>", (<r>,<g>,<b>)] = [ <polyline>, ... ]`
    fn statement(&mut self) -> CablegridResult<PolylineSet> {
        match self.advance() {
            Some(Token::Ident(kw)) if kw == "polyline_set" => {}
            Some(t) => {
                return Err(CablegridError::parse(format!(
                    "expected `polyline_set`, found {t}"
                )));
            }
            None => return Err(CablegridError::parse("expected `polyline_set` at end of input")),
        }

        self.expect(Token::LBracket, "set header")?;
        let name = match self.advance() {
            Some(Token::Str(s)) => s,
            Some(t) => {
                return Err(CablegridError::parse(format!(
                    "expected quoted set name, found {t}"
                )));
            }
            None => return Err(CablegridError::parse("expected quoted set name")),
        };
        self.expect(Token::Comma, "set header")?;
        let colour = self.colour()?;
        self.expect(Token::RBracket, "set header")?;
        self.expect(Token::Eq, "set statement")?;

        let mut set = PolylineSet::with_colour(name, colour);
        set.add_polylines(self.polyline_list()?);
        Ok(set)
    }

    fn colour(&mut self) -> CablegridResult<Rgb> {
        self.expect(Token::LParen, "colour tuple")?;
        let r = self.channel()?;
        self.expect(Token::Comma, "colour tuple")?;
        let g = self.channel()?;
        self.expect(Token::Comma, "colour tuple")?;
        let b = self.channel()?;
        self.expect(Token::RParen, "colour tuple")?;
        Ok(Rgb::new(r, g, b))
    }

    /// `[ [ (x,y), ... ], ... ]` — empty inner groups are skipped, matching
    /// the historical behaviour of dropping point-less polylines.
    fn polyline_list(&mut self) -> CablegridResult<Vec<Vec<GridPoint>>> {
        self.expect(Token::LBracket, "polyline list")?;
        let mut polylines = Vec::new();

        if self.peek() == Some(&Token::RBracket) {
            self.advance();
            return Ok(polylines);
        }

        loop {
            let points = self.polyline()?;
            if !points.is_empty() {
                polylines.push(points);
            }
            match self.advance() {
                Some(Token::Comma) => continue,
                Some(Token::RBracket) => break,
                Some(t) => {
                    return Err(CablegridError::parse(format!(
                        "expected `,` or `]` after polyline, found {t}"
                    )));
                }
                None => {
                    return Err(CablegridError::parse("unterminated polyline list"));
                }
            }
        }

        Ok(polylines)
    }

    fn polyline(&mut self) -> CablegridResult<Vec<GridPoint>> {
        self.expect(Token::LBracket, "polyline")?;
        let mut points = Vec::new();

        if self.peek() == Some(&Token::RBracket) {
            self.advance();
            return Ok(points);
        }

        loop {
            points.push(self.point()?);
            match self.advance() {
                Some(Token::Comma) => continue,
                Some(Token::RBracket) => break,
                Some(t) => {
                    return Err(CablegridError::parse(format!(
                        "expected `,` or `]` after point, found {t}"
                    )));
                }
                None => return Err(CablegridError::parse("unterminated polyline")),
            }
        }

        Ok(points)
    }

    fn point(&mut self) -> CablegridResult<GridPoint> {
        self.expect(Token::LParen, "point")?;
        let x = self.coord("point")?;
        self.expect(Token::Comma, "point")?;
        let y = self.coord("point")?;
        self.expect(Token::RParen, "point")?;
        Ok(GridPoint::new(x, y))
    }

    /// Skip forward to the next `polyline_set` keyword so one malformed
    /// statement cannot swallow the ones after it.
    fn synchronize(&mut self) {
        self.pos += 1;
        while let Some(t) = self.peek() {
            if matches!(t, Token::Ident(kw) if kw == "polyline_set") {
                return;
            }
            self.pos += 1;
        }
    }
}

/// Parse raw pattern text into polyline sets, in first-appearance order.
///
/// Never fails: malformed statements are dropped with a diagnostic and the
/// rest of the input still parses. Empty or match-less input yields an empty
/// vec.
pub fn parse_sets(input: &str) -> Vec<PolylineSet> {
    let mut parser = Parser::new(lex(input));
    let mut sets = Vec::new();

    while !parser.at_end() {
        let start = parser.pos;
        match parser.statement() {
            Ok(set) => sets.push(set),
            Err(err) => {
                tracing::warn!(error = %err, "dropping malformed polyline set");
                parser.pos = start;
                parser.synchronize();
            }
        }
    }

    if sets.is_empty() && !input.trim().is_empty() {
        tracing::warn!("no polyline sets matched in input");
    }

    sets
}

/// Serialize sets back to the text grammar accepted by [`parse_sets`].
pub fn write_sets(sets: &[PolylineSet]) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for set in sets {
        let Rgb { r, g, b } = set.display_colour;
        let _ = write!(out, "polyline_set[\"{}\", ({r},{g},{b})] = [ ", set.name);
        for (i, polyline) in set.polylines.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str("[ ");
            for (j, p) in polyline.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "({},{})", p.x, p.y);
            }
            out.push_str(" ]");
        }
        out.push_str(" ]\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_negative_integers() {
        assert_eq!(
            lex("(-3,4)"),
            vec![
                Token::LParen,
                Token::Int(-3),
                Token::Comma,
                Token::Int(4),
                Token::RParen
            ]
        );
    }

    #[test]
    fn unterminated_string_is_a_bad_token() {
        assert!(lex("\"oops").iter().any(|t| matches!(t, Token::Bad(_))));
    }

    #[test]
    fn colour_channel_out_of_range_drops_the_set() {
        let sets = parse_sets(r#"polyline_set["a", (300,0,0)] = [ [ (0,0), (1,1) ] ]"#);
        assert!(sets.is_empty());
    }

    #[test]
    fn empty_inner_group_is_skipped() {
        let sets = parse_sets(r#"polyline_set["a", (0,0,0)] = [ [ ], [ (0,0), (1,1) ] ]"#);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].polylines.len(), 1);
    }

    #[test]
    fn garbage_between_statements_does_not_eat_the_next_one() {
        let input = r#"
            polyline_set["a", (1,2,3)] = [ [ (0,0), (1,0) ] ]
            ; stray ; tokens ;
            polyline_set["b", (4,5,6)] = [ [ (2,2), (3,3) ] ]
        "#;
        let sets = parse_sets(input);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "a");
        assert_eq!(sets[1].name, "b");
    }
}
