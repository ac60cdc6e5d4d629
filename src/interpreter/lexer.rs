use logos::Logos;

use crate::{ast::LiteralValue, error::ParseError};

/// The wire-level token kind.
///
/// This is the vocabulary the parser consumes. The raw tokenizer below is an
/// implementation detail; `TokenKind` adds the synthetic [`TokenKind::Eof`]
/// that terminates every scanned stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `;`
    SemiColon,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// A name such as `x` or `make_counter`.
    Identifier,
    /// A string literal.
    String,
    /// A number literal.
    Number,
    /// `and`
    And,
    /// `class` (reserved, no v1 grammar production)
    Class,
    /// `else`
    Else,
    /// `false`
    False,
    /// `fun`
    Fun,
    /// `for`
    For,
    /// `if`
    If,
    /// `nil`
    Nil,
    /// `or`
    Or,
    /// `print`
    Print,
    /// `return`
    Return,
    /// `super` (reserved, no v1 grammar production)
    Super,
    /// `this` (reserved, no v1 grammar production)
    This,
    /// `true`
    True,
    /// `var`
    Var,
    /// `while`
    While,
    /// End of input. Appended exactly once per scan.
    Eof,
}

/// A lexical token: kind, exact source slice, optional literal value and the
/// 1-based line the token starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The exact source slice that produced the token. Empty for `Eof`.
    pub lexeme:  String,
    /// The materialized value for `Number`, `String`, `True` and `False`
    /// tokens; `None` for everything else.
    pub literal: Option<LiteralValue>,
    /// 1-based line the token starts on.
    pub line:    usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: &str, literal: Option<LiteralValue>, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.to_string(),
               literal,
               line }
    }
}

/// The raw token produced by the generated tokenizer, before literal
/// materialization, line attribution and `Eof` synthesis.
///
/// Keyword recognition falls out of pattern priority: a `#[token]` keyword
/// beats the identifier regex at equal length, and a longer identifier match
/// (`andes`) beats the keyword prefix (`and`).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    /// Numeric literal tokens, such as `42` or `3.14`. A trailing dot is not
    /// part of the number, so `123.` lexes as a number followed by `.`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// A terminated string literal. May span lines; no escape processing.
    #[regex(r#""[^"]*""#)]
    Str,
    /// A string literal that was still open at end of input. Only matches
    /// when no closing quote remains.
    #[regex(r#""[^"]*"#)]
    UnterminatedString,
    /// Identifier tokens; variable or function names such as `x` or `counter`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    SemiColon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `and`
    #[token("and")]
    And,
    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,
}

impl RawToken {
    /// Maps a raw token onto its wire-level kind.
    ///
    /// The literal-bearing raw tokens are materialized by [`scan`] before it
    /// reaches for this mapping.
    const fn kind(self) -> TokenKind {
        match self {
            Self::Identifier => TokenKind::Identifier,
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::LeftBrace => TokenKind::LeftBrace,
            Self::RightBrace => TokenKind::RightBrace,
            Self::Comma => TokenKind::Comma,
            Self::Dot => TokenKind::Dot,
            Self::Minus => TokenKind::Minus,
            Self::Plus => TokenKind::Plus,
            Self::SemiColon => TokenKind::SemiColon,
            Self::Slash => TokenKind::Slash,
            Self::Star => TokenKind::Star,
            Self::Bang => TokenKind::Bang,
            Self::BangEqual => TokenKind::BangEqual,
            Self::Equal => TokenKind::Equal,
            Self::EqualEqual => TokenKind::EqualEqual,
            Self::Greater => TokenKind::Greater,
            Self::GreaterEqual => TokenKind::GreaterEqual,
            Self::Less => TokenKind::Less,
            Self::LessEqual => TokenKind::LessEqual,
            Self::And => TokenKind::And,
            Self::Class => TokenKind::Class,
            Self::Else => TokenKind::Else,
            Self::Fun => TokenKind::Fun,
            Self::For => TokenKind::For,
            Self::If => TokenKind::If,
            Self::Nil => TokenKind::Nil,
            Self::Or => TokenKind::Or,
            Self::Print => TokenKind::Print,
            Self::Return => TokenKind::Return,
            Self::Super => TokenKind::Super,
            Self::This => TokenKind::This,
            Self::Var => TokenKind::Var,
            Self::While => TokenKind::While,
            Self::Number | Self::Str | Self::UnterminatedString | Self::True | Self::False => {
                unreachable!()
            },
        }
    }
}

/// Incremental line counter over byte offsets.
///
/// Offsets must be queried in non-decreasing order, which the scan loop
/// guarantees because token spans advance monotonically.
struct LineTracker<'src> {
    source: &'src [u8],
    offset: usize,
    line:   usize,
}

impl<'src> LineTracker<'src> {
    fn new(source: &'src str) -> Self {
        Self { source: source.as_bytes(),
               offset: 0,
               line:   1, }
    }

    /// Returns the 1-based line of the given byte offset.
    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.source[self.offset..offset].iter()
                                                     .filter(|&&b| b == b'\n')
                                                     .count();
        self.offset = offset;
        self.line
    }
}

/// Scans a source string into a token sequence.
///
/// Returns the tokens together with every scan error encountered. Errors do
/// not stop the scan; the offending input is skipped and scanning continues,
/// so a single pass surfaces all lexical problems. The returned sequence is
/// always terminated by exactly one [`TokenKind::Eof`] token carrying the
/// final line number.
///
/// # Example
/// ```
/// use quill::interpreter::lexer::{TokenKind, scan};
///
/// let (tokens, errors) = scan("var x = 1;");
///
/// assert!(errors.is_empty());
/// assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
///            vec![TokenKind::Var,
///                 TokenKind::Identifier,
///                 TokenKind::Equal,
///                 TokenKind::Number,
///                 TokenKind::SemiColon,
///                 TokenKind::Eof]);
/// ```
#[must_use]
pub fn scan(source: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut tracker = LineTracker::new(source);
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let line = tracker.line_at(lexer.span().start);

        match result {
            Ok(RawToken::Number) => match slice.parse::<f64>() {
                Ok(number) => {
                    tokens.push(Token::new(TokenKind::Number, slice, Some(number.into()), line));
                },
                Err(_) => errors.push(ParseError::InvalidNumber { literal: slice.to_string(),
                                                                  line }),
            },
            Ok(RawToken::Str) => {
                let contents = &slice[1..slice.len() - 1];
                tokens.push(Token::new(TokenKind::String, slice, Some(contents.into()), line));
            },
            Ok(RawToken::UnterminatedString) => {
                errors.push(ParseError::UnterminatedString { line });
            },
            Ok(RawToken::True) => {
                tokens.push(Token::new(TokenKind::True, slice, Some(true.into()), line));
            },
            Ok(RawToken::False) => {
                tokens.push(Token::new(TokenKind::False, slice, Some(false.into()), line));
            },
            Ok(raw) => tokens.push(Token::new(raw.kind(), slice, None, line)),
            Err(()) => {
                let character = slice.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                errors.push(ParseError::UnexpectedCharacter { character, line });
            },
        }
    }

    let eof_line = tracker.line_at(source.len());
    tokens.push(Token::new(TokenKind::Eof, "", None, eof_line));

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "unexpected scan errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scan_operators() {
        assert_eq!(kinds("(*!) != <= == =;"),
                   vec![TokenKind::LeftParen,
                        TokenKind::Star,
                        TokenKind::Bang,
                        TokenKind::RightParen,
                        TokenKind::BangEqual,
                        TokenKind::LessEqual,
                        TokenKind::EqualEqual,
                        TokenKind::Equal,
                        TokenKind::SemiColon,
                        TokenKind::Eof]);
    }

    #[test]
    fn scan_all_single_characters() {
        assert_eq!(kinds("(){},.-+;/*"),
                   vec![TokenKind::LeftParen,
                        TokenKind::RightParen,
                        TokenKind::LeftBrace,
                        TokenKind::RightBrace,
                        TokenKind::Comma,
                        TokenKind::Dot,
                        TokenKind::Minus,
                        TokenKind::Plus,
                        TokenKind::SemiColon,
                        TokenKind::Slash,
                        TokenKind::Star,
                        TokenKind::Eof]);
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(kinds("and class else false for fun if nil or print return super this true \
                          var while"),
                   vec![TokenKind::And,
                        TokenKind::Class,
                        TokenKind::Else,
                        TokenKind::False,
                        TokenKind::For,
                        TokenKind::Fun,
                        TokenKind::If,
                        TokenKind::Nil,
                        TokenKind::Or,
                        TokenKind::Print,
                        TokenKind::Return,
                        TokenKind::Super,
                        TokenKind::This,
                        TokenKind::True,
                        TokenKind::Var,
                        TokenKind::While,
                        TokenKind::Eof]);
    }

    #[test]
    fn identifiers_are_not_keywords() {
        let (tokens, errors) = scan("f foo _foo t42 andes orchid");
        assert!(errors.is_empty());

        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["f", "foo", "_foo", "t42", "andes", "orchid", ""]);
        assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn number_literals_are_materialized() {
        let (tokens, errors) = scan("123456 123.456");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].literal, Some(LiteralValue::Number(123_456.0)));
        assert_eq!(tokens[1].literal, Some(LiteralValue::Number(123.456)));
        assert_eq!(tokens[1].lexeme, "123.456");
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_number() {
        assert_eq!(kinds("123."),
                   vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn string_literal_keeps_quotes_in_lexeme_only() {
        let (tokens, errors) = scan("\"happy\"");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"happy\"");
        assert_eq!(tokens[0].literal, Some(LiteralValue::Str("happy".to_string())));
    }

    #[test]
    fn string_may_span_lines() {
        let (tokens, errors) = scan("\"one\ntwo\" after");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].literal, Some(LiteralValue::Str("one\ntwo".to_string())));
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].lexeme, "after");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn scanner_keeps_track_of_lines() {
        let (tokens, errors) = scan("1\n2 3\n4");
        assert!(errors.is_empty());
        assert_eq!(tokens.iter().map(|t| t.line).collect::<Vec<_>>(), vec![1, 2, 2, 3, 3]);
    }

    #[test]
    fn comments_are_ignored() {
        assert_eq!(kinds("true // false and everything else\nnil"),
                   vec![TokenKind::True, TokenKind::Nil, TokenKind::Eof]);
    }

    #[test]
    fn comment_reaching_eof_is_fine() {
        assert_eq!(kinds("1 // no newline after this"),
                   vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn unexpected_character_is_reported_and_skipped() {
        let (tokens, errors) = scan("1 @ 2");
        assert_eq!(errors,
                   vec![ParseError::UnexpectedCharacter { character: '@',
                                                          line:      1, }]);
        assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
                   vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn unterminated_string_is_reported_at_its_start_line() {
        let (tokens, errors) = scan("var s =\n\"never closed\n\n");
        assert_eq!(errors, vec![ParseError::UnterminatedString { line: 2 }]);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn every_scan_ends_with_exactly_one_eof() {
        for source in ["", "   ", "var x = 1;", "\"open", "@#$"] {
            let (tokens, _) = scan(source);
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            assert_eq!(eofs, 1, "source {source:?}");
            assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        }
    }

    #[test]
    fn lexemes_reconstruct_the_source_modulo_whitespace() {
        let source = "var answer=(6*7);// trailing\nprint answer;";
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty());

        let mut rest = source;
        for token in &tokens {
            if token.kind == TokenKind::Eof {
                break;
            }
            let at = rest.find(&token.lexeme)
                         .expect("lexeme must be a slice of the remaining source");
            rest = &rest[at + token.lexeme.len()..];
        }
    }

    #[test]
    fn bool_literals_are_materialized() {
        let (tokens, _) = scan("true false");
        assert_eq!(tokens[0].literal, Some(LiteralValue::Bool(true)));
        assert_eq!(tokens[1].literal, Some(LiteralValue::Bool(false)));
    }

    #[test]
    fn identifier_tokens_carry_no_literal() {
        let (tokens, _) = scan("foo nil");
        assert_eq!(tokens[0].literal, None);
        assert_eq!(tokens[1].literal, None);
    }
}
