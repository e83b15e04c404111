use std::iter::Peekable;
use std::str::Chars;

/// Markup tokens. Text and attribute values are kept raw (entity references
/// undecoded) so the serializer can reproduce them byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    Comment(String),
    CData(String),
    /// `<?target ...?>`, inner text without the delimiters
    Instruction(String),
    Doctype(String),

    Eof,
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character {0:?} at line {1}")]
    UnexpectedChar(char, usize),
    #[error("Unexpected end of input inside {0}")]
    UnexpectedEof(&'static str),
    #[error("Expected {0} at line {1}")]
    Expected(&'static str, usize),
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '-')
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        // A leading byte-order mark is not part of the document
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn expect_char(&mut self, expected: char, what: &'static str) -> Result<(), LexError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(_) => Err(LexError::Expected(what, self.line)),
            None => Err(LexError::UnexpectedEof(what)),
        }
    }

    /// Consume up to and including `terminator`, returning what came before it.
    fn read_until(&mut self, terminator: &str, what: &'static str) -> Result<String, LexError> {
        let mut s = String::new();
        while let Some(c) = self.bump() {
            s.push(c);
            if s.ends_with(terminator) {
                s.truncate(s.len() - terminator.len());
                return Ok(s);
            }
        }
        Err(LexError::UnexpectedEof(what))
    }

    fn read_name(&mut self) -> Result<String, LexError> {
        let mut name = String::new();
        match self.chars.peek() {
            Some(&c) if is_name_start(c) => {}
            Some(&c) => return Err(LexError::UnexpectedChar(c, self.line)),
            None => return Err(LexError::UnexpectedEof("name")),
        }
        while let Some(&c) = self.chars.peek() {
            if is_name_char(c) {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn read_text(&mut self, first: char) -> String {
        let mut s = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c == '<' {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }

    fn read_attribute_value(&mut self) -> Result<String, LexError> {
        let quote = match self.bump() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => return Err(LexError::Expected("quoted attribute value", self.line)),
            None => return Err(LexError::UnexpectedEof("attribute value")),
        };
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('<') => return Err(LexError::UnexpectedChar('<', self.line)),
                // Values are re-emitted double quoted
                Some('"') => value.push_str("&quot;"),
                Some(c) => value.push(c),
                None => return Err(LexError::UnexpectedEof("attribute value")),
            }
        }
    }

    fn read_start_tag(&mut self) -> Result<Token, LexError> {
        let name = self.read_name()?;
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some('>') => {
                    self.bump();
                    return Ok(Token::StartTag {
                        name,
                        attributes,
                        self_closing: false,
                    });
                }
                Some('/') => {
                    self.bump();
                    self.expect_char('>', "'>' after '/'")?;
                    return Ok(Token::StartTag {
                        name,
                        attributes,
                        self_closing: true,
                    });
                }
                Some(_) => {
                    let key = self.read_name()?;
                    self.skip_whitespace();
                    self.expect_char('=', "'=' after attribute name")?;
                    self.skip_whitespace();
                    let value = self.read_attribute_value()?;
                    attributes.push((key, value));
                }
                None => return Err(LexError::UnexpectedEof("start tag")),
            }
        }
    }

    fn read_markup(&mut self) -> Result<Token, LexError> {
        match self.chars.peek() {
            Some('/') => {
                self.bump();
                let name = self.read_name()?;
                self.skip_whitespace();
                self.expect_char('>', "'>' closing end tag")?;
                Ok(Token::EndTag(name))
            }
            Some('?') => {
                self.bump();
                Ok(Token::Instruction(self.read_until("?>", "processing instruction")?))
            }
            Some('!') => {
                self.bump();
                match self.chars.peek() {
                    Some('-') => {
                        self.bump();
                        self.expect_char('-', "'<!--'")?;
                        Ok(Token::Comment(self.read_until("-->", "comment")?))
                    }
                    Some('[') => {
                        self.bump();
                        for expected in "CDATA[".chars() {
                            self.expect_char(expected, "'<![CDATA['")?;
                        }
                        Ok(Token::CData(self.read_until("]]>", "CDATA section")?))
                    }
                    Some(_) => Ok(Token::Doctype(self.read_until(">", "doctype")?)),
                    None => Err(LexError::UnexpectedEof("markup declaration")),
                }
            }
            Some(_) => self.read_start_tag(),
            None => Err(LexError::UnexpectedEof("tag")),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let c = match self.bump() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        if c == '<' {
            self.read_markup()
        } else {
            Ok(Token::Text(self.read_text(c)))
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            if tok == Token::Eof {
                tokens.push(tok);
                break;
            }
            tokens.push(tok);
        }
        Ok(tokens)
    }
}
