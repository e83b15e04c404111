use crate::document::{Content, Document, Element, NodeId};
use crate::lexer::{LexError, Lexer, Token};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },
    #[error("Unexpected end tag </{0}>")]
    UnexpectedEndTag(String),
    #[error("Unclosed element <{0}>")]
    UnclosedElement(String),
    #[error("Document has no root element")]
    MissingRoot,
    #[error("Unexpected second root element <{0}>")]
    MultipleRoots(String),
    #[error("Unexpected text outside the root element")]
    TextOutsideRoot,
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        tok
    }

    pub fn parse(&mut self) -> Result<Document, ParseError> {
        let mut elements: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;

        loop {
            let tok = self.advance();

            // Outside the root only markup and whitespace may appear
            if stack.is_empty() {
                match tok {
                    Token::Eof => break,
                    Token::Text(text) if text.trim().is_empty() => continue,
                    Token::Text(_) | Token::CData(_) => return Err(ParseError::TextOutsideRoot),
                    Token::Comment(_) | Token::Instruction(_) | Token::Doctype(_) => continue,
                    Token::EndTag(name) => return Err(ParseError::UnexpectedEndTag(name)),
                    Token::StartTag {
                        name,
                        attributes,
                        self_closing,
                    } => {
                        if root.is_some() {
                            return Err(ParseError::MultipleRoots(name));
                        }
                        let id = push_element(&mut elements, None, name, attributes);
                        root = Some(id);
                        if !self_closing {
                            stack.push(id);
                        }
                    }
                }
                continue;
            }

            let Some(&current) = stack.last() else {
                continue;
            };

            match tok {
                Token::Eof => {
                    return Err(ParseError::UnclosedElement(elements[current.0].tag.clone()));
                }
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let id = push_element(&mut elements, Some(current), name, attributes);
                    elements[current.0].content.push(Content::Element(id));
                    if !self_closing {
                        stack.push(id);
                    }
                }
                Token::EndTag(name) => {
                    let expected = &elements[current.0].tag;
                    if *expected != name {
                        return Err(ParseError::MismatchedTag {
                            expected: expected.clone(),
                            found: name,
                        });
                    }
                    stack.pop();
                }
                Token::Text(text) => elements[current.0].content.push(Content::Text(text)),
                Token::Comment(text) => elements[current.0].content.push(Content::Comment(text)),
                Token::CData(text) => elements[current.0].content.push(Content::CData(text)),
                Token::Instruction(text) => {
                    elements[current.0].content.push(Content::Instruction(text))
                }
                // A doctype inside an element is meaningless; drop it
                Token::Doctype(_) => {}
            }
        }

        let root = root.ok_or(ParseError::MissingRoot)?;
        Ok(Document::from_elements(elements, root))
    }
}

fn push_element(
    elements: &mut Vec<Element>,
    parent: Option<NodeId>,
    name: String,
    attributes: Vec<(String, String)>,
) -> NodeId {
    let mut element = Element::new(name);
    element.attributes = attributes;
    element.parent = parent;
    elements.push(element);
    NodeId(elements.len() - 1)
}
