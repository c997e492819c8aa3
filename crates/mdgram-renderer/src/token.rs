//! Block-level tokenizer over the `pulldown-cmark` event stream.
//!
//! Produces one [`Token`] per block element, nested blocks included, in the
//! order the renderer encounters them. Code tokens carry the same ordinal
//! the renderer hands to [`CodeBlockProcessor::process`](crate::CodeBlockProcessor::process).

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::fence_language;
use crate::util::heading_level_to_num;

/// A block-level unit of a markdown document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// What kind of block this is, with kind-specific data.
    pub kind: TokenKind,
    /// Exact source text of the block.
    pub raw: String,
    /// Nesting level; 0 for top-level blocks.
    pub depth: usize,
}

impl Token {
    /// Code block data, if this is a code token.
    #[must_use]
    pub fn code(&self) -> Option<&CodeToken> {
        match &self.kind {
            TokenKind::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Whether this token sits at the top level of the document.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }
}

/// Block kinds recognized by the tokenizer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenKind {
    Heading(u8),
    Paragraph,
    Code(CodeToken),
    Table,
    BlockQuote,
    List { ordered: bool },
    Item,
    Rule,
    Html,
    FootnoteDefinition,
    DefinitionList,
    Metadata,
}

impl TokenKind {
    /// Stable lowercase name of the kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Heading(_) => "heading",
            Self::Paragraph => "paragraph",
            Self::Code(_) => "code",
            Self::Table => "table",
            Self::BlockQuote => "blockquote",
            Self::List { .. } => "list",
            Self::Item => "list_item",
            Self::Rule => "hr",
            Self::Html => "html",
            Self::FootnoteDefinition => "footnote",
            Self::DefinitionList => "definition_list",
            Self::Metadata => "metadata",
        }
    }
}

/// Code block data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CodeToken {
    /// First word of the fence info string; `None` for indented blocks and
    /// fences without info.
    pub language: Option<String>,
    /// Literal content of the block.
    pub body: String,
    /// Zero-based ordinal among all code blocks of the document.
    pub index: usize,
}

/// Split markdown into block tokens.
///
/// `options` must match the options used for rendering the same text.
#[must_use]
pub fn tokenize(markdown: &str, options: Options) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut open_code: Option<usize> = None;
    let mut code_index = 0usize;

    for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                let Some(kind) = block_kind(&tag, &mut code_index) else {
                    continue;
                };
                if matches!(kind, TokenKind::Code(_)) {
                    open_code = Some(tokens.len());
                }
                tokens.push(Token {
                    kind,
                    raw: markdown[range].to_owned(),
                    depth,
                });
                depth += 1;
            }
            Event::End(tag) => {
                if is_block_end(tag) {
                    depth = depth.saturating_sub(1);
                }
                if tag == TagEnd::CodeBlock {
                    open_code = None;
                }
            }
            Event::Text(text) => {
                if let Some(position) = open_code
                    && let Some(TokenKind::Code(code)) = tokens.get_mut(position).map(|t| &mut t.kind)
                {
                    code.body.push_str(&text);
                }
            }
            Event::Rule => tokens.push(Token {
                kind: TokenKind::Rule,
                raw: markdown[range].to_owned(),
                depth,
            }),
            _ => {}
        }
    }

    tokens
}

/// Map a start tag to a token kind; `None` for inline and table-internal tags.
fn block_kind(tag: &Tag<'_>, code_index: &mut usize) -> Option<TokenKind> {
    let kind = match tag {
        Tag::Paragraph => TokenKind::Paragraph,
        Tag::Heading { level, .. } => TokenKind::Heading(heading_level_to_num(*level)),
        Tag::BlockQuote(_) => TokenKind::BlockQuote,
        Tag::CodeBlock(kind) => {
            let language = match kind {
                CodeBlockKind::Fenced(info) => fence_language(info).map(str::to_owned),
                CodeBlockKind::Indented => None,
            };
            let index = *code_index;
            *code_index += 1;
            TokenKind::Code(CodeToken {
                language,
                body: String::new(),
                index,
            })
        }
        Tag::HtmlBlock => TokenKind::Html,
        Tag::List(start) => TokenKind::List {
            ordered: start.is_some(),
        },
        Tag::Item => TokenKind::Item,
        Tag::FootnoteDefinition(_) => TokenKind::FootnoteDefinition,
        Tag::DefinitionList => TokenKind::DefinitionList,
        Tag::Table(_) => TokenKind::Table,
        Tag::MetadataBlock(_) => TokenKind::Metadata,
        _ => return None,
    };
    Some(kind)
}

fn is_block_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::Table
            | TagEnd::MetadataBlock(_)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::util::gfm_options;

    fn kinds(tokens: &[Token]) -> Vec<&'static str> {
        tokens.iter().map(|t| t.kind.name()).collect()
    }

    #[test]
    fn test_top_level_blocks() {
        let tokens = tokenize("# Title\n\nSome text.\n\n---\n", gfm_options(true));
        assert_eq!(kinds(&tokens), vec!["heading", "paragraph", "hr"]);
        assert!(tokens.iter().all(Token::is_top_level));
        assert_eq!(tokens[0].kind, TokenKind::Heading(1));
    }

    #[test]
    fn test_raw_spans() {
        let markdown = "# Title\n\nSome text.\n";
        let tokens = tokenize(markdown, gfm_options(true));
        assert_eq!(tokens[0].raw.trim_end(), "# Title");
        assert_eq!(tokens[1].raw.trim_end(), "Some text.");
    }

    #[test]
    fn test_fenced_code_token() {
        let tokens = tokenize("```Mermaid extra\ngraph TD\n  A-->B\n```\n", gfm_options(true));
        assert_eq!(tokens.len(), 1);
        let code = tokens[0].code().unwrap();
        assert_eq!(code.language.as_deref(), Some("Mermaid"));
        assert_eq!(code.body, "graph TD\n  A-->B\n");
        assert_eq!(code.index, 0);
        assert!(tokens[0].raw.starts_with("```Mermaid"));
    }

    #[test]
    fn test_indented_code_has_no_language() {
        let tokens = tokenize("Intro\n\n    let x = 1;\n", gfm_options(true));
        let code = tokens[1].code().unwrap();
        assert!(code.language.is_none());
        assert_eq!(code.body, "let x = 1;\n");
    }

    #[test]
    fn test_nested_code_blocks_numbered_in_order() {
        let markdown = "```a\n1\n```\n\n- item\n\n  ```b\n  2\n  ```\n\n> ```c\n> 3\n> ```\n";
        let tokens = tokenize(markdown, gfm_options(true));
        let codes: Vec<_> = tokens.iter().filter_map(Token::code).collect();
        assert_eq!(codes.len(), 3);
        assert_eq!(
            codes
                .iter()
                .map(|c| (c.language.as_deref(), c.index))
                .collect::<Vec<_>>(),
            vec![(Some("a"), 0), (Some("b"), 1), (Some("c"), 2)]
        );

        let nested: Vec<_> = tokens
            .iter()
            .filter(|t| t.code().is_some() && !t.is_top_level())
            .collect();
        assert_eq!(nested.len(), 2);
    }

    #[test]
    fn test_table_requires_gfm() {
        let markdown = "| A | B |\n|---|---|\n| 1 | 2 |\n";
        assert_eq!(kinds(&tokenize(markdown, gfm_options(true))), vec!["table"]);
        assert_eq!(
            kinds(&tokenize(markdown, gfm_options(false))),
            vec!["paragraph"]
        );
    }

    #[test]
    fn test_list_items_nested() {
        let tokens = tokenize("1. one\n2. two\n", gfm_options(true));
        assert_eq!(tokens[0].kind, TokenKind::List { ordered: true });
        assert_eq!(tokens[0].depth, 0);
        assert_eq!(tokens[1].kind, TokenKind::Item);
        assert_eq!(tokens[1].depth, 1);
        assert_eq!(tokens.iter().filter(|t| t.is_top_level()).count(), 1);
    }

    #[test]
    fn test_html_block() {
        let tokens = tokenize("<div>\nhi\n</div>\n", gfm_options(true));
        assert_eq!(kinds(&tokens), vec!["html"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens = tokenize("# A\r\n\r\n```mmd\r\npie\r\n```\r\n", gfm_options(true));
        assert_eq!(kinds(&tokens), vec!["heading", "code"]);
        assert_eq!(tokens[1].code().unwrap().language.as_deref(), Some("mmd"));
    }

    #[test]
    fn test_empty_document() {
        assert!(tokenize("", gfm_options(true)).is_empty());
    }
}
