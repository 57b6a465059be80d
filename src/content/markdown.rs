//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::RenderError;
use crate::helpers::html_escape;

/// Default syntect theme for fenced code
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Converts a post body from its markup dialect into HTML
pub trait MarkupConverter: Send + Sync {
    fn to_html(&self, markup: &str) -> Result<String, RenderError>;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(DEFAULT_THEME, true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        // Smart punctuation stays off so `[[Don't Panic]]` still matches its title
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry attributes after the language
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => {
                    if !in_code_block {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::write_html_fmt(&mut html_output, events.into_iter())
            .map_err(RenderError::conversion)?;

        Ok(html_output)
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self.theme().and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for MarkdownRenderer {
    fn to_html(&self, markup: &str) -> Result<String, RenderError> {
        self.render(markup)
    }
}
