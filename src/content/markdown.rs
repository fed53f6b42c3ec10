//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

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
        Self::with_options("base16-ocean.dark", false)
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

    /// Render an MDX body to HTML.
    ///
    /// Module-level `import`/`export` lines are dropped; JSX elements pass
    /// through as inline HTML.
    pub fn render(&self, source: &str) -> Result<String> {
        let markdown = strip_esm(source);

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(&markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<CodeFence> = None;
        let mut code_block_content = String::new();
        let mut heading: Option<Vec<Event>> = None;
        let mut heading_ids = HeadingIds::default();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(match kind {
                        CodeBlockKind::Fenced(info) => CodeFence::parse(&info),
                        CodeBlockKind::Indented => CodeFence::default(),
                    });
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(fence) = code_block.take() {
                        events.push(Event::Html(CowStr::from(
                            self.render_code_block(&fence, &code_block_content),
                        )));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    code_block_content.push_str(&text);
                }
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some(vec![event]);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(buffered) = heading.take() {
                        events.extend(link_heading(buffered, &mut heading_ids));
                    }
                    events.push(event);
                }
                _ => match heading.as_mut() {
                    Some(buffered) => buffered.push(event),
                    None => events.push(event),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    fn render_code_block(&self, fence: &CodeFence, code: &str) -> String {
        let block = self.highlight_code(code, fence.lang.as_deref());
        match &fence.title {
            Some(title) => format!(
                r#"<div class="code-title">{}</div>{}"#,
                html_escape(title),
                block
            ),
            None => block,
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let class = html_escape(lang);

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, &class),
            Some(highlighted) => format!(
                r#"<div class="code-highlight language-{}">{}</div>"#,
                class, highlighted
            ),
            None => {
                // Fallback to plain code block
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                )
            }
        }
    }

    /// Add line numbers to highlighted code. `class` is already escaped.
    fn add_line_numbers(&self, code: &str, class: &str) -> String {
        let gutter = (1..=code.lines().count())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            class, gutter, code
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fence info string, e.g. ` ```ts:lib/api.ts `
#[derive(Debug, Default, PartialEq)]
struct CodeFence {
    lang: Option<String>,
    title: Option<String>,
}

impl CodeFence {
    fn parse(info: &str) -> Self {
        let info = info.split_whitespace().next().unwrap_or("");
        let (lang, title) = match info.split_once(':') {
            Some((lang, title)) => (lang, Some(title)),
            None => (info, None),
        };
        Self {
            lang: Some(lang).filter(|l| !l.is_empty()).map(str::to_string),
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }
}

/// Unique heading anchors; repeats get `-1`, `-2`, ...
#[derive(Default)]
struct HeadingIds {
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    fn next(&mut self, text: &str) -> String {
        let base = match slug::slugify(text) {
            s if s.is_empty() => "section".to_string(),
            s => s,
        };
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        id
    }
}

/// Give a buffered heading an id and prepend an anchor link to it
fn link_heading<'a>(mut buffered: Vec<Event<'a>>, ids: &mut HeadingIds) -> Vec<Event<'a>> {
    let text: String = buffered
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(t.to_string()),
            _ => None,
        })
        .collect();

    if let Some(Event::Start(Tag::Heading {
        level,
        id,
        classes,
        attrs,
    })) = buffered.first().cloned()
    {
        let id = id.unwrap_or_else(|| CowStr::from(ids.next(&text)));
        let anchor = format!(
            r##"<a class="anchor" href="#{}" aria-hidden="true" tabindex="-1"></a>"##,
            &*id
        );
        buffered[0] = Event::Start(Tag::Heading {
            level,
            id: Some(id),
            classes,
            attrs,
        });
        buffered.insert(1, Event::InlineHtml(CowStr::from(anchor)));
    }

    buffered
}

/// Drop MDX `import`/`export` statements.
///
/// A statement is only recognised where it opens a top-level block: at the
/// start of the document or after a blank line, unindented and outside fenced
/// code. Continuation lines belong to it until it is complete or a blank line
/// ends the block. Consecutive statements may follow without blank lines.
fn strip_esm(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut lines = source.split_inclusive('\n').peekable();
    let mut in_fence = false;
    let mut block_start = true;

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        let is_fence = trimmed.starts_with("```") || trimmed.starts_with("~~~");
        if is_fence {
            in_fence = !in_fence;
        }

        if !in_fence && block_start && is_esm_start(line) {
            let mut statement = EsmStatement::default();
            statement.push(line);
            while !statement.is_complete() {
                match lines.peek() {
                    Some(next) if !next.trim().is_empty() => {
                        statement.push(next);
                        lines.next();
                    }
                    _ => break,
                }
            }
            continue;
        }

        // A closing fence ends its block too
        block_start = !in_fence && (is_fence || line.trim().is_empty());
        out.push_str(line);
    }

    out
}

fn is_esm_start(line: &str) -> bool {
    ["import ", "import{", "import'", "import\"", "export "]
        .iter()
        .any(|keyword| line.starts_with(keyword))
}

/// Tracks bracket depth and the last significant character of a statement,
/// skipping string literals and line comments
#[derive(Default)]
struct EsmStatement {
    depth: i32,
    quote: Option<char>,
    last: Option<char>,
}

impl EsmStatement {
    fn push(&mut self, line: &str) {
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if let Some(q) = self.quote {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    self.quote = None;
                    self.last = Some(c);
                }
                continue;
            }
            match c {
                '\'' | '"' | '`' => self.quote = Some(c),
                '/' if chars.peek() == Some(&'/') => break,
                '{' | '(' | '[' => self.depth += 1,
                '}' | ')' | ']' => self.depth -= 1,
                _ => {}
            }
            if !c.is_whitespace() {
                self.last = Some(c);
            }
        }
    }

    /// Balanced, and ends in `;`, a closing brace or a module specifier
    fn is_complete(&self) -> bool {
        self.quote.is_none()
            && self.depth <= 0
            && matches!(self.last, Some(';' | '}' | '\'' | '"'))
    }
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
