use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language, themes};
use quick_xml::escape::escape;

/// Syntax highlighter for code blocks, using autumnus (tree-sitter based).
///
/// Highlighted code carries CSS classes only; the colors come from the
/// stylesheet produced by [`SyntaxHighlighter::css`].
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    theme_name: String,
}

impl SyntaxHighlighter {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme_name: theme_name.to_string(),
        }
    }

    /// Highlight code and return HTML with CSS classes.
    ///
    /// Unknown languages fall back to an escaped plain `<pre><code>` block.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let lang = Language::guess(language, code);

        if matches!(lang, Language::PlainText)
            && !language.is_empty()
            && language != "plaintext"
            && language != "text"
        {
            return plain_code_block(code, language);
        }

        let Ok(formatter) = HtmlLinkedBuilder::new().source(code).lang(lang).build() else {
            return plain_code_block(code, language);
        };

        let mut output: Vec<u8> = Vec::new();
        if formatter.format(&mut output).is_err() {
            return plain_code_block(code, language);
        }
        String::from_utf8(output).unwrap_or_else(|_| plain_code_block(code, language))
    }

    /// Stylesheet for the configured theme, or `None` if the theme is unknown.
    pub fn css(&self) -> Option<String> {
        let theme = themes::get(&self.theme_name).ok()?;
        Some(theme.css(false))
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new("dracula")
    }
}

fn plain_code_block(code: &str, language: &str) -> String {
    let escaped = escape(code);
    if language.is_empty() {
        format!("<pre><code>{escaped}</code></pre>")
    } else {
        format!(
            "<pre><code class=\"language-{}\">{escaped}</code></pre>",
            escape(language)
        )
    }
}
