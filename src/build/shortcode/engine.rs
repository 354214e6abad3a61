//! Shortcode expansion.

use quick_xml::escape::partial_escape;
use tracing::{debug, info, warn};

use super::params::{ParamSet, parse_params};
use super::registry::{ComponentDescriptor, ComponentRegistry, RegistryError};
use super::scanner::{Invocation, scan};

/// Failure reported by a component renderer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ComponentError(String);

impl ComponentError {
    /// Describe an error together with its chain of sources.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        Self(description)
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

/// Turns a component template and its parameters into HTML.
///
/// Implementations are shared across threads while documents are expanded
/// in parallel, so they must not rely on per-call mutable state.
pub trait ComponentRenderer: Send + Sync {
    fn render(&self, template_id: &str, params: &ParamSet) -> Result<String, ComponentError>;
}

impl<T: ComponentRenderer + ?Sized> ComponentRenderer for &T {
    fn render(&self, template_id: &str, params: &ParamSet) -> Result<String, ComponentError> {
        (**self).render(template_id, params)
    }
}

/// Expands shortcode invocations using a component registry and renderer.
pub struct ShortcodeEngine<R> {
    registry: ComponentRegistry,
    renderer: R,
}

impl<R: ComponentRenderer> ShortcodeEngine<R> {
    /// Create an engine with the built-in components.
    pub fn new(renderer: R) -> Result<Self, RegistryError> {
        Ok(Self::with_registry(ComponentRegistry::builtin()?, renderer))
    }

    /// Create an engine with a specific registry.
    pub fn with_registry(registry: ComponentRegistry, renderer: R) -> Self {
        Self { registry, renderer }
    }

    /// Replace every invocation in `text` with its rendered output.
    ///
    /// Never fails. Unknown components and render failures are replaced by
    /// a bracketed placeholder so the rest of the document still renders.
    pub fn expand(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for invocation in scan(text) {
            output.push_str(&text[last..invocation.span.start]);
            output.push_str(&self.render_invocation(&invocation));
            last = invocation.span.end;
        }

        output.push_str(&text[last..]);
        output
    }

    /// Component documentation, in registration order.
    pub fn describe_all(&self) -> &[ComponentDescriptor] {
        self.registry.all()
    }

    fn render_invocation(&self, invocation: &Invocation<'_>) -> String {
        let name = invocation.name;
        let Some(component) = self.registry.lookup(name) else {
            info!(component = name, "unknown shortcode component");
            return unknown_component_placeholder(name);
        };

        let params = parse_params(invocation.raw_params);
        debug!(
            component = name,
            template = component.template_id.as_str(),
            params = params.len(),
            "rendering shortcode"
        );

        match self.renderer.render(&component.template_id, &params) {
            Ok(html) => html,
            Err(err) => {
                warn!(component = name, error = %err, "failed to render shortcode");
                render_error_placeholder(name, &err)
            }
        }
    }
}

fn unknown_component_placeholder(name: &str) -> String {
    format!("[Unknown component: {}]", placeholder_text(name))
}

fn render_error_placeholder(name: &str, err: &ComponentError) -> String {
    format!(
        "[Error rendering {}: {}]",
        placeholder_text(name),
        placeholder_text(err.description())
    )
}

/// Placeholders land in Markdown before it is rendered, so markup and
/// code-span backticks in error text must not survive as written.
fn placeholder_text(text: &str) -> String {
    partial_escape(text).replace('`', "&#96;")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::build::shortcode::params::ParamValue;

    /// Renders `<template|key=value;...>` so tests can see exactly what was passed.
    struct EchoRenderer;

    impl ComponentRenderer for EchoRenderer {
        fn render(&self, template_id: &str, params: &ParamSet) -> Result<String, ComponentError> {
            let body = params
                .iter()
                .map(|(k, v)| match v {
                    ParamValue::Bool(b) => format!("{k}={b}"),
                    ParamValue::String(s) => format!("{k}=\"{s}\""),
                })
                .collect::<Vec<_>>()
                .join(";");
            Ok(format!("<{template_id}|{body}>"))
        }
    }

    struct BadgeRenderer;

    impl ComponentRenderer for BadgeRenderer {
        fn render(&self, template_id: &str, params: &ParamSet) -> Result<String, ComponentError> {
            assert_eq!(template_id, "badge.html");
            let text = params.get("text").and_then(ParamValue::as_str).unwrap_or("");
            let variant = params.get("variant").and_then(ParamValue::as_str).unwrap_or("");
            Ok(format!("<span class=\"badge {variant}\">{text}</span>"))
        }
    }

    struct FailingRenderer;

    impl ComponentRenderer for FailingRenderer {
        fn render(&self, template_id: &str, _params: &ParamSet) -> Result<String, ComponentError> {
            let missing = std::io::Error::other(format!("template '{template_id}' not found"));
            Err(ComponentError::from_error(&missing))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(String, ParamSet)>>,
    }

    impl ComponentRenderer for RecordingRenderer {
        fn render(&self, template_id: &str, params: &ParamSet) -> Result<String, ComponentError> {
            self.calls
                .lock()
                .unwrap()
                .push((template_id.to_string(), params.clone()));
            Ok(String::from("X"))
        }
    }

    #[test]
    fn test_text_without_shortcodes_is_unchanged() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        for text in [
            "",
            "plain text",
            "# Title\n\n{{ not a shortcode }} and { < also not > }",
            "unicode: héllo wörld ✓",
        ] {
            assert_eq!(engine.expand(text), text);
        }
    }

    #[test]
    fn test_badge_end_to_end() {
        let engine = ShortcodeEngine::new(BadgeRenderer).unwrap();
        let output = engine.expand(r#"Hello {{< badge text="New" variant="success" />}} world"#);
        assert_eq!(output, r#"Hello <span class="badge success">New</span> world"#);
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        let output = engine.expand("a\n\n{{< hero title=\"T\" >}}\n\nb  ");
        assert_eq!(output, "a\n\n<hero.html|title=\"T\">\n\nb  ");
    }

    #[test]
    fn test_unknown_component_placeholder() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        let output = engine.expand(r#"{{< nope text="x" />}}"#);
        assert_eq!(output, "[Unknown component: nope]");
    }

    #[test]
    fn test_unknown_component_does_not_call_renderer() {
        let renderer = RecordingRenderer::default();
        let engine = ShortcodeEngine::new(&renderer).unwrap();
        let output = engine.expand(r#"{{< broken foo="1" />}}"#);
        assert_eq!(output.matches("broken").count(), 1);
        assert!(renderer.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_render_failure_placeholder() {
        let engine = ShortcodeEngine::new(FailingRenderer).unwrap();
        let output = engine.expand(r#"before {{< card title="x" />}} after"#);
        assert_eq!(
            output,
            "before [Error rendering card: template 'card.html' not found] after"
        );
    }

    struct MarkupErrorRenderer;

    impl ComponentRenderer for MarkupErrorRenderer {
        fn render(&self, _template_id: &str, _params: &ParamSet) -> Result<String, ComponentError> {
            let err = std::io::Error::other("unexpected <script> near `{{ x }}` & more");
            Err(ComponentError::from_error(&err))
        }
    }

    #[test]
    fn test_render_failure_placeholder_is_escaped() {
        let engine = ShortcodeEngine::new(MarkupErrorRenderer).unwrap();
        let output = engine.expand(r#"{{< alert content="x" />}}"#);
        assert_eq!(
            output,
            "[Error rendering alert: unexpected &lt;script&gt; near &#96;{{ x }}&#96; &amp; more]"
        );
        assert!(!output.contains('<'));
        assert!(!output.contains('`'));
    }

    #[test]
    fn test_failure_isolated_to_one_invocation() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        let output = engine.expand(r#"{{< nope />}} {{< badge text="ok" />}}"#);
        assert_eq!(output, r#"[Unknown component: nope] <badge.html|text="ok">"#);
    }

    #[test]
    fn test_invocations_do_not_share_params() {
        let renderer = RecordingRenderer::default();
        let engine = ShortcodeEngine::new(&renderer).unwrap();
        engine.expand(r#"{{< button text="Go" disabled="true" />}} {{< alert content="Hi" />}}"#);

        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "button.html");
        assert_eq!(calls[0].1.get("disabled"), Some(&ParamValue::Bool(true)));
        assert_eq!(calls[1].0, "alert.html");
        assert_eq!(calls[1].1.len(), 1);
        assert!(calls[1].1.get("text").is_none());
    }

    #[test]
    fn test_expansion_is_idempotent_on_output() {
        let engine = ShortcodeEngine::new(BadgeRenderer).unwrap();
        let once = engine.expand(r#"x {{< badge text="A" variant="b" />}} y"#);
        assert_eq!(engine.expand(&once), once);
    }

    #[test]
    fn test_malformed_invocation_passes_through() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        let text = r#"{{< 1bad x="1" />}} and {{< unclosed x="1""#;
        assert_eq!(engine.expand(text), text);
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = ComponentRegistry::new();
        registry
            .register(ComponentDescriptor::new("quote", "quote.html", "A quote"))
            .unwrap();
        let engine = ShortcodeEngine::with_registry(registry, EchoRenderer);
        assert_eq!(engine.expand("{{< quote />}}"), "<quote.html|>");
        assert_eq!(engine.expand("{{< badge />}}"), "[Unknown component: badge]");
    }

    #[test]
    fn test_describe_all() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        let docs = engine.describe_all();
        assert_eq!(docs.len(), 8);
        assert_eq!(docs[0].name, "button");
        assert_eq!(docs[0].template_id, "button.html");
        assert!(!docs[0].parameters.is_empty());
        assert!(!docs[0].example.is_empty());
    }

    #[test]
    fn test_examples_expand_through_renderer() {
        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        for component in engine.describe_all() {
            let output = engine.expand(&component.example);
            assert!(
                output.starts_with(&format!("<{}|", component.template_id)),
                "{} expanded to {}",
                component.name,
                output
            );
        }
    }

    #[test]
    fn test_parallel_expansion() {
        use rayon::prelude::*;

        let engine = ShortcodeEngine::new(EchoRenderer).unwrap();
        let docs: Vec<String> = (0..32)
            .map(|i| format!("doc {i}: {{{{< badge text=\"{i}\" />}}}}"))
            .collect();
        let expanded: Vec<String> = docs.par_iter().map(|d| engine.expand(d)).collect();
        for (i, output) in expanded.iter().enumerate() {
            assert_eq!(output, &format!("doc {i}: <badge.html|text=\"{i}\">"));
        }
    }

    #[test]
    fn test_component_error_from_error_chain() {
        #[derive(thiserror::Error, Debug)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::other("inner"));
        assert_eq!(ComponentError::from_error(&err).description(), "outer: inner");
    }
}
