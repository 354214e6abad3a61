//! The component registry consulted during shortcode expansion.
//!
//! Components are registered once while the engine is constructed and are
//! read-only afterwards. Registration order is preserved so the component
//! catalog lists components in the order they were declared.

use std::collections::HashMap;

use serde::Serialize;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("component '{0}' is already registered")]
    Duplicate(String),

    #[error("invalid component name '{0}': names must be word characters and not start with a digit")]
    InvalidName(String),
}

/// Documentation for a single component parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDoc {
    pub name: String,
    pub description: String,
}

/// A registered UI component.
///
/// `parameters` is documentation only. Expansion never validates an
/// invocation against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    /// Keyword used to invoke the component: `{{< name ... />}}`
    pub name: String,
    /// Template passed to the component renderer
    pub template_id: String,
    pub description: String,
    /// Documented parameters, in declaration order
    pub parameters: Vec<ParamDoc>,
    /// A literal invocation demonstrating usage
    pub example: String,
}

impl ComponentDescriptor {
    pub fn new(
        name: impl Into<String>,
        template_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template_id: template_id.into(),
            description: description.into(),
            parameters: Vec::new(),
            example: String::new(),
        }
    }

    /// Document a parameter.
    pub fn param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.parameters.push(ParamDoc {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// Set the usage example.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }
}

/// Lookup table from component name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: Vec<ComponentDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ComponentRegistry {
    /// Create a registry with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in components.
    ///
    /// Each built-in goes through [`ComponentRegistry::register`], so a bad
    /// entry in the built-in table surfaces as an error here.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in builtin_components() {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a component.
    ///
    /// Fails if the name is already taken or could never be matched by an
    /// invocation.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), RegistryError> {
        if !is_valid_name(&descriptor.name) {
            return Err(RegistryError::InvalidName(descriptor.name));
        }
        if self.by_name.contains_key(&descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }
        self.by_name
            .insert(descriptor.name.clone(), self.components.len());
        self.components.push(descriptor);
        Ok(())
    }

    /// Find a component by name.
    pub fn lookup(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.by_name.get(name).map(|&idx| &self.components[idx])
    }

    /// All components in registration order.
    pub fn all(&self) -> &[ComponentDescriptor] {
        &self.components
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// The components every site can use.
fn builtin_components() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new(
            "button",
            "button.html",
            "Renders a styled button with various variants",
        )
        .param("text", "Button text")
        .param("href", "Link URL (optional)")
        .param(
            "variant",
            "Button variant: primary, secondary, success, danger, warning, info, light, dark, outline-primary, etc.",
        )
        .param("size", "Button size: sm, md, lg (default: md)")
        .param("icon", "Icon class (optional)")
        .param("disabled", "Disable button (optional)")
        .example(r#"{{< button text="Get Started" href="/docs" variant="primary" size="lg" />}}"#),
        ComponentDescriptor::new(
            "card",
            "card.html",
            "Renders a card component with optional header, body, and footer",
        )
        .param("title", "Card title")
        .param("content", "Card body content")
        .param("footer", "Card footer text (optional)")
        .param(
            "variant",
            "Card variant: primary, secondary, success, danger, warning, info (optional)",
        )
        .param("image", "Card image URL (optional)")
        .example(r#"{{< card title="Welcome" content="This is a card component" variant="primary" />}}"#),
        ComponentDescriptor::new("alert", "alert.html", "Renders an alert message box")
            .param("content", "Alert message content")
            .param(
                "variant",
                "Alert type: primary, secondary, success, danger, warning, info, light, dark",
            )
            .param("dismissible", "Make alert dismissible (optional)")
            .param("icon", "Icon class (optional)")
            .example(r#"{{< alert content="Important information!" variant="info" dismissible="true" />}}"#),
        ComponentDescriptor::new(
            "code",
            "code-sample.html",
            "Renders a code block with syntax highlighting and copy button",
        )
        .param("content", "Code content")
        .param("language", "Programming language for syntax highlighting")
        .param("title", "Code block title (optional)")
        .param("copy", "Show copy button (default: true)")
        .example(r#"{{< code language="python" title="Hello World" content="print('Hello, World!')" />}}"#),
        ComponentDescriptor::new(
            "hero",
            "hero.html",
            "Renders a hero section with title, subtitle, and call-to-action",
        )
        .param("title", "Hero title")
        .param("subtitle", "Hero subtitle")
        .param("cta_text", "Call-to-action button text (optional)")
        .param("cta_link", "Call-to-action button link (optional)")
        .param("image", "Background image URL (optional)")
        .param(
            "variant",
            "Hero variant: primary, secondary, dark, light (default: primary)",
        )
        .example(r#"{{< hero title="Welcome" subtitle="Build amazing sites" cta_text="Get Started" cta_link="/docs" />}}"#),
        ComponentDescriptor::new("tabs", "tabs.html", "Renders tabbed content sections")
            .param("tabs", "JSON array of tab objects with title and content")
            .param("id", "Unique ID for the tabs component")
            .example(r#"{{< tabs id="example" tabs='[{"title":"Tab 1","content":"Content 1"},{"title":"Tab 2","content":"Content 2"}]' />}}"#),
        ComponentDescriptor::new(
            "collapsible",
            "collapsible.html",
            "Renders a collapsible accordion component",
        )
        .param("title", "Collapsible section title")
        .param("content", "Collapsible content")
        .param("open", "Start expanded (optional)")
        .param("variant", "Variant style (optional)")
        .example(r#"{{< collapsible title="Click to expand" content="Hidden content here" />}}"#),
        ComponentDescriptor::new("badge", "badge.html", "Renders a small badge or label")
            .param("text", "Badge text")
            .param(
                "variant",
                "Badge variant: primary, secondary, success, danger, warning, info, light, dark",
            )
            .example(r#"{{< badge text="New" variant="success" />}}"#),
    ]
}
