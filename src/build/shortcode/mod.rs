//! Shortcode components embedded in Markdown.
//!
//! A shortcode invokes a registered component inline:
//!
//! ```text
//! {{< badge text="New" variant="success" />}}
//! ```
//!
//! Expansion runs before Markdown rendering and replaces each invocation
//! with the HTML produced by the component's template:
//!
//! 1. [`scanner`] finds invocations in the raw text
//! 2. [`params`] parses each invocation's attributes
//! 3. the [`registry`] maps the keyword to a template
//! 4. a [`ComponentRenderer`] renders the template
//!
//! Problems with a single invocation never fail the document; they show up
//! as placeholder text in the page instead.

mod engine;
pub mod params;
pub mod registry;
pub mod scanner;

pub use engine::{ComponentError, ComponentRenderer, ShortcodeEngine};
pub use params::ParamSet;
pub use registry::{ComponentDescriptor, RegistryError};
