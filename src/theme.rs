//! The built-in theme.
//!
//! Templates and browser scripts are compiled into the binary so a site
//! builds without any theme files. A site can replace any template by name
//! through the `templates_dir` config setting, and any script by placing a
//! file at the same path in its static directory.

/// Built-in templates as `(name, source)` pairs.
///
/// Component templates are named by the template ids in the component
/// registry.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../themes/default/templates/base.html")),
    ("page.html", include_str!("../themes/default/templates/page.html")),
    ("index.html", include_str!("../themes/default/templates/index.html")),
    (
        "pattern-library.html",
        include_str!("../themes/default/templates/pattern-library.html"),
    ),
    ("button.html", include_str!("../themes/default/components/button.html")),
    ("card.html", include_str!("../themes/default/components/card.html")),
    ("alert.html", include_str!("../themes/default/components/alert.html")),
    (
        "code-sample.html",
        include_str!("../themes/default/components/code-sample.html"),
    ),
    ("hero.html", include_str!("../themes/default/components/hero.html")),
    ("tabs.html", include_str!("../themes/default/components/tabs.html")),
    (
        "collapsible.html",
        include_str!("../themes/default/components/collapsible.html"),
    ),
    ("badge.html", include_str!("../themes/default/components/badge.html")),
];

/// Built-in static assets as `(path, source)` pairs, with paths relative
/// to the output's `static/` directory.
pub const ASSETS: &[(&str, &str)] = &[
    ("js/components.js", include_str!("../themes/default/static/js/components.js")),
    ("js/search.js", include_str!("../themes/default/static/js/search.js")),
    ("js/theme.js", include_str!("../themes/default/static/js/theme.js")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::shortcode::registry::ComponentRegistry;

    #[test]
    fn test_every_component_has_a_template() {
        for component in ComponentRegistry::builtin().unwrap().all() {
            assert!(
                TEMPLATES.iter().any(|(name, _)| *name == component.template_id),
                "no built-in template for {}",
                component.template_id
            );
        }
    }

    #[test]
    fn test_base_template_loads_every_script() {
        let (_, base) = TEMPLATES
            .iter()
            .find(|(name, _)| *name == "base.html")
            .unwrap();
        for (path, _) in ASSETS {
            let tag = format!("<script src=\"/static/{path}\"></script>");
            assert!(base.contains(&tag), "base.html does not load {path}");
        }
    }

    #[test]
    fn test_scripts_target_template_markup() {
        let source = |path: &str| ASSETS.iter().find(|(p, _)| *p == path).unwrap().1;
        assert!(source("js/components.js").contains(".tab-button"));
        assert!(source("js/components.js").contains(".code-copy"));
        assert!(source("js/search.js").contains("search-results"));
        assert!(source("js/theme.js").contains("theme-toggle"));
    }

    #[test]
    fn test_page_templates_present() {
        for page in ["base.html", "page.html", "index.html", "pattern-library.html"] {
            assert!(TEMPLATES.iter().any(|(name, _)| *name == page));
        }
    }
}
