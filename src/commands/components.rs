use crate::ComponentsArgs;
use crate::build::{Renderer, SiteShortcodes, SyntaxHighlighter};

pub fn run(args: &ComponentsArgs) -> Result<(), anyhow::Error> {
    let renderer = Renderer::new(None, &SyntaxHighlighter::default())?;
    let shortcodes = SiteShortcodes::new(&renderer)?;
    let components = shortcodes.describe_all();

    if args.json {
        println!("{}", serde_json::to_string_pretty(components)?);
        return Ok(());
    }

    for component in components {
        println!("{} ({})", component.name, component.template_id);
        println!("  {}", component.description);
        for param in &component.parameters {
            println!("    {:<12} {}", param.name, param.description);
        }
        println!("  Example: {}", component.example);
        println!();
    }

    Ok(())
}
