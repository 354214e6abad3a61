use crate::{InitArgs, config::SiteConfig};

const CONFIG_FILE: &str = "config.yaml";

const SAMPLE_PAGE: &str = r#"---
title: Getting Started
description: A first page showing off the built-in components
---

# Getting Started

Pages are written in Markdown. Components are added with shortcodes:

{{< alert content="Your site is ready to build." variant="success" />}}

## Components

{{< card title="Cards" content="Group related content in a card." variant="primary" />}}

{{< button text="Browse all components" href="/pattern-library/" variant="primary" />}}

{{< badge text="New" variant="info" />}}
"#;

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    println!("Initializing project in {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {path}",
            path = config_path.display()
        ));
    }
    let config_text = serde_yaml::to_string(&SiteConfig::default())?;
    tokio::fs::write(&config_path, config_text).await?;
    println!("Created config file {}", config_path.display());

    let content_dir = path.join("content");
    let sample_path = content_dir.join("getting-started.md");
    if sample_path.exists() {
        println!("Keeping existing {}", sample_path.display());
    } else {
        tokio::fs::create_dir_all(&content_dir).await?;
        tokio::fs::write(&sample_path, SAMPLE_PAGE).await?;
        println!("Created sample page {}", sample_path.display());
    }

    Ok(())
}
