use crate::{BuildArgs, build::Builder, config::SiteConfig};

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(&args.config_file);
    let input = cwd.join(&args.input);
    let output = cwd.join(&args.output);

    if !input.is_dir() {
        return Err(anyhow::anyhow!(
            "Input directory does not exist: {path}",
            path = input.display()
        ));
    }

    let config = SiteConfig::load(&config_path)?;

    println!(
        "Building site from {} to {}...",
        input.display(),
        output.display()
    );

    // Rendering is CPU-bound and parallelized with rayon
    let builder = Builder::new(config, input, output);
    let result = tokio::task::spawn_blocking(move || builder.build()).await??;

    let display_output = result
        .output_dir
        .canonicalize()
        .unwrap_or(result.output_dir.clone());
    println!(
        "Built {} page(s) to {}",
        result.documents,
        display_output.display()
    );

    Ok(())
}
