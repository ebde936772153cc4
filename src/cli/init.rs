use crate::cli::InitArgs;
use crate::config::Config;
use anyhow::{bail, Context};

pub fn execute(args: InitArgs) -> anyhow::Result<()> {
    if args.config.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
    }

    let yaml = serde_yaml::to_string(&Config::scaffold())?;
    std::fs::write(&args.config, yaml)
        .with_context(|| format!("Failed to write {}", args.config.display()))?;

    println!("Wrote {}", args.config.display());
    Ok(())
}
