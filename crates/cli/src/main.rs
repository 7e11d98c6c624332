use clap::Parser;
use envdoctor::commands::Commands;
use envdoctor_config::ConfigLoader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envdoctor")]
#[command(
    about = "Diagnose and repair JavaScript/TypeScript development environments",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory to inspect (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    envdoctor_utils::tracing::init(cli.verbose).map_err(|e| eyre::eyre!(e))?;

    let mut loader = ConfigLoader::new().verbose(cli.verbose);
    if let Some(dir) = cli.dir {
        loader = loader.directory(dir);
    }
    let config = loader.load()?;

    // Without a subcommand, greet like `doctor`
    let command = cli.command.unwrap_or(Commands::Doctor);
    command.execute(config).await?;
    Ok(())
}
