use blueprint_assembly::cli::commands::{cmd_assemble, cmd_chunk, cmd_inspect};
use blueprint_assembly::cli::config::{load_config, Cli, Commands};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Assemble {
            facts,
            output_dir,
            trace,
        } => {
            cmd_assemble(
                &facts,
                output_dir.as_deref(),
                trace.as_deref(),
                &config,
                cli.verbose,
            )?;
        }
        Commands::Chunk {
            blueprint,
            output_dir,
        } => {
            cmd_chunk(&blueprint, output_dir.as_deref(), &config)?;
        }
        Commands::Inspect { blueprint } => {
            cmd_inspect(&blueprint)?;
        }
    }

    Ok(())
}
