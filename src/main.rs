// bfc - Batfish service command line client
use batfish_client::cli::args::Args;
use batfish_client::cli::commands::execute_command;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // Errors print as `Error: ...` and exit with status 1
    execute_command(args).await?;
    Ok(())
}
