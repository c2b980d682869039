use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = keyrelay::cli::Cli::parse();
    if let Err(e) = keyrelay::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
