use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = toggleboard::cli::Cli::parse();
    if let Err(e) = toggleboard::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
