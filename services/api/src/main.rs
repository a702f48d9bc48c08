//! `revela-api` binary: serves the progress API by default, see `--help` for subcommands.

use revela_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
