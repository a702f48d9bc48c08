//! HTTP service and command line front end for the Revela athlete progress library.

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use revela::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
