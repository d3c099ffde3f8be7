mod cli;
mod demo;
mod infra;
mod routes;
mod samples;
mod server;

use municipal_intel::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
