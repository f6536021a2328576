mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use deposit_ready::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
