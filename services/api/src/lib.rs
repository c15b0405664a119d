mod cli;
mod infra;
mod routes;
mod server;

use school_grading::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
