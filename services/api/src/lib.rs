mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use fitness_ladder::error::AppError;

pub use infra::AppState;
pub use routes::router;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
