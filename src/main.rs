mod cli;
use std::process::ExitCode;

use log::error;
use trackstat::config::load_dotenv;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env may set RUST_LOG, so it has to be loaded before the logger starts
    let dotenv = load_dotenv();
    env_logger::init();

    let result = match dotenv {
        Ok(()) => cli::run().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
