//! Contact manager server entry point.

use std::process::ExitCode;

use contact_server::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let result = match AppConfig::from_env() {
        Ok(config) => contact_server::run(config).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_exit module=server status=error error={err}");
            eprintln!("contact_server: {err}");
            ExitCode::FAILURE
        }
    }
}
