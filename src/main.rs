use clap::Parser;
use image_status::cli::{Args, Runner};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let runner = match Runner::new(args) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("image-status: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Ctrl-C cancels the in-flight request
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let resp = match runner.run(&cancel).await {
        Ok(resp) => resp,
        Err(e) => {
            runner.logger().error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&resp) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            runner.logger().error(&format!("encoding response: {}", e));
            ExitCode::FAILURE
        }
    }
}
