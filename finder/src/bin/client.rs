use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use treasure_finder::client::terminal::{Command, HELP, parse_command, render_shapes, render_view};
use treasure_finder::config::Config;
use treasure_finder::{Controller, HttpInferenceClient, ShapeCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "treasure_finder=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    info!(
        "Using counting service at {} (debounce {:?})",
        config.client.inference_url, config.client.debounce
    );

    let catalog = Arc::new(ShapeCatalog::builtin());
    let service = Arc::new(HttpInferenceClient::new(
        &config.client.inference_url,
        config.client.request_timeout,
    )?);
    let controller = Controller::new(Arc::clone(&catalog), service, config.client.debounce);

    // Redraw whenever the controller publishes a new view
    let mut views = controller.subscribe();
    let latest = controller.subscribe();
    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            println!("\n{}", render_view(&view));
        }
    });

    let (input_tx, input_rx) = mpsc::channel(32);
    let controller_task = tokio::spawn(controller.run(input_rx));

    println!("{}\n\n{}", HELP, render_shapes(&catalog, &[]));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line, &catalog) {
            Ok(None) => {}
            Ok(Some(Command::Input(input))) => {
                if input_tx.send(input).await.is_err() {
                    warn!("Controller stopped unexpectedly");
                    break;
                }
            }
            Ok(Some(Command::ListShapes)) => {
                let selected = latest.borrow().selection.clone();
                print!("{}", render_shapes(&catalog, &selected));
            }
            Ok(Some(Command::Help)) => println!("{}", HELP),
            Ok(Some(Command::Quit)) => break,
            Err(e) => println!("{}", e),
        }
    }

    // Closing the input channel stops the controller, which closes the views
    drop(input_tx);
    controller_task.await?;
    printer.await?;
    Ok(())
}
