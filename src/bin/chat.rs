//! Terminal front-end for the chat widget: one submit per stdin line.

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use chat_widget::client::GenerationClient;
use chat_widget::config::DEFAULT_CHAT_ENDPOINT;
use chat_widget::widget::ChatSubmitHandler;
use chat_widget::widget::terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "chat", about = "Chat with a generation server from the terminal")]
struct Args {
    /// Generation endpoint to POST prompts to.
    #[arg(long, env = "CHAT_ENDPOINT", default_value = DEFAULT_CHAT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    chat_widget::init_tracing();

    let args = Args::parse();
    info!(endpoint = %args.endpoint, "starting chat");

    let view = Arc::new(TerminalView::new());
    let handler = ChatSubmitHandler::new(view.clone(), GenerationClient::new(args.endpoint));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        view.set_line(&line);
        handler.submit().await;
    }
    Ok(())
}
