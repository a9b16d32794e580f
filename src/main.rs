use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sourcechat::application::render_message;
use sourcechat::{build_router, ChatSession, Container, Role};

#[derive(Parser)]
#[command(name = "sourcechat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Run an interactive terminal chat session against the same services.
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Arc::new(Container::from_env());

    match cli.command {
        Commands::Serve { host, port } => {
            let router = build_router(container);
            let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
            info!("Listening on {}", listener.local_addr()?);
            axum::serve(listener, router).await?;
        }

        Commands::Chat => {
            run_chat(container.session()).await?;
        }
    }

    Ok(())
}

async fn run_chat(mut session: ChatSession) -> Result<()> {
    println!("sourcechat — ask a question, ':urls' to summarize a URL list, ':quit' to exit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            ":quit" | ":q" => break,
            ":urls" => {
                println!("Paste URLs (one per line, empty line to submit):");
                let mut text = String::new();
                loop {
                    let mut url_line = String::new();
                    if stdin.lock().read_line(&mut url_line)? == 0
                        || url_line.trim().is_empty()
                    {
                        break;
                    }
                    text.push_str(&url_line);
                }
                let before = session.len();
                session.submit_urls(&text).await;
                print_new_messages(&session, before);
            }
            input => {
                let before = session.len();
                session.submit_chat(input).await;
                print_new_messages(&session, before);
            }
        }
    }

    Ok(())
}

fn print_new_messages(session: &ChatSession, since: usize) {
    let mut replied = false;
    for message in &session.messages()[since..] {
        if message.role() == Role::Assistant {
            print!("{}", render_message(message));
            replied = true;
        }
    }
    if !replied {
        println!("(no response)");
    }
}
