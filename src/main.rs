// src/main.rs

//! A minimal line-oriented front end for the `BF*` command surface.
//!
//! The real wire protocol (RESP framing, TCP server, connection handling) is
//! out of scope; this reads whitespace-separated commands from stdin and
//! prints their replies, which is enough to exercise the engine end to end.

use anyhow::Result;
use bytes::Bytes;
use scalable_bloom::commands::BloomCommand;
use scalable_bloom::config::Config;
use scalable_bloom::logging;
use scalable_bloom::reply::Reply;
use scalable_bloom::store::Store;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    run_app().await
}

async fn run_app() -> Result<()> {
    logging::init_tracing();

    let args: Vec<String> = env::args().collect();
    let config_path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let config = match Config::load(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(Store::new(config));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((name, rest)) = tokens.split_first() else {
            continue;
        };
        let args: Vec<Bytes> = rest.iter().map(|s| Bytes::from(s.to_string())).collect();

        let output = match BloomCommand::parse(name, &args) {
            Ok(cmd) => match cmd.execute(&store).await {
                Ok((reply, _)) => format_reply(&reply),
                Err(e) => {
                    error!(command = %name, error = %e, "command failed");
                    format!("ERR {e}")
                }
            },
            Err(e) => format!("ERR {e}"),
        };

        writeln!(stdout, "{output}")?;
    }

    Ok(())
}

fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Integer(n) => n.to_string(),
        Reply::BulkString(b) => String::from_utf8_lossy(b).into_owned(),
        Reply::SimpleString(s) => s.clone(),
    }
}
