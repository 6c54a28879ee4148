// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::{LevelFilter, error, info};
use scenetag::bot::core::{BotContext, CommandRequest};
use scenetag::bot::{CommandBus, prefix};
use scenetag::config::{CONFIG_FILE_NAME, Config};
use scenetag::store::TagStore;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

const DEFAULT_CONSOLE_CHANNEL: &str = "general";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprint!("{}", help_text());
            return 2;
        }
    };

    if parsed_args.help {
        print!("{}", help_text());
        return 0;
    }

    let (config, created_config) = match Config::load_or_init(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Configuration error: {}", error);
            return 1;
        }
    };

    if let Err(error) = init_logging(&config) {
        eprintln!("❌ Failed to initialize logger: {}", error);
        return 1;
    }

    if created_config {
        info!(
            "Created default {} in {}",
            CONFIG_FILE_NAME,
            parsed_args.runtime_root.display()
        );
    }
    log_startup_info(&config, &parsed_args);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("❌ Failed to start async runtime: {}", error);
            return 1;
        }
    };

    runtime.block_on(run_console(config, parsed_args))
}

struct ParsedArgs {
    runtime_root: PathBuf,
    channel: String,
    help: bool,
}

fn parse_args() -> Result<ParsedArgs, String> {
    let mut runtime_root = PathBuf::from(".");
    let mut channel = DEFAULT_CONSOLE_CHANNEL.to_string();
    let mut help = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => {
                let value = args.next().ok_or("-C requires a directory")?;
                runtime_root = PathBuf::from(value);
            }
            "--channel" => {
                channel = args.next().ok_or("--channel requires a name")?;
                if channel.is_empty() {
                    return Err("--channel requires a non-empty name".to_string());
                }
            }
            "-h" | "--help" => help = true,
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    Ok(ParsedArgs {
        runtime_root,
        channel,
        help,
    })
}

fn help_text() -> String {
    [
        "scenetag — channel-scoped scene/NPC tag bot console",
        "",
        "Usage: scenetag [-C <root>] [--channel <name>]",
        "",
        "  -C <root>         runtime directory (config.yaml and the tag database)",
        "  --channel <name>  channel the console session acts in (default: general)",
        "  -h, --help        show this help",
        "",
        "Type prefix commands (e.g. !addtag, !tags) on stdin; responses print",
        "to stdout. EOF ends the session.",
        "",
    ]
    .join("\n")
}

fn init_logging(config: &Config) -> Result<(), log::SetLoggerError> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Stable format so log lines stay grep-friendly.
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
}

fn log_startup_info(config: &Config, args: &ParsedArgs) {
    info!("SceneTag {} starting", env!("CARGO_PKG_VERSION"));
    info!("Runtime root: {}", args.runtime_root.display());
    info!("Command prefix: {}", config.bot.prefix);
    info!("Console channel: {}", args.channel);
    info!("Log level: {}", config.logging.level);
}

/// Local console gateway: a stand-in dispatcher that feeds stdin lines
/// through the prefix transport and prints the single response per
/// command. The production gateway drives the same bus through the same
/// transports.
async fn run_console(config: Config, args: ParsedArgs) -> i32 {
    let db_path = args.runtime_root.join(&config.database.path);
    let store = match TagStore::open(&db_path).await {
        Ok(store) => Arc::new(store),
        Err(error) => {
            eprintln!("❌ Failed to open tag store {}: {}", db_path.display(), error);
            return 1;
        }
    };
    info!("Tag store ready at {}", db_path.display());

    let bus = CommandBus::start(BotContext { store });

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                error!("Failed to read console input: {}", error);
                return 1;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match prefix::parse_message(&config.bot.prefix, line) {
            Ok(Some(command)) => {
                let request = CommandRequest {
                    channel: args.channel.clone(),
                    latency_ms: None,
                    command,
                };
                match bus.send(request).await {
                    Ok(response) => println!("{}", response.message),
                    Err(error) => {
                        error!("Command dispatch failed: {}", error);
                        println!("Error: {}", error.message());
                    }
                }
            }
            // Not addressed to the bot (wrong prefix or unknown command).
            Ok(None) => {}
            Err(error) => {
                if let Some(text) = prefix::render_error(&error) {
                    println!("{}", text);
                }
            }
        }
    }

    0
}
