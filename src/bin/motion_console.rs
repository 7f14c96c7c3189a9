//! motion-console: Motion 守护进程的命令行管理工具
//!
//! Usage:
//!   motion-console [--url <base>] [--user <u> --password <p>] <COMMAND> [ARGS]
//!
//! Output is pretty-printed JSON; failures print the user-facing message.

use anyhow::{anyhow, bail, Context};
use motion_console::{AuthEvent, MotionClient, MotionClientBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct GlobalOptions {
    url: Option<String>,
    user: Option<String>,
    password: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (opts, rest) = match parse_global_options(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };

    let Some(command) = rest.first() else {
        eprintln!("{}", usage());
        std::process::exit(1);
    };

    match command.as_str() {
        "version" | "--version" | "-V" => {
            cmd_version();
            return;
        }
        "help" | "--help" | "-h" => {
            println!("{}", usage());
            return;
        }
        _ => {}
    }

    if let Err(e) = run(&opts, command, &rest[1..]).await {
        match e.downcast_ref::<motion_console::Error>() {
            Some(api_err) => eprintln!("Error: {}", api_err.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn usage() -> &'static str {
    r#"motion-console: Motion camera daemon console

USAGE:
    motion-console [OPTIONS] <COMMAND> [ARGS]

OPTIONS:
    --url <base>            Daemon base URL (default: $MOTION_BASE_URL or http://localhost:8080)
    --user <name>           Username for webcontrol authentication
    --password <pass>       Password for webcontrol authentication

COMMANDS:
    cameras                         List configured cameras
    pictures <cam>                  List snapshots of a camera
    movies <cam>                    List movies of a camera
    temperature                     Show CPU temperature
    status                          Show system status (uptime, memory, disk)
    auth                            Show authentication status
    config                          Dump daemon configuration
    set <cam> <param> <value>       Set one configuration parameter
    patch <cam> <param=value>...    Apply several parameters at once
    delete-picture <cam> <id>       Delete a snapshot
    delete-movie <cam> <id>         Delete a movie
    reboot                          Reboot the host
    shutdown                        Power off the host
    version                         Show version information
    help                            Show this help message

ENVIRONMENT:
    MOTION_BASE_URL, MOTION_USER, MOTION_PASSWORD,
    MOTION_HTTP_TIMEOUT_MS, MOTION_RETRY_BASE_DELAY_MS, MOTION_PROXY_URL
    RUST_LOG                        Log filter (default: warn)"#
}

fn cmd_version() {
    println!("motion-console {}", env!("CARGO_PKG_VERSION"));
}

fn parse_global_options(args: &[String]) -> anyhow::Result<(GlobalOptions, Vec<String>)> {
    let mut opts = GlobalOptions::default();
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--url" => &mut opts.url,
            "--user" => &mut opts.user,
            "--password" => &mut opts.password,
            _ => {
                rest.push(arg.clone());
                rest.extend(iter.by_ref().cloned());
                break;
            }
        };
        let value = iter
            .next()
            .ok_or_else(|| anyhow!("{arg} requires a value"))?;
        *slot = Some(value.clone());
    }
    Ok((opts, rest))
}

fn build_client(opts: &GlobalOptions) -> anyhow::Result<MotionClient> {
    let mut builder = MotionClientBuilder::from_env();
    if let Some(url) = &opts.url {
        builder = builder.base_url(url.clone());
    }
    if let Some(user) = &opts.user {
        builder = builder.basic_auth(user.clone(), opts.password.clone().unwrap_or_default());
    }
    Ok(builder.build()?)
}

async fn run(opts: &GlobalOptions, command: &str, args: &[String]) -> anyhow::Result<()> {
    let client = build_client(opts)?;
    let mut auth_events = client.context().subscribe_auth_events();

    let result = dispatch(&client, command, args).await;
    // Drained before returning: `main` exits the process on error.
    log_auth_events(&mut auth_events);
    result
}

/// Log every auth event published so far; returns how many were logged.
fn log_auth_events(events: &mut broadcast::Receiver<AuthEvent>) -> usize {
    let mut logged = 0;
    loop {
        match events.try_recv() {
            Ok(event) => {
                warn!(status = event.status, "daemon requires authentication; pass --user/--password");
                logged += 1;
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "auth events dropped");
            }
            Err(_) => return logged,
        }
    }
}

async fn dispatch(client: &MotionClient, command: &str, args: &[String]) -> anyhow::Result<()> {
    match command {
        "cameras" => print_json(&client.cameras().await?),
        "pictures" => print_json(&client.pictures(cam_arg(args, 0)?).await?),
        "movies" => print_json(&client.movies(cam_arg(args, 0)?).await?),
        "temperature" => print_json(&client.temperature().await?),
        "status" => print_json(&client.system_status().await?),
        "auth" => print_json(&client.auth_status().await?),
        "config" => print_json(&client.config().await?),
        "set" => {
            let cam = cam_arg(args, 0)?;
            let param = positional(args, 1, "param")?;
            let value = positional(args, 2, "value")?;
            prime_csrf_token(client).await;
            print_json(&client.set_config_param(cam, param, value).await?)
        }
        "patch" => {
            let cam = cam_arg(args, 0)?;
            let changes = parse_changes(&args[1.min(args.len())..])?;
            prime_csrf_token(client).await;
            print_json(&client.patch_config(cam, &changes).await?)
        }
        "delete-picture" => {
            let (cam, id) = (cam_arg(args, 0)?, id_arg(args, 1)?);
            prime_csrf_token(client).await;
            print_json(&client.delete_picture(cam, id).await?)
        }
        "delete-movie" => {
            let (cam, id) = (cam_arg(args, 0)?, id_arg(args, 1)?);
            prime_csrf_token(client).await;
            print_json(&client.delete_movie(cam, id).await?)
        }
        "reboot" => {
            prime_csrf_token(client).await;
            print_json(&client.reboot().await?)
        }
        "shutdown" => {
            prime_csrf_token(client).await;
            print_json(&client.shutdown().await?)
        }
        other => bail!("unknown command: {other} (see `motion-console help`)"),
    }
}

/// Fetch the config once so the first mutating call already carries a token.
/// A failure here is not fatal: the 403 recovery path fetches it again.
async fn prime_csrf_token(client: &MotionClient) {
    if let Err(e) = client.config().await {
        warn!(error = %e, "could not prefetch CSRF token");
    }
}

fn positional<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing <{name}> argument"))
}

fn cam_arg(args: &[String], index: usize) -> anyhow::Result<u32> {
    let raw = positional(args, index, "cam")?;
    raw.parse::<u32>()
        .with_context(|| format!("camera id must be a number, got {raw:?}"))
}

fn id_arg(args: &[String], index: usize) -> anyhow::Result<u64> {
    let raw = positional(args, index, "id")?;
    raw.parse::<u64>()
        .with_context(|| format!("media id must be a number, got {raw:?}"))
}

fn parse_changes(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    if pairs.is_empty() {
        bail!("patch needs at least one <param=value>");
    }
    pairs
        .iter()
        .map(|pair| {
            let (k, v) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected <param=value>, got {pair:?}"))?;
            Ok((k.to_string(), Value::String(v.to_string())))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
