//! GitHub Stats Dashboard - a self-contained GitHub user dashboard
//!
//! # Usage
//! ```bash
//! hubdash                # Start server
//! hubdash --open         # Start and open browser
//! hubdash status         # Check if running
//! hubdash kill           # Stop running instance
//! ```

mod error;
mod github;
mod models;
mod query;
mod routes;
mod stats;

use std::fs;
use std::io::{Read, Write};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum::routing::get;
use clap::{Parser, Subcommand};
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github::{DEFAULT_API_URL, GitHubClient};
use routes::AppState;

/// Embedded frontend static files
#[derive(Embed)]
#[folder = "frontend"]
struct Assets;

/// GitHub Stats Dashboard - profile, languages and commit activity in your browser
#[derive(Parser)]
#[command(name = "hubdash")]
#[command(about = "A self-contained GitHub user stats dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Port to run the server on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// GitHub API base URL (override for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if hubdash is currently running
    Status,
    /// Stop the running hubdash instance
    Kill,
}

/// PID file info stored as JSON
#[derive(serde::Serialize, serde::Deserialize)]
struct PidInfo {
    pid: u32,
    port: u16,
    api_url: String,
}

fn pid_file_path() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push("hubdash.pid");
    path
}

fn read_pid_info() -> Option<PidInfo> {
    let mut file = fs::File::open(pid_file_path()).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_pid_info(info: &PidInfo) -> anyhow::Result<()> {
    let mut file = fs::File::create(pid_file_path())?;
    file.write_all(serde_json::to_string(info)?.as_bytes())?;
    Ok(())
}

fn remove_pid_file() {
    let _ = fs::remove_file(pid_file_path());
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // On Unix, sending signal 0 checks if process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use std::process::Command;
    Command::new("tasklist")
        .args(&["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| {
            let output_str = String::from_utf8_lossy(&output.stdout);
            output_str.contains(&pid.to_string())
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> bool {
    use std::process::Command;
    Command::new("taskkill")
        .args(&["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn handle_status() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                println!("✓ hubdash is running");
                println!("  PID: {}", info.pid);
                println!("  API: {}", info.api_url);
                println!("  URL: http://127.0.0.1:{}", info.port);
            } else {
                println!("✗ hubdash is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ hubdash is not running");
        }
    }
}

fn handle_kill() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                if kill_process(info.pid) {
                    println!("✓ Stopped hubdash (PID {})", info.pid);
                    remove_pid_file();
                } else {
                    println!("✗ Failed to stop hubdash (PID {})", info.pid);
                }
            } else {
                println!("✗ hubdash is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ hubdash is not running");
        }
    }
}

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().trim_start_matches('/');

    // Default to index.html for root or non-file paths
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => match Assets::get("index.html") {
            Some(content) => Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "text/html")
                .body(Body::from(content.data.into_owned()))
                .unwrap(),
            None => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("Not Found"))
                .unwrap(),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        None => {}
    }

    // Check if already running
    if let Some(info) = read_pid_info() {
        if is_process_running(info.pid) {
            eprintln!("✗ hubdash is already running (PID {})", info.pid);
            eprintln!("  URL: http://127.0.0.1:{}", info.port);
            eprintln!();
            eprintln!("Run 'hubdash kill' to stop it first.");
            std::process::exit(1);
        } else {
            remove_pid_file();
        }
    }

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let github = match GitHubClient::new(&cli.api_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ Failed to build GitHub client: {}", e);
            std::process::exit(1);
        }
    };
    let state = AppState::new(github);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router with API routes and static file serving
    let app = Router::new()
        .merge(routes::create_router(state))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    // Write PID file
    let pid_info = PidInfo {
        pid: std::process::id(),
        port: cli.port,
        api_url: cli.api_url.clone(),
    };
    write_pid_info(&pid_info)?;

    // Print startup message
    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │           GitHub Stats Dashboard            │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  GitHub API: {}", cli.api_url);
    println!("  Server:     {}", url);
    println!();
    println!("  Commands:");
    println!("    hubdash status  - Check if running");
    println!("    hubdash kill    - Stop the server");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Open browser if requested
    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
        remove_pid_file();
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
