// SPDX-License-Identifier: MPL-2.0
use image_dashboard::app::{self, paths, Flags};
use image_dashboard::config;
use image_dashboard::gateway::HttpGateway;
use image_dashboard::session::{FileSessionStore, MemorySessionStore, SessionStore};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
image-dashboard

USAGE:
  image-dashboard [OPTIONS]

OPTIONS:
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --api-url <URL>       Base URL of the image service
  --data-dir <PATH>     Directory holding the session file
  --config-dir <PATH>   Directory holding settings.toml
  -h, --help            Print this help

ENVIRONMENT:
  IMAGE_DASHBOARD_API_URL, IMAGE_DASHBOARD_DATA_DIR, IMAGE_DASHBOARD_CONFIG_DIR
  RUST_LOG              Log filter (default: image_dashboard=info)
";

struct Args {
    lang: Option<String>,
    api_url: Option<String>,
    data_dir: Option<String>,
    config_dir: Option<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let parsed = Args {
        lang: args.opt_value_from_str("--lang")?,
        api_url: args.opt_value_from_str("--api-url")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(Some(parsed))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("image_dashboard=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(args.data_dir, args.config_dir);

    let mut startup_warnings = Vec::new();
    let (config, config_warning) = config::load();
    startup_warnings.extend(config_warning);

    let (api_url, url_warning) = config::resolve_api_base_url(args.api_url.as_deref(), &config);
    startup_warnings.extend(url_warning);

    let gateway = match HttpGateway::new(&api_url) {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::error!(error = %err, "could not create HTTP client");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(api = gateway.base_url(), "using image service");

    let session: Arc<dyn SessionStore> = match FileSessionStore::open() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "no data directory, session will not persist");
            startup_warnings.push("notification-session-save-error".to_string());
            Arc::new(MemorySessionStore::new())
        }
    };

    let flags = Flags {
        lang: args.lang,
        config,
        startup_warnings,
        gateway: Arc::new(gateway),
        session,
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application error");
            ExitCode::FAILURE
        }
    }
}
