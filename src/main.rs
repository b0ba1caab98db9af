use std::sync::Arc;

use spa_server::config::{AppState, Config};
use spa_server::{logger, server, startup};

const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `.env` values feed both the configuration layer and template expansion
    match startup::env_file::load_default() {
        Ok(Some(path)) => logger::log_info(&format!("Loaded environment from {}", path.display())),
        Ok(None) => {}
        Err(e) => logger::log_warning(&format!("Failed to load .env file: {e}")),
    }

    let config_path = parse_config_path(std::env::args().skip(1))?;
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    let addr = cfg.get_socket_addr()?;
    let content_root = cfg.content_root()?;

    // Template files are rewritten before the runtime or any listener exists
    let state = match startup::prepare(&cfg, &content_root) {
        Ok(state) => state,
        Err(e) => {
            logger::log_error(&format!("Startup aborted: {e}"));
            return Err(e.into());
        }
    };

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(addr, cfg, state))
}

async fn async_main(
    addr: std::net::SocketAddr,
    cfg: Config,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(state);

    logger::log_server_start(&addr, &cfg, &state);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    server::start_server_loop(listener, state, Arc::clone(&signals.shutdown)).await;
    Ok(())
}

/// Accepts `-c <path>`, `--config <path>` and `--config=<path>`
fn parse_config_path(mut args: impl Iterator<Item = String>) -> Result<String, String> {
    let mut path = DEFAULT_CONFIG_PATH.to_string();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--config=") {
            path = value.to_string();
        } else if arg == "-c" || arg == "--config" {
            path = args
                .next()
                .ok_or_else(|| format!("Missing value for {arg}"))?;
        } else {
            return Err(format!(
                "Unknown argument: {arg}\nUsage: spa-server [-c|--config <path>]"
            ));
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_default_config_path() {
        assert_eq!(parse_config_path(args(&[])).unwrap(), "config");
    }

    #[test]
    fn test_config_flags() {
        assert_eq!(parse_config_path(args(&["-c", "prod"])).unwrap(), "prod");
        assert_eq!(parse_config_path(args(&["--config", "a/b"])).unwrap(), "a/b");
        assert_eq!(parse_config_path(args(&["--config=x.toml"])).unwrap(), "x.toml");
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_config_path(args(&["-c"])).is_err());
        assert!(parse_config_path(args(&["--verbose"])).is_err());
    }
}
