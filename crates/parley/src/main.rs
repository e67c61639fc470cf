use common::configuration::Configuration;
use common::consts::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use parley::errors::ParleyError;
use parley::report::{AnalysisEngine, AnalysisRequest};
use parley::utils::tracing::init_logger;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::{env, fs};
use tracing::{debug, info};

fn load_configuration() -> Result<Configuration, ParleyError> {
    // loaded before the logger so the logging section can be honoured
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&config_path).exists() {
        eprintln!("no configuration at {}, using defaults", config_path);
        return Ok(Configuration::default());
    }

    eprintln!("loading configuration from {}", config_path);
    Ok(Configuration::load(&config_path)?)
}

fn read_request() -> Result<AnalysisRequest, ParleyError> {
    let raw = match env::args().nth(1) {
        Some(path) => {
            debug!(path = %path, "reading analysis request from file");
            fs::read_to_string(path)?
        }
        None => {
            debug!("reading analysis request from stdin");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    serde_json::from_str(&raw).map_err(ParleyError::Request)
}

fn run() -> Result<(), ParleyError> {
    let config = load_configuration()?;
    init_logger(config.logging.as_ref());
    info!(version = %config.version, "loaded configuration");

    let engine = AnalysisEngine::from_config(&config);
    let request = read_request()?;
    let report = engine.analyze(&request);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).map_err(ParleyError::Output)?;
    writeln!(stdout).map_err(|err| ParleyError::Output(serde_json::Error::io(err)))?;

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("parley: {}", err);
            ExitCode::FAILURE
        }
    }
}
