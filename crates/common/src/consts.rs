pub const CONFIG_PATH_ENV: &str = "PARLEY_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "./parley_config.yaml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_HEALTHY_SCORE_THRESHOLD: f64 = 85.0;
pub const DEFAULT_MAX_UTTERANCES: usize = 10_000;
