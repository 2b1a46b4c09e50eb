use gym::EnvError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HerError {
    #[error("observation space {0} not supported for HER")]
    UnsupportedSpace(String),
    #[error("unknown goal sampling strategy `{0}`, expected `random` or `sample_obs`")]
    UnknownStrategy(String),
    #[error("invalid HER configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Env(#[from] EnvError),
}
