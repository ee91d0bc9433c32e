use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

const DEFAULT_SCAN_WINDOW: usize = 500;
const DEFAULT_SPLIT_CACHE_CAPACITY: u64 = 64;
const DEFAULT_KEY_SUFFIXES: [&str; 3] = ["_id", "_key", "_code"];

#[derive(confique::Config, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many significant tokens the context classifier walks backward
    /// from the cursor before giving up.
    #[config(env = "QEDIT_SCAN_WINDOW", default = 500)]
    pub scan_window: usize,

    /// Number of distinct buffers whose statement spans are memoized.
    #[config(env = "QEDIT_SPLIT_CACHE_CAPACITY", default = 64)]
    pub split_cache_capacity: u64,

    /// Column name endings treated as key-like when suggesting join conditions.
    #[config(
        env = "QEDIT_KEY_SUFFIXES",
        parse_env = confique::env::parse::list_by_comma,
        default = ["_id", "_key", "_code"]
    )]
    pub key_suffixes: Vec<String>,
}

impl Config {
    /// Load from the `QEDIT_*` environment variables, defaults filling the rest.
    pub fn from_env() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }

    /// Built-in defaults, without consulting the environment.
    pub fn fallback() -> Self {
        Self {
            scan_window: DEFAULT_SCAN_WINDOW,
            split_cache_capacity: DEFAULT_SPLIT_CACHE_CAPACITY,
            key_suffixes: DEFAULT_KEY_SUFFIXES.map(String::from).to_vec(),
        }
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::from_env().unwrap_or_else(|err| {
            warn!("Ignoring QEDIT_* environment, using defaults: {err}");
            Config::fallback()
        })
    })
}
