use crate::constants::MAX_VOLUME;
use crate::utils::logger::Level;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;

static CONFIG_PATH: &str = "bgmplayer/config.json";

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub log_level: Level,
    pub volume: i32,
    pub fade_in_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: Level::Info,
            volume: MAX_VOLUME,
            fade_in_ms: 2000,
        }
    }
}

fn get_config_file() -> PathBuf {
    let mut config_file = config_dir().expect("Could not find config directory.");
    config_file.push(CONFIG_PATH);
    config_file
}

pub fn set_default_config() -> Config {
    let config_file = get_config_file();
    let config = Config::default();
    let path_to_config = config_file.parent().expect("Config path has no parent.");
    std::fs::create_dir_all(path_to_config).expect("Could not create path to config file.");
    let file = File::create(config_file).expect("Could not create config file.");
    serde_json::to_writer_pretty(file, &config).expect("Could not save to config file.");
    config
}

pub fn get_set_config() -> Config {
    let config_file = get_config_file();

    if config_file.is_file() {
        let file = File::open(config_file).expect("Could not open config file.");
        match serde_json::from_reader(file) {
            Ok(config) => config,
            Err(_) => set_default_config(),
        }
    } else {
        set_default_config()
    }
}

pub fn update_config(config: &Config) {
    let config_file = get_config_file();
    let path_to_config = config_file.parent().expect("Config path has no parent.");
    std::fs::create_dir_all(path_to_config).expect("Could not create path to config file.");
    let file = File::create(config_file).expect("Could not create config file.");
    serde_json::to_writer_pretty(file, &config).expect("Could not save to config file.");
}
