use std::env;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::InitError;
use crate::manager_mail::Mail;
use crate::manager_marine::Marine;
use crate::manager_windguru::Windguru;

/// Managers for the external collaborators of the pipeline
pub struct Mgr {
    pub windguru: Windguru,
    pub marine: Marine,
    pub mail: Mail,
}

/// Loads the configuration, sets up logging and returns the managers
///
/// The configuration path is taken from the CONFIG_FILE environment
/// variable, falling back to config/config.toml.
pub fn init() -> Result<(Config, Mgr), InitError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or("config/config.toml".to_string());
    let config = load_config(&config_file)?;

    setup_logging(&config.general)?;

    info!("kayakcast version: {}", env!("CARGO_PKG_VERSION"));

    let windguru = Windguru::new(&config.spot);
    let marine = Marine::new(config.spot.lat, config.spot.long, &config.fishing.timezone);
    let mail = Mail::new(&config.mail)?;

    Ok((config, Mgr { windguru, marine, mail }))
}

/// Initializes log4rs with a file appender and optionally a console
/// appender, level and paths from the general configuration
///
/// # Arguments
///
/// * 'general' - general configuration parameters
fn setup_logging(general: &General) -> Result<(), InitError> {
    let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} — {m}{n}";

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(&general.log_path)?;

    let mut config_builder = log4rs::config::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root_builder = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build();
        config_builder = config_builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root_builder = root_builder.appender("stdout");
    }

    let log_config = config_builder.build(root_builder.build(general.log_level))?;
    log4rs::init_config(log_config)?;

    Ok(())
}
