use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in configuration: {0}")]
pub struct ConfigError(pub String);
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> ConfigError {
        ConfigError(format!("config file error: {}", e))
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> ConfigError {
        ConfigError(format!("config parse error: {}", e))
    }
}

#[derive(Error, Debug)]
#[error("error while initializing: {0}")]
pub struct InitError(pub String);
impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> InitError {
        InitError(e.to_string())
    }
}
impl From<std::io::Error> for InitError {
    fn from(e: std::io::Error) -> InitError {
        InitError(format!("io error: {}", e))
    }
}
impl From<log::SetLoggerError> for InitError {
    fn from(e: log::SetLoggerError) -> InitError {
        InitError(format!("logger error: {}", e))
    }
}
impl From<log4rs::config::runtime::ConfigErrors> for InitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> InitError {
        InitError(format!("log config error: {}", e))
    }
}
impl From<MailError> for InitError {
    fn from(e: MailError) -> InitError {
        InitError(e.to_string())
    }
}

#[derive(Error, Debug)]
#[error("error in communication with Windguru: {0}")]
pub struct WindguruError(pub String);
impl From<ureq::Error> for WindguruError {
    fn from(e: ureq::Error) -> WindguruError {
        WindguruError(format!("http request error: {}", e))
    }
}

#[derive(Error, Debug)]
#[error("error in communication with Open-Meteo Marine: {0}")]
pub struct MarineError(pub String);
impl From<ureq::Error> for MarineError {
    fn from(e: ureq::Error) -> MarineError {
        MarineError(format!("http request error: {}", e))
    }
}
impl From<serde_json::Error> for MarineError {
    fn from(e: serde_json::Error) -> MarineError {
        MarineError(format!("json document error: {}", e))
    }
}

#[derive(Error, Debug)]
#[error("error while sending mail: {0}")]
pub struct MailError(pub String);
impl From<lettre::address::AddressError> for MailError {
    fn from(e: lettre::address::AddressError) -> MailError {
        MailError(format!("invalid email address: {}", e))
    }
}
impl From<lettre::error::Error> for MailError {
    fn from(e: lettre::error::Error) -> MailError {
        MailError(format!("message build error: {}", e))
    }
}
impl From<lettre::transport::smtp::Error> for MailError {
    fn from(e: lettre::transport::smtp::Error) -> MailError {
        MailError(format!("smtp error: {}", e))
    }
}

#[derive(Error, Debug)]
#[error("error in raw data cache: {0}")]
pub struct BackupError(pub String);
impl From<std::io::Error> for BackupError {
    fn from(e: std::io::Error) -> BackupError {
        BackupError(format!("io error: {}", e))
    }
}
impl From<serde_json::Error> for BackupError {
    fn from(e: serde_json::Error) -> BackupError {
        BackupError(format!("json document error: {}", e))
    }
}
impl From<glob::PatternError> for BackupError {
    fn from(e: glob::PatternError) -> BackupError {
        BackupError(format!("glob pattern error: {}", e))
    }
}
impl From<chrono::ParseError> for BackupError {
    fn from(e: chrono::ParseError) -> BackupError {
        BackupError(format!("file date error: {}", e))
    }
}
