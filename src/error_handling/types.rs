use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    NotInRange(String),
    BadLocatorFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::NotInRange(e) => write!(f, "Value out of range: {}", e),
            ConfigError::BadLocatorFormat(e) => write!(f, "Locator format error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum ReplayError {
    TargetNotFound(String),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::TargetNotFound(locator) => {
                write!(f, "Replay target not found: {}", locator)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

#[derive(Debug)]
pub enum SurfaceError {
    InvalidLocator(String),
    AlreadyRegistered(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::InvalidLocator(locator) => {
                write!(f, "Invalid surface locator: {}", locator)
            }
            SurfaceError::AlreadyRegistered(locator) => {
                write!(f, "Surface already registered: {}", locator)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}
