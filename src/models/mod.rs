pub mod config;
pub mod contact;

pub use config::{
    AppConfig, LogConfig, LogFormat, LogLevel, LogOutput, ServerConfig, SessionConfig,
    StoreConfig,
};
pub use contact::{Contact, ContactForm, ContactUpdate};
