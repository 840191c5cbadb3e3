mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExtractionSettings, FormSettings, LlmSettings, LoggingSettings, ServerSettings, Settings,
};
