mod settings;

pub use settings::{
    CacheSettings, IntakeSettings, LoggingSettings, ModelSettings, ServerSettings, Settings,
};
