// Services
// Stateless or config-backed functionality: settings, localization, relative time labels.

pub mod localization_engine;
pub mod relative_time;
pub mod settings_engine;
