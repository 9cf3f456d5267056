pub mod settings;
pub mod time;

pub use settings::load_settings;
pub use time::SystemClock;
