pub mod reading;
pub mod store;

pub use reading::WeatherReading;
pub use store::{RecordKey, WeatherStore};
