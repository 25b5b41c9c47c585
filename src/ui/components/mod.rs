pub mod chart;
pub mod gauge;
pub mod input;
pub mod ticker;

pub use chart::SeriesChart;
pub use gauge::{aqi_gauge, humidity_gauge, score_gauge, temperature_gauge, uv_gauge, wind_gauge};
pub use input::SearchInput;
pub use ticker::{orbit_glyph, FactTickerWidget};
