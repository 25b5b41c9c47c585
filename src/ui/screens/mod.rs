pub mod dashboard;
pub mod debug;
pub mod forecast;

pub use dashboard::DashboardScreen;
pub use debug::DebugOverlay;
pub use forecast::ForecastScreen;
