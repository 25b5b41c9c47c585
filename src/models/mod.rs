pub mod air_quality;
pub mod location;
pub mod snapshot;
pub mod summary;
pub mod weather;

pub use air_quality::*;
pub use location::*;
pub use snapshot::*;
pub use summary::*;
pub use weather::*;
