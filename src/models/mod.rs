pub mod analysis;
pub mod diagnostics;
pub mod search;
pub mod settings;
pub mod trend;
