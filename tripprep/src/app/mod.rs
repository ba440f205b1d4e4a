pub mod extract_dataset;
pub mod make_dataset;
pub mod modify_features;
mod prep_app;

pub use prep_app::{PrepApp, PrepOperation};
