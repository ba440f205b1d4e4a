mod feature_ops;
mod target_plot;

pub use feature_ops::{
    input_modifications, modify, target_modifications, MAX_TRIP_MINUTES, TARGET_COLUMN,
};
pub use target_plot::plot_target;
