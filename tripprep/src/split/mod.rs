mod split_ops;
mod split_params;

pub use split_ops::train_val_split;
pub use split_params::{read_params, SplitParams, DEFAULT_TEST_SIZE};
