mod extract_ops;

pub use extract_ops::extract_zipfile;
