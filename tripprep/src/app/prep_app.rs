use clap::{Parser, Subcommand};

use crate::error::PipelineError;
use crate::layout::DataLayout;

/// Command line tool for preparing the trip duration prediction dataset
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct PrepApp {
    #[command(subcommand)]
    pub op: PrepOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PrepOperation {
    /// unpack the zipped raw archives into the extracted data directory
    Extract {
        /// project root holding the data/ tree. defaults to the current
        /// working directory.
        #[arg(short, long, default_value_t = String::from("."))]
        root: String,
    },
    /// split an extracted csv into train and validation partitions
    Split {
        /// name of the file to split, relative to data/raw/extracted/
        filename: String,

        /// project root holding the data/ tree.
        #[arg(short, long, default_value_t = String::from("."))]
        root: String,
    },
    /// apply the feature modification pipeline to one or more csv files
    Transform {
        /// csv files to transform, relative to the project root. each file
        /// is processed independently.
        #[arg(required = true)]
        files: Vec<String>,

        /// project root holding the data/ tree.
        #[arg(short, long, default_value_t = String::from("."))]
        root: String,
    },
}

impl PrepOperation {
    pub fn run(&self) -> Result<(), PipelineError> {
        match self {
            PrepOperation::Extract { root } => {
                let layout = DataLayout::new(root);
                layout.validate()?;
                crate::app::extract_dataset::run(&layout)
            }
            PrepOperation::Split { filename, root } => {
                let layout = DataLayout::new(root);
                layout.validate()?;
                crate::app::make_dataset::run(&layout, filename)
            }
            PrepOperation::Transform { files, root } => {
                let layout = DataLayout::new(root);
                layout.validate()?;
                crate::app::modify_features::run(&layout, files)
            }
        }
    }
}
