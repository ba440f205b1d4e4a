use crate::error::PipelineError;
use crate::features;
use crate::layout::DataLayout;
use crate::logging::RunLogger;
use crate::table::TripTable;
use crate::util;

pub const MODULE_NAME: &str = "modify_features";

/// applies the feature pipeline to each input file independently and saves
/// the transformed tables under the processed data directory.
pub fn run(layout: &DataLayout, files: &[String]) -> Result<(), PipelineError> {
    let logger = RunLogger::create(&layout.logs_dir, MODULE_NAME)?;
    util::fs::create_dirs(&layout.transformations_dir)?;
    let plot_path = layout.target_plot_path();

    for file in files {
        let data_path = layout.root.join(file);
        let filename = data_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| {
                PipelineError::InvalidUserInput(format!("'{file}' has no file name"))
            })?;
        let table = TripTable::read_csv(&data_path)?;
        let transformed = features::modify(&table, &filename, &plot_path, &logger)?;
        transformed.write_csv(&layout.transformations_dir.join(&filename), &filename)?;
        logger.info(&format!("{filename} saved at the destination folder"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAIN_CSV: &str = "\
id,vendor_id,pickup_datetime,dropoff_datetime,passenger_count,store_and_fwd_flag,trip_duration
id1,2,2016-03-14 17:24:55,2016-03-14 17:32:30,1,N,455
id2,1,2016-03-19 09:10:00,2016-03-19 09:21:00,2,N,660
id3,2,2016-06-12 00:43:35,2016-06-12 01:19:00,4,N,2125
";

    #[test]
    fn test_run_transforms_interim_train_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        std::fs::create_dir_all(&layout.interim_dir).unwrap();
        std::fs::write(layout.interim_dir.join("train.csv"), TRAIN_CSV).unwrap();

        run(&layout, &["data/interim/train.csv".to_string()]).unwrap();

        let out = TripTable::read_csv(&layout.transformations_dir.join("train.csv")).unwrap();
        assert!(!out.has_column("id"));
        assert!(!out.has_column("pickup_datetime"));
        assert!(out.has_column("is_weekend"));
        assert!(out.has_column("trip_duration"));
        assert_eq!(out.shape().0, 3);
    }

    #[test]
    fn test_run_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());

        let result = run(&layout, &["data/interim/absent.csv".to_string()]);
        assert!(matches!(result, Err(PipelineError::ReadError { .. })));
    }
}
