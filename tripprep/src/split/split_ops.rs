use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::PipelineError;
use crate::logging::RunLogger;
use crate::table::TripTable;

/// randomly partitions a table into train and validation splits, no
/// stratification. membership is decided once per call by shuffling row
/// indices; with `random_state` unset the shuffle reseeds from OS entropy
/// and every run yields a different partition.
pub fn train_val_split(
    data: &TripTable,
    test_size: f64,
    random_state: Option<u64>,
    logger: &RunLogger,
) -> Result<(TripTable, TripTable), PipelineError> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(PipelineError::InvalidUserInput(format!(
            "test_size must be in [0, 1), got {test_size}"
        )));
    }
    let (n_rows, _) = data.shape();
    let n_val = ((n_rows as f64) * test_size).ceil() as usize;

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    indices.shuffle(&mut rng);

    let val_data = data.select_rows(&indices[..n_val]);
    let train_data = data.select_rows(&indices[n_val..]);

    logger.info(&format!(
        "Data is split into train split with shape {:?} and val split with shape {:?}",
        train_data.shape(),
        val_data.shape()
    ));
    logger.info(&format!(
        "The parameter values are {test_size} for test_size and {random_state:?} for random_state"
    ));

    Ok((train_data, val_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    fn test_logger(dir: &Path) -> RunLogger {
        RunLogger::create(dir, "make_dataset").unwrap()
    }

    fn numbered_table(n: usize) -> TripTable {
        let rows = (0..n)
            .map(|i| vec![format!("id{i}"), format!("{}", i % 7)])
            .collect();
        TripTable::new(
            vec!["id".to_string(), "passenger_count".to_string()],
            rows,
        )
        .unwrap()
    }

    fn ids(table: &TripTable) -> HashSet<String> {
        table
            .column_values("id")
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_partitions_are_disjoint_and_sum_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());
        let data = numbered_table(100);

        let (train, val) = train_val_split(&data, 0.25, Some(7), &logger).unwrap();

        assert_eq!(train.shape().0 + val.shape().0, 100);
        assert_eq!(val.shape().0, 25);
        let train_ids = ids(&train);
        let val_ids = ids(&val);
        assert!(train_ids.is_disjoint(&val_ids));
        assert_eq!(train_ids.len() + val_ids.len(), 100);
    }

    #[test]
    fn test_same_seed_gives_identical_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());
        let data = numbered_table(50);

        let (train_a, val_a) = train_val_split(&data, 0.2, Some(42), &logger).unwrap();
        let (train_b, val_b) = train_val_split(&data, 0.2, Some(42), &logger).unwrap();

        assert_eq!(train_a, train_b);
        assert_eq!(val_a, val_b);
    }

    #[test]
    fn test_validation_size_rounds_up() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());
        let data = numbered_table(10);

        let (train, val) = train_val_split(&data, 0.25, Some(1), &logger).unwrap();
        // ceil(10 * 0.25) = 3
        assert_eq!(val.shape().0, 3);
        assert_eq!(train.shape().0, 7);
    }

    #[test]
    fn test_out_of_range_fraction_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());
        let data = numbered_table(10);

        assert!(train_val_split(&data, 1.0, None, &logger).is_err());
        assert!(train_val_split(&data, -0.1, None, &logger).is_err());
    }
}
