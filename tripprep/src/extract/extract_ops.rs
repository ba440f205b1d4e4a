use std::fs::File;
use std::path::Path;

use crate::error::PipelineError;
use crate::logging::RunLogger;

/// unpacks every entry of one zip archive into `output_path`. a missing or
/// corrupt archive aborts the run; there is no partial-failure recovery.
pub fn extract_zipfile(
    input_path: &Path,
    output_path: &Path,
    logger: &RunLogger,
) -> Result<(), PipelineError> {
    let file = File::open(input_path).map_err(|e| PipelineError::ReadError {
        path: input_path.to_owned(),
        message: e.to_string(),
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| PipelineError::ArchiveError {
        path: input_path.to_owned(),
        message: format!("failed to open archive: {e}"),
    })?;
    archive
        .extract(output_path)
        .map_err(|e| PipelineError::ArchiveError {
            path: input_path.to_owned(),
            message: format!("failed to extract archive: {e}"),
        })?;

    let input_file_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    logger.info(&format!(
        "{input_file_name} extracted successfully at the target path"
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const A_CONTENTS: &[u8] = b"id,passenger_count\nid1,1\n";
    const B_CONTENTS: &[u8] = b"id,passenger_count\nid2,2\n";

    fn write_archive(path: &Path) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("a.csv", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(A_CONTENTS).unwrap();
        writer
            .start_file("b.csv", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(B_CONTENTS).unwrap();
        writer.finish().unwrap();
    }

    fn test_logger(dir: &Path) -> RunLogger {
        RunLogger::create(dir, "extract_dataset").unwrap()
    }

    #[test]
    fn test_extract_writes_stored_entries_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("train.zip");
        write_archive(&archive_path);
        let out_dir = dir.path().join("extracted");
        std::fs::create_dir_all(&out_dir).unwrap();
        let logger = test_logger(dir.path());

        extract_zipfile(&archive_path, &out_dir, &logger).unwrap();

        assert_eq!(std::fs::read(out_dir.join("a.csv")).unwrap(), A_CONTENTS);
        assert_eq!(std::fs::read(out_dir.join("b.csv")).unwrap(), B_CONTENTS);
    }

    #[test]
    fn test_missing_archive_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let logger = test_logger(dir.path());
        let result = extract_zipfile(&dir.path().join("absent.zip"), dir.path(), &logger);
        assert!(matches!(result, Err(PipelineError::ReadError { .. })));
    }

    #[test]
    fn test_corrupt_archive_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("train.zip");
        std::fs::write(&archive_path, b"this is not a zip file").unwrap();
        let logger = test_logger(dir.path());
        let result = extract_zipfile(&archive_path, dir.path(), &logger);
        assert!(matches!(result, Err(PipelineError::ArchiveError { .. })));
    }
}
