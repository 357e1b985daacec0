use std::fs::OpenOptions;
use std::path::Path;

use csv::WriterBuilder;


/// Overwrites `path` with a single header row.
///
/// # Errors
///
/// Will return `Err` if the file cannot be created or written.
pub fn write_header(path: &Path, columns: &[&str]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(columns)?;
    writer.flush()?;

    Ok(())
}

/// Appends a single data row and closes the file again, so a partially
/// completed sweep always leaves a readable file behind.
///
/// # Errors
///
/// Will return `Err` if the file cannot be opened or written.
pub fn append_row(path: &Path, fields: &[String]) -> Result<(), csv::Error> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(fields)?;
    writer.flush()?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .unwrap()
            .records()
            .map(Result::unwrap)
            .collect()
    }


    #[test]
    fn header_precedes_data_rows() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("output_Friis.csv");

        write_header(
            &path,
            &["distanceMeters", "rssDBm", "throughputKbps", "Friis"]
        ).unwrap();
        append_row(&path, &[
            "1".to_string(),
            "-33.7".to_string(),
            "70000".to_string(),
            String::new(),
        ]).unwrap();

        let rows = read_rows(&path);

        assert_eq!(2, rows.len());
        assert_eq!("distanceMeters", &rows[0][0]);
        assert_eq!("1", &rows[1][0]);
    }

    #[test]
    fn data_rows_match_header_column_count() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("output.csv");

        write_header(&path, &["runtime", "rssDBm", "throughputKbps"]).unwrap();

        for runtime in 1..=3 {
            append_row(&path, &[
                runtime.to_string(),
                "-40".to_string(),
                "100".to_string(),
            ]).unwrap();
        }

        let rows = read_rows(&path);

        assert_eq!(4, rows.len());
        assert!(rows.iter().all(|row| row.len() == rows[0].len()));
    }

    #[test]
    fn rewriting_the_header_truncates_the_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("output.csv");

        write_header(&path, &["a", "b"]).unwrap();
        append_row(&path, &["1".to_string(), "2".to_string()]).unwrap();
        write_header(&path, &["a", "b"]).unwrap();

        assert_eq!(1, read_rows(&path).len());
    }
}
