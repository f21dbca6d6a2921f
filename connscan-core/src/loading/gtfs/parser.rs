use std::path::Path;

use log::warn;

use crate::Error;

/// Deserializes every well-formed row of a CSV file with a header line.
///
/// Malformed rows are skipped and reported once per file.
pub fn deserialize_feed_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            Error::InvalidData(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

    let mut rows = Vec::new();
    let mut skipped = 0_usize;
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                log::trace!("{}: skipping row: {e}", path.display());
            }
        }
    }

    if skipped > 0 {
        warn!("{}: skipped {skipped} malformed rows", path.display());
    }
    rows.shrink_to_fit();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::gtfs::FeedStop;
    use std::io::Write;

    #[test]
    fn skips_malformed_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stop_id,stop_name,stop_lat,stop_lon").unwrap();
        writeln!(file, "8814001,\"BRUXELLES-MIDI, GARE\",50.8355,4.3363").unwrap();
        writeln!(file, "broken,Nowhere,not-a-number,4.0").unwrap();
        writeln!(file, " 8813003 , BRUXELLES-CENTRAL ,50.8453,4.3571").unwrap();

        let stops: Vec<FeedStop> = deserialize_feed_file(file.path()).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_name, "BRUXELLES-MIDI, GARE");
        assert_eq!(stops[1].stop_id, "8813003");
        assert_eq!(stops[1].stop_name, "BRUXELLES-CENTRAL");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result: Result<Vec<FeedStop>, _> =
            deserialize_feed_file(Path::new("/no/such/dir/stops.csv"));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
