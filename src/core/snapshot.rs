use crate::domain::model::{Entity, Snapshot};
use crate::domain::ports::Storage;
use crate::utils::error::{LayoutError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["json", "csv"];

    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("csv") => Ok(SnapshotFormat::Csv),
            _ => Err(LayoutError::UnsupportedFormatError {
                path: path.to_string(),
            }),
        }
    }
}

/// Parses a position list. JSON is an array of records; CSV has a header row
/// `_id,firstName,lastName,zone`.
pub fn parse_snapshot(data: &[u8], format: SnapshotFormat) -> Result<Snapshot> {
    let entities: Vec<Entity> = match format {
        SnapshotFormat::Json => serde_json::from_slice(data)?,
        SnapshotFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(data);
            reader
                .deserialize::<Entity>()
                .collect::<std::result::Result<Vec<_>, csv::Error>>()?
        }
    };
    Ok(Snapshot::new(entities))
}

pub async fn load_snapshot<S: Storage>(storage: &S, path: &str) -> Result<Snapshot> {
    let format = SnapshotFormat::from_path(path)?;
    let data = storage.read_file(path).await?;
    let snapshot = parse_snapshot(&data, format)?;
    tracing::debug!("Loaded {} entities from {} ({:?})", snapshot.len(), path, format);
    Ok(snapshot)
}
