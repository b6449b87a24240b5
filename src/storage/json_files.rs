use std::path::{
    Path,
    PathBuf,
};

use async_trait::async_trait;

use tokio::fs;
use tracing::info;

use crate::{
    error::StorageError,
    rate_point::RatePoint,
    storage::{
        encode_series,
        SeriesKey,
        SeriesStore,
    },
};



/// File tree storage, one JSON file per series.
///
/// Layout is `<root>/<currency>/<period>.json`. Directories are created when
/// first needed.
pub struct JsonFiles {
    root: PathBuf,
}



impl JsonFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }


    pub fn path_for(&self, key: &SeriesKey) -> PathBuf {
        self.root
            .join(key.currency.code())
            .join(format!("{}.json", key.period.name()))
    }
}



fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}



#[async_trait]
impl SeriesStore for JsonFiles {
    async fn save(&self, key: &SeriesKey, points: &[RatePoint]) -> Result<(), StorageError> {
        // Encode before touching the file, so that a failure here leaves the
        // previous series in place.
        let encoded = encode_series(points)?;

        let path = self.path_for(key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await.map_err(io_err(dir))?;
        }

        // Readers never see a half written series, rename replaces the file
        // in one step.
        let tmp = path.with_extension("json.tmp");
        let written = match fs::write(&tmp, &encoded).await {
            Ok(()) => fs::rename(&tmp, &path).await.map_err(io_err(&path)),
            Err(e) => Err(io_err(&tmp)(e)),
        };

        if let Err(e) = written {
            // Best effort, the original error is what matters.
            let _ = fs::remove_file(&tmp).await;
            return Err(e)
        }

        info!(series = %key, points = points.len(), "data saved to {}", path.display());

        Ok(())
    }
}
