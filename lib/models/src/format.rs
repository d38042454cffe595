// Snapshot encoding shared by the model stores.
// JSON for `.json` paths, bincode otherwise; writes go to a temp file first
// and are renamed into place.

use ctxsim_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

pub(crate) fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path)?;
    if is_json(path) {
        Ok(serde_json::from_slice(&data)?)
    } else {
        bincode::deserialize(&data)
            .map_err(|e| Error::Serialization(format!("Deserialization error: {}", e)))
    }
}

pub(crate) fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = if is_json(path) {
        serde_json::to_vec(value)?
    } else {
        bincode::serialize(value)
            .map_err(|e| Error::Serialization(format!("Serialization error: {}", e)))?
    };

    let temp_file = path.with_extension("tmp");
    std::fs::write(&temp_file, &data)?;
    std::fs::rename(&temp_file, path)?;
    Ok(())
}
