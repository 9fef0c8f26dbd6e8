use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use blockfall_engine::GameConfig;

/// Reads a JSON game configuration. Missing fields keep their defaults.
pub(crate) fn read_config_file<P>(path: P) -> anyhow::Result<GameConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open config file: {}", path.display()))?;

    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    Ok(config)
}
