use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use flapper_training::SimulationConfig;
use serde::{Serialize, de::DeserializeOwned};

use crate::model::BrainModel;

/// Writes `value` as pretty-printed JSON to `path`, or to stdout without one.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    let Some(path) = path else {
        return write_pretty(&mut io::stdout().lock(), value)
            .context("Failed to write JSON to stdout");
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_pretty(&mut BufWriter::new(file), value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))
}

fn write_pretty<W, T>(writer: &mut W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

fn read_json<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid {what} file: {}", path.display()))
}

/// Read a simulation config; missing fields take their defaults
pub fn read_config_file(path: &Path) -> anyhow::Result<SimulationConfig> {
    read_json("config", path)
}

/// Read a brain model written by `train`
pub fn read_brain_model_file(path: &Path) -> anyhow::Result<BrainModel> {
    read_json("brain model", path)
}
