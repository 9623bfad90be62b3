// Rendering and writing the generated spec

use crate::config::OutputConfig;
use crate::ingestion::KafkaIngestionSpec;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::Path;
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Pretty JSON with four-space indentation, keys in declaration order.
pub fn render(spec: &KafkaIngestionSpec) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(2048);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    spec.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| {
        serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub fn parse(document: &str) -> Result<KafkaIngestionSpec, serde_json::Error> {
    serde_json::from_str(document)
}

/// Writes `document` to every destination enabled in `config`.
pub fn write(document: &str, config: &OutputConfig) -> anyhow::Result<()> {
    write_with(document, config, &mut std::io::stdout().lock())
}

/// Like [`write`] with `out` standing in for stdout. The file is written
/// first so a failed file write leaves stdout empty.
pub fn write_with<W: Write>(
    document: &str,
    config: &OutputConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    if let Some(path) = config.path.as_deref().filter(|p| !p.is_empty()) {
        write_file(Path::new(path), document)
            .with_context(|| format!("write {}", path))?;
        info!("wrote ingestion spec to {}", path);
    }
    if config.stdout {
        write_to(out, document)?;
    }
    Ok(())
}

pub fn write_file(path: &Path, document: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    write_to(&mut file, document)
}

fn write_to<W: Write>(w: &mut W, document: &str) -> anyhow::Result<()> {
    w.write_all(document.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}
