//! Compressor pipeline files.

use anyhow::Context;
use error_injector::CompressorConfig;
use std::path::Path;

/// Load a pipeline from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file.
pub fn load_compressor_config(path: &Path) -> anyhow::Result<CompressorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let config: CompressorConfig = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {path:?}"))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {path:?}"))?,
        _ => anyhow::bail!(
            "Unsupported config file extension: {path:?} (expected .yaml, .yml or .toml)"
        ),
    };

    tracing::debug!(path = %path.display(), config = ?config, "loaded compressor config");
    Ok(config)
}

/// Resolve a `--compressor` value: `noop` and `zlib` name a plain
/// compressor, anything else is a pipeline file.
pub fn resolve_compressor(value: &str) -> anyhow::Result<CompressorConfig> {
    match value {
        "noop" => Ok(CompressorConfig::Noop),
        "zlib" => Ok(CompressorConfig::Zlib {
            level: compressor::ZlibCompressor::DEFAULT_LEVEL,
        }),
        path => load_compressor_config(Path::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_config(".yaml", "name: zlib\nlevel: 2\n");
        assert_eq!(
            load_compressor_config(file.path()).unwrap(),
            CompressorConfig::Zlib { level: 2 }
        );
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            "name = \"fault_injector\"\ninjections = 3\n\n[compressor]\nname = \"noop\"\n",
        );
        let config = load_compressor_config(file.path()).unwrap();
        assert_eq!(config.name(), "fault_injector");
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let file = write_config(".json", "{}");
        let err = load_compressor_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file extension"));
    }

    #[test]
    fn test_parse_error_has_context() {
        let file = write_config(".yaml", "name: lz4\n");
        let err = load_compressor_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }

    #[test]
    fn test_resolve_named_compressors() {
        assert_eq!(resolve_compressor("noop").unwrap(), CompressorConfig::Noop);
        assert_eq!(
            resolve_compressor("zlib").unwrap(),
            CompressorConfig::Zlib { level: 6 }
        );
        assert!(resolve_compressor("/nonexistent/pipeline.yaml").is_err());
    }
}
