use crate::cli::args::OutputFormat;
use crate::domain::config::ClientConfig;
use crate::domain::versions::ComponentVersions;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_versions(&self, versions: &ComponentVersions) -> Result<(), OutputError>;
    fn write_names(&self, kind: &str, names: &[String]) -> Result<(), OutputError>;
    fn write_config(&self, config: &ClientConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<OutputError> for crate::domain::error::BatfishError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render versions without printing
    pub fn render_versions(&self, versions: &ComponentVersions) -> Result<String, OutputError> {
        Ok(match self.format {
            OutputFormat::Text => versions.to_string(),
            OutputFormat::Json => serde_json::to_string_pretty(versions)?,
            OutputFormat::Table => {
                let rows: Vec<VersionTableRow> = versions.iter().map(VersionTableRow::from).collect();
                Table::new(rows).to_string()
            }
        })
    }

    /// Render a list of network or snapshot names without printing
    pub fn render_names(&self, kind: &str, names: &[String]) -> Result<String, OutputError> {
        Ok(match self.format {
            OutputFormat::Text => names.join("\n"),
            OutputFormat::Json => serde_json::to_string_pretty(names)?,
            OutputFormat::Table => {
                let rows: Vec<NameTableRow> = names
                    .iter()
                    .map(|name| NameTableRow {
                        kind: kind.to_string(),
                        name: name.clone(),
                    })
                    .collect();
                Table::new(rows).to_string()
            }
        })
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_versions(&self, versions: &ComponentVersions) -> Result<(), OutputError> {
        println!("{}", self.render_versions(versions)?);
        Ok(())
    }

    fn write_names(&self, kind: &str, names: &[String]) -> Result<(), OutputError> {
        if names.is_empty() && self.format != OutputFormat::Json {
            println!("No {}s found", kind);
            return Ok(());
        }
        println!("{}", self.render_names(kind, names)?);
        Ok(())
    }

    fn write_config(&self, config: &ClientConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text | OutputFormat::Table => {
                let session = &config.session;
                println!("Batfish Client Configuration:");
                println!("  Log level: {}", config.global.log_level);
                println!("  Service: {}", session.base_url());
                println!("  Verify SSL certs: {}", session.verify_ssl_certs);
                println!("  Timeout: {}ms", session.timeout_ms);
                if let Some(network) = &session.network {
                    println!("  Network: {}", network);
                }
                if let Some(snapshot) = &session.snapshot {
                    println!("  Snapshot: {}", snapshot);
                }
            }
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(config)?;
                println!("{}", output);
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                println!("{}", message);
            }
        }
        Ok(())
    }
}

/// Table row for component versions
#[derive(Tabled)]
struct VersionTableRow {
    component: String,
    version: String,
}

impl From<(&str, &str)> for VersionTableRow {
    fn from((component, version): (&str, &str)) -> Self {
        Self {
            component: component.to_string(),
            version: version.to_string(),
        }
    }
}

/// Table row for network and snapshot listings
#[derive(Tabled)]
struct NameTableRow {
    kind: String,
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> ComponentVersions {
        vec![("Batfish", "2023.12.16"), ("Pybatfish", "2023.12.16")].into_iter().collect()
    }

    #[test]
    fn test_render_versions_text() {
        let writer = ConsoleWriter::new(OutputFormat::Text);
        let text = writer.render_versions(&versions()).unwrap();
        assert_eq!(text, "Batfish: 2023.12.16\nPybatfish: 2023.12.16");
    }

    #[test]
    fn test_render_versions_json() {
        let writer = ConsoleWriter::new(OutputFormat::Json);
        let json = writer.render_versions(&versions()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Batfish"], "2023.12.16");
    }

    #[test]
    fn test_render_versions_table() {
        let writer = ConsoleWriter::new(OutputFormat::Table);
        let table = writer.render_versions(&versions()).unwrap();
        assert!(table.contains("component"));
        assert!(table.contains("Pybatfish"));
    }

    #[test]
    fn test_render_names() {
        let names = vec!["net1".to_string(), "net2".to_string()];
        let text = ConsoleWriter::new(OutputFormat::Text).render_names("network", &names).unwrap();
        let table = ConsoleWriter::new(OutputFormat::Table).render_names("network", &names).unwrap();

        assert_eq!(text, "net1\nnet2");
        assert!(table.contains("kind"));
        assert!(table.contains("net2"));
    }
}
