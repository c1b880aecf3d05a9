use pg2ora::{ConvertOptions, Dialect};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "pg2ora.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub dialect: Option<String>,

    #[serde(default)]
    pub convert: ConvertSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertSection {
    pub strict: Option<bool>,
    pub in_transaction: Option<bool>,
}

impl ConfigFile {
    /// Load `path`, or `pg2ora.toml` in the working directory when it exists.
    /// An explicitly named file must exist.
    pub fn discover(path: Option<&Path>) -> anyhow::Result<Option<Self>> {
        match path {
            Some(p) => Self::load(p).map(Some),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG);
                if p.is_file() {
                    Self::load(&p).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read config file {}: {e}", path.display())
        })?;
        Self::parse(&raw)
            .map_err(|e| anyhow::anyhow!("failed to load config file {}: {e:#}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    pub fn options(&self) -> anyhow::Result<ConvertOptions> {
        let mut options = ConvertOptions::new();
        if let Some(dialect) = &self.dialect {
            options = options.with_dialect(parse_dialect(dialect)?);
        }
        if let Some(strict) = self.convert.strict {
            options = options.with_strict(strict);
        }
        if let Some(in_transaction) = self.convert.in_transaction {
            options = options.in_transaction(in_transaction);
        }
        Ok(options)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        self.version = expand_env_vars(&self.version)?;
        if let Some(dialect) = self.dialect.as_mut() {
            *dialect = expand_env_vars(dialect)?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        if let Some(dialect) = &self.dialect {
            parse_dialect(dialect)?;
        }
        Ok(())
    }
}

fn parse_dialect(s: &str) -> anyhow::Result<Dialect> {
    s.parse::<Dialect>().map_err(|e| anyhow::anyhow!(e))
}

/// Replace `${NAME}` and `${NAME:-default}` references. As in the shell, the
/// default applies when the variable is unset or empty.
fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let Some(end) = body.find('}') else {
            anyhow::bail!("`${{` without closing `}}` in config value: {input}");
        };
        out.push_str(&lookup_env(&body[..end])?);
        rest = &body[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

fn lookup_env(reference: &str) -> anyhow::Result<String> {
    let (name, default) = match reference.split_once(":-") {
        Some((name, default)) => (name, Some(default)),
        None => (reference, None),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        anyhow::bail!("invalid environment reference in config: ${{{reference}}}");
    }

    match (std::env::var(name), default) {
        (Ok(value), Some(default)) if value.is_empty() => Ok(default.to_string()),
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_string()),
        (Err(_), None) => {
            anyhow::bail!("config references environment variable {name}, which is not set")
        }
    }
}
