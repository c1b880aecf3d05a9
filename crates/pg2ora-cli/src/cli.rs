use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Convert(ConvertArgs),
}

#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub sql: Option<String>,
    pub files: Vec<PathBuf>,
    pub convert: bool,
    pub print: bool,
    pub json: bool,
    pub strict: Option<bool>,
    pub in_transaction: bool,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str());
    let mut out = ConvertArgs::default();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help),
            "--sql" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--sql requires a value");
                };
                set_sql(&mut out, v)?;
            }
            _ if token.starts_with("--sql=") => {
                set_sql(&mut out, token.trim_start_matches("--sql="))?;
            }
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                out.config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                out.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--convert" => out.convert = true,
            "--print" => out.print = true,
            "--json" => out.json = true,
            "--strict" => out.strict = Some(true),
            "--lenient" => out.strict = Some(false),
            "--in-transaction" => out.in_transaction = true,
            "-v" | "--verbose" => out.verbose = true,
            other if other.starts_with('-') && other.len() > 1 => {
                anyhow::bail!("unknown argument: {other}")
            }
            other if Path::new(other).is_file() => out.files.push(PathBuf::from(other)),
            other => set_sql(&mut out, other)?,
        }
    }

    if out.sql.is_some() && !out.files.is_empty() {
        anyhow::bail!("pass either SQL text or files, not both");
    }

    Ok(Command::Convert(out))
}

fn set_sql(out: &mut ConvertArgs, sql: &str) -> anyhow::Result<()> {
    if out.sql.is_some() {
        anyhow::bail!("SQL text given more than once");
    }
    if sql.trim().is_empty() {
        anyhow::bail!("SQL text must not be empty");
    }
    out.sql = Some(sql.to_string());
    Ok(())
}

pub fn print_help() {
    println!(
        "\
pg2ora - convert PostgreSQL statements to Oracle

USAGE:
  pg2ora [OPTIONS] [SQL | FILES...]

NOTES:
  - Reads stdin when neither SQL text nor files are given.
  - Supports multi-statement input; each statement is handled separately.
  - Without --convert the input is only parsed and printed back as PostgreSQL.

OPTIONS:
  --sql <SQL>           SQL text to process
  --convert             Convert to Oracle and print timings
  --print               Print a banner before each parsed statement
  --json                Print one JSON object per statement
  --strict              Refuse expressions without a translation (default)
  --lenient             Pass untranslated expressions through with a warning
  --in-transaction      Do not add savepoint/commit framing to RETURNING scripts
  --config <FILE>       Config file path (default: pg2ora.toml if present)
  -v, --verbose         Debug logging
  -h, --help            Print help"
    );
}
