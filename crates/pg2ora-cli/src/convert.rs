use crate::cli::ConvertArgs;
use crate::config::ConfigFile;
use colored::Colorize;
use pg2ora::{ConvertOptions, Converter};
use serde::Serialize;
use std::io::Read;
use std::time::{Duration, Instant};

struct Source {
    name: String,
    sql: String,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a str,
    output: &'a str,
    elapsed_us: u64,
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let converter = Converter::new(resolve_options(&args)?);
    tracing::debug!(options = ?converter.options(), "converter ready");

    for source in read_sources(&args)? {
        let stmts = pg2ora::parse::split_statements(&source.sql).map_err(|e| {
            anyhow::anyhow!("failed to split SQL statements from {}: {e}", source.name)
        })?;
        if stmts.is_empty() {
            anyhow::bail!("no SQL statements found in {}", source.name);
        }

        for (idx, stmt) in stmts.into_iter().enumerate() {
            let header = format!("{}:stmt{}", source.name, idx + 1);
            let began = Instant::now();
            let result = if args.convert {
                converter.convert(stmt)
            } else {
                pg2ora::parse::canonical(stmt)
            };
            let elapsed = began.elapsed();

            let output = match result {
                Ok(sql) => sql,
                Err(e) => {
                    tracing::error!(
                        statement = %header,
                        category = ?e.category(),
                        "{e}"
                    );
                    let what = if args.convert { "conversion" } else { "parse" };
                    anyhow::bail!("{header}: {what} failed");
                }
            };

            if args.json {
                let report = Report {
                    input: stmt,
                    output: &output,
                    elapsed_us: elapsed.as_micros() as u64,
                };
                println!("{}", serde_json::to_string(&report)?);
            } else if args.convert {
                print_converted(&output, elapsed, start.elapsed());
            } else {
                print_parsed(&output, args.print);
            }
        }
    }

    Ok(())
}

/// Config file values, overridden by command-line flags.
fn resolve_options(args: &ConvertArgs) -> anyhow::Result<ConvertOptions> {
    let mut options = match ConfigFile::discover(args.config.as_deref())? {
        Some(file) => file.options()?,
        None => ConvertOptions::default(),
    };
    if let Some(strict) = args.strict {
        options = options.with_strict(strict);
    }
    if args.in_transaction {
        options = options.in_transaction(true);
    }
    Ok(options)
}

fn read_sources(args: &ConvertArgs) -> anyhow::Result<Vec<Source>> {
    if let Some(sql) = &args.sql {
        return Ok(vec![Source {
            name: "arg".to_string(),
            sql: sql.clone(),
        }]);
    }

    if args.files.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
        if buf.trim().is_empty() {
            anyhow::bail!("no SQL provided (pass SQL, files or pipe SQL to stdin)");
        }
        return Ok(vec![Source {
            name: "stdin".to_string(),
            sql: buf,
        }]);
    }

    args.files
        .iter()
        .map(|file| {
            let sql = std::fs::read_to_string(file)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
            Ok(Source {
                name: file.display().to_string(),
                sql,
            })
        })
        .collect()
}

fn print_converted(sql: &str, generate: Duration, total: Duration) {
    println!("generate: {generate:?}");
    println!("total: {total:?}");
    println!("{sql}");
}

fn print_parsed(sql: &str, banner: bool) {
    if banner {
        println!("{}", "GENERATED QUERY".green().bold());
    }
    println!("{sql}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let path = std::env::temp_dir().join("pg2ora_cli_resolve_options.toml");
        std::fs::write(&path, "version = \"1\"\n[convert]\nstrict = false\n").unwrap();

        let mut args = ConvertArgs {
            config: Some(path.clone()),
            ..Default::default()
        };
        let options = resolve_options(&args).unwrap();
        assert!(!options.strict);
        assert!(!options.in_transaction);

        args.strict = Some(true);
        args.in_transaction = true;
        let options = resolve_options(&args).unwrap();
        assert!(options.strict);
        assert!(options.in_transaction);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn named_config_must_exist() {
        let args = ConvertArgs {
            config: Some(std::env::temp_dir().join("pg2ora_cli_missing.toml")),
            ..Default::default()
        };
        assert!(resolve_options(&args).is_err());
    }

    #[test]
    fn sql_argument_is_single_source() {
        let args = ConvertArgs {
            sql: Some("select 1; select 2".to_string()),
            ..Default::default()
        };
        let sources = read_sources(&args).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "arg");
    }
}
