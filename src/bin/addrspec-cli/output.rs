use addrspec_lib::{DiagnosisCode, Report};
use anyhow::{Context, Result, bail};

use std::fmt::Write as _;

use crate::args::Cli;

pub fn write_reports(rows: &[Report], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows, cli),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(rows: &[Report]) -> bool {
    rows.iter().any(|row| !row.valid)
}

fn write_human(rows: &[Report], cli: &Cli) -> Result<()> {
    let text = render_human(rows, cli.all)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, text.as_bytes())?;
    } else {
        print!("{text}");
    }
    Ok(())
}

fn render_human(rows: &[Report], all: bool) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        let tag = if row.valid { "[OK]     " } else { "[INVALID]" };
        if row.code == DiagnosisCode::Valid {
            writeln!(out, "{tag} {}", row.input)?;
        } else {
            writeln!(out, "{tag} {} :: {} ({})", row.input, row.code, row.code.as_u8())?;
        }

        if let Some(address) = &row.address {
            if address.email != row.input {
                writeln!(out, "          ascii: {}", address.email)?;
            }
        }

        if all {
            for diagnosis in &row.diagnoses {
                writeln!(out, "          - {diagnosis}")?;
            }
        }
    }
    Ok(out)
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[Report], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[Report], _: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[Report], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[Report], _: &Cli) -> Result<()> {
    bail!("format=ndjson requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[Report], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.write_record(&csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        for row in rows {
            wtr.write_record(&csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[Report], _: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

/// input, ascii address, code name, code value, category, valid, diagnoses
#[cfg(feature = "with-csv")]
fn csv_record(row: &Report) -> Vec<String> {
    let diagnoses = row
        .diagnoses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|");

    vec![
        row.input.clone(),
        row.address
            .as_ref()
            .map(|a| a.email.clone())
            .unwrap_or_default(),
        row.code.name().to_string(),
        row.code.as_u8().to_string(),
        row.code.category().name().to_string(),
        row.valid.to_string(),
        diagnoses,
    ]
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrspec_lib::{Options, validate};
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        <Cli as Parser>::try_parse_from(std::iter::once("addrspec-cli").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn human_lists_diagnoses_with_all() {
        let rows = [validate("test..x@iana.org", &Options::default())];
        let text = render_human(&rows, true).expect("render");
        assert!(text.starts_with("[INVALID] test..x@iana.org :: errConsecutiveDots (132)"));
        assert!(text.contains("          ascii: test.x@iana.org"));
        assert!(text.contains("          - errConsecutiveDots (132) at 5"));

        let short = render_human(&rows, false).expect("render");
        assert_eq!(short.lines().count(), 2);
        assert!(!short.contains(" - "));
    }

    #[test]
    fn human_format_honours_out() {
        let path = std::env::temp_dir().join(format!("addrspec-human-{}.txt", std::process::id()));
        let path_str = path.to_str().expect("utf-8 temp path");
        let cli = cli(&["--out", path_str, "validate", "first.last@example.com"]);
        let rows = [validate("first.last@example.com", &Options::default())];

        write_reports(&rows, &cli).expect("write");
        let written = std::fs::read_to_string(&path).expect("report file");
        std::fs::remove_file(&path).ok();

        assert_eq!(written, "[OK]      first.last@example.com\n");
        assert!(!any_invalid(&rows));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let cli = cli(&["--format", "xml", "validate", "a@b.c"]);
        let rows = [validate("a@b.c", &Options::default())];
        assert!(write_reports(&rows, &cli).is_err());
    }

    #[test]
    fn flags_build_options() {
        let cli = cli(&["--tld-allow", "com,NET", "--ascii-only", "--exclude", "cfwsComment", "--threshold", "0"]);
        let options = cli.options().expect("options");
        assert!(!options.allow_unicode);
        assert_eq!(options.threshold, 0);
        assert!(options.tld_whitelist.as_ref().is_some_and(|l| l.contains("net")));
        assert!(options.exclude_diagnoses.contains(&DiagnosisCode::CfwsComment));
    }
}
