use addrspec_lib::{Options, OptionsBuilder};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "addrspec-cli", version, about = "Diagnose email addresses against RFC 5321/5322/6530")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// read addresses from stdin (one per line)
    #[arg(long)]
    pub stdin: bool,

    /// write the report to this file instead of stdout (any --format)
    #[arg(long)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// codes below this value are reported as valid (0 = raw code)
    #[arg(long)]
    pub threshold: Option<String>,

    /// allowed TLDs, comma separated
    #[arg(long = "tld-allow")]
    pub tld_allow: Option<String>,

    /// denied TLDs, comma separated (wins over --tld-allow)
    #[arg(long = "tld-deny")]
    pub tld_deny: Option<String>,

    /// report non-ASCII input as undesiredNonAscii
    #[arg(long)]
    pub ascii_only: bool,

    /// minimum number of domain labels
    #[arg(long)]
    pub min_domain_atoms: Option<String>,

    /// ignore a diagnosis, by name or value (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// print every diagnosis, not only the final code
    #[arg(long)]
    pub all: bool,

    /// options file (JSON), flags override it
    #[cfg(feature = "with-serde")]
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    Validate { email: String },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    /// Options file first, then every flag on top of it.
    pub fn options(&self) -> Result<Options> {
        let mut builder = OptionsBuilder::from(self.base_options()?);

        if let Some(threshold) = &self.threshold {
            builder = builder.threshold_str(threshold)?;
        }
        if let Some(list) = &self.tld_allow {
            builder = builder.tld_whitelist_str(list).context("--tld-allow")?;
        }
        if let Some(list) = &self.tld_deny {
            builder = builder.tld_blacklist_str(list).context("--tld-deny")?;
        }
        if self.ascii_only {
            builder = builder.allow_unicode(false);
        }
        if let Some(atoms) = &self.min_domain_atoms {
            builder = builder.min_domain_atoms_str(atoms)?;
        }
        for code in &self.exclude {
            builder = builder.exclude_str(code).context("--exclude")?;
        }

        Ok(builder.build())
    }

    #[cfg(feature = "with-serde")]
    fn base_options(&self) -> Result<Options> {
        let Some(path) = &self.config else {
            return Ok(Options::default());
        };
        let raw = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
        serde_json::from_str(&raw).with_context(|| format!("parse {path}"))
    }

    #[cfg(not(feature = "with-serde"))]
    fn base_options(&self) -> Result<Options> {
        Ok(Options::default())
    }
}
