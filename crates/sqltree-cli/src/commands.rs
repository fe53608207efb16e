use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "sqltree")]
#[command(about = "Tokenizes, parses, and pretty-prints MySQL/Presto/Redshift SQL", long_about = None, version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "parse", about = "Parse SQL and print its tree, or the rendered parse error")]
    Parse(DialectArgs),
    #[command(name = "format", about = "Parse and re-emit SQL in canonical form")]
    Format(FormatArgs),
}

#[derive(Debug, Parser)]
pub struct DialectArgs {
    /// The SQL statement to parse.
    pub sql: String,
    /// `mysql`, `presto`, or `redshift`.
    #[arg(long, default_value = "mysql")]
    pub dialect: String,
    /// Dotted dialect version (e.g. `8.0`); omitted means "latest".
    #[arg(long)]
    pub version: Option<String>,
}

#[derive(Debug, Parser)]
pub struct FormatArgs {
    #[command(flatten)]
    pub dialect_args: DialectArgs,
    /// Target line width before the formatter splits a comma list.
    #[arg(long, default_value_t = sqltree::DEFAULT_LINE_LENGTH)]
    pub line_length: usize,
    /// Base indentation, in spaces, applied to every emitted line.
    #[arg(long, default_value_t = 0)]
    pub indent: usize,
}

pub fn resolve_dialect(args: &DialectArgs) -> Result<sqltree_core::Dialect, String> {
    use std::str::FromStr;
    let vendor = sqltree_core::Vendor::from_str(&args.dialect.to_ascii_lowercase()).map_err(|_| {
        format!("unknown dialect {:?}: expected one of {}", args.dialect, sqltree_core::vendor_names().join(", "))
    })?;
    let version = match &args.version {
        None => None,
        Some(v) => {
            let parts: Result<Vec<u32>, _> = v.split('.').map(str::parse).collect();
            Some(parts.map_err(|_| format!("invalid version {v:?}: expected dotted integers like 8.0"))?)
        }
    };
    Ok(sqltree_core::Dialect::new(vendor, version))
}
