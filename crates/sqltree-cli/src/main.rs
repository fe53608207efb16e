mod commands;
mod logger;

use clap::Parser;

use commands::{resolve_dialect, Cli, Commands, DialectArgs, FormatArgs};

fn main() {
    std::process::exit(run(std::env::args_os()));
}

fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let _ = logger::init();
    let cli = Cli::parse_from(args);
    match cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Format(args) => run_format(args),
    }
}

fn run_parse(args: DialectArgs) -> i32 {
    let dialect = match resolve_dialect(&args) {
        Ok(dialect) => dialect,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    match sqltree_parser::parse(&args.sql, &dialect) {
        Ok(parsed) => {
            println!("{:#?}", parsed.statement);
            0
        }
        Err(err) => {
            println!("{err}");
            1
        }
    }
}

fn run_format(args: FormatArgs) -> i32 {
    let dialect = match resolve_dialect(&args.dialect_args) {
        Ok(dialect) => dialect,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    match sqltree::format(&args.dialect_args.sql, &dialect, args.line_length, args.indent) {
        Ok(formatted) => {
            print!("{formatted}");
            0
        }
        Err(err) => {
            println!("{err}");
            1
        }
    }
}
