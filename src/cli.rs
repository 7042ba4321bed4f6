use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Screen refresh rate in hertz.
    #[arg(short = 'H', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,

    /// Path to a TOML configuration file. Built-in defaults are used if omitted.
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Print status without ANSI colours.
    #[arg(long)]
    pub no_color: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}
