mod calc;
mod strings;
mod utils;

#[cfg(test)]
mod tests;

use calc::CalcArgs;
use clap::Parser;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    name = "qpcrcalc",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[clap(flatten)]
    utils: UtilsArgs,
    #[clap(flatten)]
    args:  CalcArgs,
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    cli.utils.setup()?;
    cli.args.run(&cli.utils)?;
    Ok(())
}
