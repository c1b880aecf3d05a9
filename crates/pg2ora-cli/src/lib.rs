mod cli;
mod config;
mod convert;
mod logging;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help => {
            cli::print_help();
            Ok(())
        }
        cli::Command::Convert(args) => {
            logging::init(args.verbose)?;
            convert::run(args)
        }
    }
}
