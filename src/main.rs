//! finscore's entry point.
//! Parses the command line, configures logging and dispatches the subcommand.

use std::process::ExitCode;

use finscore_cli::{
    cli::{get_args, Commands},
    command::run_new,
    generator::TemplateGenerator,
    logger::init_logger,
    template::TemplateRoot,
};

fn main() -> ExitCode {
    let args = get_args();

    init_logger(args.verbose);

    match args.command {
        Commands::New(new_args) => {
            let generator = TemplateGenerator::new();
            let outcome = run_new(
                &new_args,
                TemplateRoot::locate,
                &generator,
                &mut std::io::stdout().lock(),
            );
            outcome.exit_code()
        }
    }
}
