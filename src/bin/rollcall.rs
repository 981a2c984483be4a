use rollcall::model::FatalError;
use rollcall::ui::{HumanOutputter, OutputMode, Outputter};
use rollcall::{logging, parse_command, print_usage, run_render, Command, RUN_COMMAND_ENV};

fn main() {
    logging::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let output_mode = OutputMode::from_env();
    let cmd = match parse_command(args) {
        Ok(cmd) => cmd,
        Err(err) => {
            let mut renderer = HumanOutputter::stderr(output_mode);
            let _ = renderer.fatal_error(&FatalError::new(format!(
                "Invalid command arguments: {err}"
            )));
            print_usage();
            std::process::exit(2);
        }
    };

    match cmd {
        Command::Help => {
            print_usage();
        }
        Command::Render(args) => {
            let mut outputter = HumanOutputter::stdout(output_mode);
            if let Ok(run_command) = std::env::var(RUN_COMMAND_ENV) {
                outputter = outputter.with_run_command(run_command);
            }
            if let Err(err) = run_render(&args, &mut outputter) {
                tracing::debug!(error = %err, "render aborted");
                let mut renderer = HumanOutputter::stderr(output_mode);
                let _ = renderer.fatal_error(&FatalError::from(err));
                std::process::exit(1);
            }
        }
    }
}
