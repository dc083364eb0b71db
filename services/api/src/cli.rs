use crate::report::{run_convert, run_scale, run_transcript, ConvertArgs, ScaleArgs, TranscriptArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gradebook::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Gradebook",
    about = "Compute GPAs and serve the gradebook API from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Convert a single score between the 10-point and 4-point scales
    Convert(ConvertArgs),
    /// Compute a transcript report from a CSV export
    Transcript(TranscriptArgs),
    /// Print the reference conversion tables
    Scale(ScaleArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Convert(args) => run_convert(args),
        Command::Transcript(args) => run_transcript(args),
        Command::Scale(args) => run_scale(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::gpa::ConversionPolicy;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["gradebook-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn convert_accepts_policy_aliases() {
        let cli = Cli::try_parse_from([
            "gradebook-api",
            "convert",
            "--score10",
            "8.7",
            "--policy",
            "standard",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Convert(args)) => {
                assert_eq!(args.score10, Some(8.7));
                assert_eq!(args.policy, Some(ConversionPolicy::StandardTable));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn convert_requires_exactly_one_score() {
        assert!(Cli::try_parse_from(["gradebook-api", "convert"]).is_err());
        assert!(Cli::try_parse_from([
            "gradebook-api",
            "convert",
            "--score10",
            "8",
            "--score4",
            "3"
        ])
        .is_err());
    }
}
