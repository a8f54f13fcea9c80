// serialgen: C serializer generator for //!serialize-annotated structs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use serialgen::{GenerateError, Generator, GeneratorConfig};

// Exactly one positional argument and nothing else: no help or version
// flags, and a path starting with '-' is still the path
#[derive(Parser)]
#[command(name = "serialgen")]
#[command(about = "Generate C serializers for //!serialize-annotated structs", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// C header containing the annotated structs
    #[arg(allow_hyphen_values = true)]
    path: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    // Artifacts land in the current working directory
    let generator = Generator::new(GeneratorConfig::default());

    match generator.run(&cli.path) {
        Ok(written) => {
            info!(
                "generated serializers for {} struct(s) into {} and {}",
                written.struct_count,
                written.header.display(),
                written.source.display()
            );
            ExitCode::SUCCESS
        }
        Err(GenerateError::Validation(err)) => {
            eprint!("{}", err.diagnostics());
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(1)
        }
    }
}
