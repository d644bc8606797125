use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use classgen::{config::Configuration, generator::Generator};

#[derive(Parser)]
#[command(name = "classgen")]
#[command(about = "Generate random Java class hierarchies")]
struct Cli {
    /// TOML file with generation bounds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to write one `<Name>.java` per declaration into
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of interfaces, overrides `run.interfaces`
    #[arg(long)]
    interfaces: Option<usize>,

    /// Number of abstract classes, overrides `run.abstractClasses`
    #[arg(long)]
    abstract_classes: Option<usize>,

    /// Number of concrete classes, overrides `run.concreteClasses`
    #[arg(long)]
    concrete_classes: Option<usize>,
}

fn init_tracing() {
    // CLASSGEN_LOG_STYLE: "compact" (default) or "full" (timestamps and span events)
    if let Ok(filter) = EnvFilter::try_from_env("CLASSGEN_LOG") {
        let style = std::env::var("CLASSGEN_LOG_STYLE").unwrap_or_default();
        if style == "full" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .without_time()
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn write_new(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(text.as_bytes())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Configuration::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Configuration::default(),
    };
    if let Some(n) = cli.interfaces {
        config.run.interfaces = n;
    }
    if let Some(n) = cli.abstract_classes {
        config.run.abstract_classes = n;
    }
    if let Some(n) = cli.concrete_classes {
        config.run.concrete_classes = n;
    }

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    eprintln!("classgen: seed {seed}");

    let generation = Generator::new(config, seed).run();
    let rendered = generation.render_all();

    let Some(output) = cli.output else {
        let texts: Vec<&str> = rendered.iter().map(|(_, text)| text.as_str()).collect();
        print!("{}", texts.join("\n"));
        return ExitCode::SUCCESS;
    };

    if let Err(e) = fs::create_dir_all(&output) {
        eprintln!(
            "error: failed to create output directory '{}': {}",
            output.display(),
            e
        );
        return ExitCode::FAILURE;
    }
    for (class, text) in &rendered {
        let path = output.join(format!("{}.java", class.simple_name()));
        if let Err(e) = write_new(&path, text) {
            eprintln!("error: failed to write '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }
    eprintln!(
        "classgen: wrote {} declarations to {}",
        rendered.len(),
        output.display()
    );

    ExitCode::SUCCESS
}
