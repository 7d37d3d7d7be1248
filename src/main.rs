use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;

mod compare;
mod config;
mod extract;
mod input;
mod logging;
mod model;
mod render;

use config::{DEFAULT_LOG_EXTENSION, DEFAULT_REPORT_PATH, RunConfig};
use input::InputSource;
use render::ReportFormat;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(name = "bench-workflow")]
#[command(about = "Reconstruct and compare workflows from benchmark logs", long_about = None)]
struct Cli {
    /// Log files to analyze, in report order.
    #[arg(value_name = "LOGS", conflicts_with = "dir")]
    logs: Vec<PathBuf>,

    /// Analyze every matching file in this directory (sorted by name).
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// File extension matched with --dir.
    #[arg(long, default_value = DEFAULT_LOG_EXTENSION)]
    ext: String,

    /// Where the report is written (parent directories are created).
    #[arg(short = 'o', long, default_value = DEFAULT_REPORT_PATH)]
    out: PathBuf,

    /// Report format for stdout and --out.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Print the report without writing it to --out.
    #[arg(long)]
    no_save: bool,

    /// Worker threads used to parse logs.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let source = match self.dir {
            Some(path) => InputSource::Dir {
                path,
                extension: self.ext,
            },
            None if self.logs.is_empty() => {
                bail!("no input logs; pass log files or --dir <DIR>")
            }
            None => InputSource::Files(self.logs),
        };

        if self.jobs == Some(0) {
            bail!("--jobs must be at least 1");
        }

        Ok(RunConfig {
            source,
            format: self.format,
            out: (!self.no_save).then_some(self.out),
            jobs: self.jobs,
            log_filter: if self.quiet { "warn" } else { "info" }.to_string(),
        })
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    logging::init(&config.log_filter)?;
    run(&config)
}

fn run(config: &RunConfig) -> Result<()> {
    if let Some(jobs) = config.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("configure extraction thread pool")?;
    }

    // 1) Resolve inputs.
    let paths = input::gather(&config.source)?;
    tracing::info!("analyzing {} log file(s)", paths.len());

    // 2) Extract (parallel, input order preserved).
    let workflows = input::extract_all(&paths);
    if workflows.is_empty() {
        bail!("no valid workflows found");
    }

    // 3) Compare + render.
    let comparison = compare::compare(&workflows);
    let report = render::render_report(config.format, &workflows, &comparison)?;
    println!("{}", report);

    // 4) Persist.
    if let Some(out) = &config.out {
        render::write_report(out, &report)?;
        tracing::info!("report saved to {}", out.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> Result<RunConfig> {
        Cli::try_parse_from(std::iter::once("bench-workflow").chain(args.iter().copied()))?
            .into_config()
    }

    #[test]
    fn positional_logs_keep_order_and_default_output() {
        let cfg = config(&["b.log", "a.log"]).unwrap();
        assert_eq!(
            cfg,
            RunConfig {
                source: InputSource::Files(vec![PathBuf::from("b.log"), PathBuf::from("a.log")]),
                format: ReportFormat::Text,
                out: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
                jobs: None,
                log_filter: "info".to_string(),
            }
        );
    }

    #[test]
    fn dir_mode_with_options() {
        let cfg = config(&[
            "--dir", "runs", "--ext", "txt", "--format", "json", "--no-save", "-j", "2", "-q",
        ])
        .unwrap();
        assert_eq!(
            cfg.source,
            InputSource::Dir {
                path: PathBuf::from("runs"),
                extension: "txt".to_string(),
            }
        );
        assert_eq!(cfg.format, ReportFormat::Json);
        assert_eq!(cfg.out, None);
        assert_eq!(cfg.jobs, Some(2));
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn rejects_missing_inputs_and_conflicts() {
        assert!(config(&[]).is_err());
        assert!(config(&["--dir", "runs", "a.log"]).is_err());
        assert!(config(&["a.log", "--jobs", "0"]).is_err());
    }

    #[test]
    fn every_option_has_help_text() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let missing: Vec<&str> = cmd
            .get_arguments()
            .filter(|arg| !matches!(arg.get_id().as_str(), "help" | "version"))
            .filter(|arg| arg.get_help().is_none())
            .map(|arg| arg.get_id().as_str())
            .collect();
        assert_eq!(missing, Vec::<&str>::new());
    }

    #[test]
    fn run_writes_report_for_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let logs = tmp.path().join("logs");
        std::fs::create_dir(&logs).unwrap();
        std::fs::write(
            logs.join("benchmark-sql-scan-20240101_120000.log"),
            "PREPARE PHASE\n2️⃣ RUN PHASE\n",
        )
        .unwrap();
        std::fs::write(
            logs.join("benchmark-sql-join-20240101_130000.log"),
            "PREPARE PHASE\n2️⃣ RUN PHASE\n3️⃣ REPORT\n",
        )
        .unwrap();

        let out = tmp.path().join("out").join("report.txt");
        let cfg = RunConfig {
            source: InputSource::Dir {
                path: logs,
                extension: DEFAULT_LOG_EXTENSION.to_string(),
            },
            format: ReportFormat::Text,
            out: Some(out.clone()),
            jobs: None,
            log_filter: "info".to_string(),
        };
        run(&cfg).unwrap();

        let report = std::fs::read_to_string(out).unwrap();
        // Sorted listing puts sql/join first.
        assert!(report.contains("   sql/join: REPORT\n"));
        assert!(report.contains("   sql/join vs sql/scan:\n      Differences: REPORT\n"));
        assert!(report.contains("   PREPARE, RUN\n"));
    }

    #[test]
    fn run_fails_when_nothing_is_readable() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            source: InputSource::Files(vec![tmp.path().join("missing.log")]),
            format: ReportFormat::Text,
            out: None,
            jobs: None,
            log_filter: "info".to_string(),
        };
        let err = run(&cfg).unwrap_err();
        assert_eq!(err.to_string(), "no valid workflows found");
    }
}
