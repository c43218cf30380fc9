mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};
use dotbundle::config::Config;
use dotbundle::fetch::GitCli;
use dotbundle::install::{InstallError, InstallReport, Installer, Plan, DEFAULT_SOURCE};
use dotbundle::prompt::{AssumeYes, Confirm, LinePrompt};
use dotbundle::stamp::SystemClock;
use dotbundle::{output, paths, verify};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp_secs();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn resolve_target(cli_target: Option<&str>, config: &Config, home: &Path) -> PathBuf {
    match cli_target.or(config.install.target.as_deref()) {
        Some(t) => paths::expand_home(t, home),
        None => paths::default_target(home),
    }
}

fn resolve_home_file(cli_file: Option<&str>, config: &Config, home: &Path) -> PathBuf {
    match cli_file.or(config.install.home_file.as_deref()) {
        Some(f) => paths::expand_home(f, home),
        None => paths::default_home_marker(home),
    }
}

fn install(plan: &Plan, confirm: &mut dyn Confirm) -> Result<InstallReport> {
    let git = GitCli::default();
    let mut status = std::io::stderr();
    let mut installer = Installer {
        fetcher: &git,
        confirm,
        clock: &SystemClock,
        status: &mut status,
    };
    installer.run(plan)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let home = paths::home_dir()?;
    let config_path = paths::config_path(&home);
    let config = Config::load_from(&config_path)?;
    log::debug!("config: {}", config_path.display());

    let target = resolve_target(cli.target.as_deref(), &config, &home);

    match cli.command {
        Some(Command::Verify) => {
            let v = verify::verify(&target)?;
            eprint!("{}", output::format_roles(&v.roles));
            if !v.is_ok() {
                return Err(InstallError::Verify {
                    target,
                    missing: v.missing,
                }
                .into());
            }
            eprintln!("Installation at {} is valid", target.display());
        }

        Some(Command::Roles) => {
            let roles = verify::list_roles(&target.join(paths::ROLES_DIR))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&roles)?);
            } else {
                for role in &roles {
                    println!("{role}");
                }
            }
        }

        None => {
            let source = cli
                .source
                .or(config.install.source.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
            let home_file = resolve_home_file(cli.home_file.as_deref(), &config, &home);
            let plan = Plan::new(source, target)
                .with_home_file(home_file)
                .with_extra_prune(config.install.prune);

            if cli.dry_run {
                let target_exists = plan.target.symlink_metadata().is_ok();
                let home_file_exists = plan.home_file.as_ref().is_some_and(|f| f.is_file());
                print!(
                    "{}",
                    output::format_plan(&plan, target_exists, home_file_exists)
                );
                return Ok(());
            }

            let result = if cli.yes {
                install(&plan, &mut AssumeYes)
            } else {
                install(&plan, &mut LinePrompt::stdio())
            };
            let report = match result {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Installation failed");
                    return Err(e);
                }
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                eprint!("{}", output::format_report(&report));
            }
            eprintln!("Installation complete");
        }
    }

    Ok(())
}
