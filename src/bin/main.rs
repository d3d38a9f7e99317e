//! sigprint CLI
//!
//! Fingerprints the signing identity of JAR/APK packages, compares two
//! packages' signers and manages the persistent configuration.

use clap::{Parser, Subcommand, ValueEnum};
use miette::{miette, Context, IntoDiagnostic, Result};
use sigprint::{
    CompareWorkflow, ConfigManager, DiagnosticKind, DirectoryPackageLocator, ExportFormat,
    FingerprintConfiguration, FingerprintReport, FingerprintWorkflow, SignerComparison,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sigprint")]
#[command(about = "Signing-identity fingerprints for JAR/APK packages")]
#[command(long_about = "
sigprint - signing-identity fingerprints for signed ZIP packages

Reads the PKCS#7 signature blocks under META-INF/ (*.RSA, *.DSA), folds the
certificates' public keys and signatures into two 32-bit hashes and prints
them as <key_hash>,<sign_hash>. Equal fingerprints mean equal signing keys.

EXAMPLES:
    # Fingerprint one or more packages
    sigprint fingerprint app.apk other.apk

    # Show the certificates behind a fingerprint
    sigprint fingerprint app.apk --report

    # Check whether two builds share a signer (exit status 1 if not)
    sigprint compare app-1.0.apk app-1.1.apk

    # Resolve an installed package under a directory and fingerprint it
    sigprint package com.example.app --dir /data/app

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fingerprint one or more package archives
    Fingerprint {
        /// Package archives (.apk, .jar, .zip)
        #[arg(value_name = "ARCHIVE", required = true)]
        archives: Vec<PathBuf>,

        /// Emit JSON
        #[arg(long)]
        json: bool,

        /// Show signature entries, certificates and diagnostics
        #[arg(long)]
        report: bool,
    },

    /// Check whether two archives were signed by the same identity
    Compare {
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a package identifier to its archive and fingerprint it
    Package {
        /// Package identifier, e.g. com.example.app
        #[arg(value_name = "PACKAGE_ID")]
        package_id: String,

        /// Additional search directory (repeatable; configured dirs follow)
        #[arg(short, long = "dir", value_name = "DIR")]
        dirs: Vec<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Create default configuration file
    Init,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Export configuration
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ExportFormatArg,
    },
}

#[derive(ValueEnum, Clone)]
enum ExportFormatArg {
    Toml,
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Toml => ExportFormat::Toml,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new().into_diagnostic()?,
    };

    let verbose = cli.verbose
        || manager
            .load_or_default()
            .map(|config| config.verbose)
            .unwrap_or(false);
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Fingerprint {
            archives,
            json,
            report,
        } => {
            let config = load_config(&manager)?;
            let json = json || config.output_format == "json";
            handle_fingerprint_command(&config, &archives, json, report)
        }

        Commands::Compare { left, right, json } => {
            let config = load_config(&manager)?;
            let json = json || config.output_format == "json";
            let same = handle_compare_command(&config, left, right, json)?;
            if !same {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Package { package_id, dirs } => {
            let config = load_config(&manager)?;
            handle_package_command(&config, &package_id, dirs)
        }

        Commands::Config(config_cmd) => handle_config_command(&manager, config_cmd),
    }
}

fn load_config(manager: &ConfigManager) -> Result<FingerprintConfiguration> {
    manager
        .load_or_default()
        .into_diagnostic()
        .with_context(|| format!("Invalid configuration at {}", manager.config_path().display()))
}

fn handle_fingerprint_command(
    config: &FingerprintConfiguration,
    archives: &[PathBuf],
    json: bool,
    report: bool,
) -> Result<()> {
    let workflow = FingerprintWorkflow::from_config(config);
    let results = workflow.run_many(archives, config.parallel);
    let mut failures = 0usize;

    if json {
        let values: Vec<serde_json::Value> = archives
            .iter()
            .zip(&results)
            .map(|(path, result)| match result {
                Ok(fingerprint_report) => {
                    serde_json::to_value(fingerprint_report).unwrap_or_default()
                }
                Err(e) => serde_json::json!({
                    "archive": path,
                    "error": e.to_string(),
                }),
            })
            .collect();
        failures = results.iter().filter(|r| r.is_err()).count();
        let text = serde_json::to_string_pretty(&values).into_diagnostic()?;
        println!("{text}");
    } else {
        for (path, result) in archives.iter().zip(results) {
            match result {
                Ok(fingerprint_report) => {
                    let fingerprint = fingerprint_report
                        .fingerprint
                        .map_or_else(|| "-".to_string(), |fp| fp.to_string());
                    println!("{}\t{fingerprint}", path.display());
                    if report {
                        print_report(&fingerprint_report);
                    }
                }
                Err(e) => {
                    failures += 1;
                    eprintln!("{}\terror: {e}", path.display());
                }
            }
        }
    }

    if failures > 0 {
        return Err(miette!("{failures} archive(s) could not be read"));
    }
    Ok(())
}

fn print_report(report: &FingerprintReport) {
    println!(
        "  key hex: {} chars, signature hex: {} chars",
        report.key_hex_len, report.sign_hex_len
    );
    for entry in &report.entries {
        println!("  {} ({} bytes)", entry.name, entry.size);
        for (index, cert) in entry.certificates.iter().enumerate() {
            println!("    #{index} subject: {}", cert.subject);
            println!("       issuer:  {}", cert.issuer);
            println!("       serial:  {}", cert.serial);
            println!(
                "       key:     {} ({}, {} bytes), signature {} bytes",
                cert.key_algorithm.as_str(),
                cert.key_algorithm_oid,
                cert.key_len,
                cert.signature_len
            );
        }
    }
    for diagnostic in &report.diagnostics {
        let detail = match &diagnostic.kind {
            DiagnosticKind::DecodeFailure { reason } => format!("not decoded: {reason}"),
            DiagnosticKind::TooLarge { size, limit } => {
                format!("skipped: {size} bytes exceeds limit of {limit}")
            }
            DiagnosticKind::UnsupportedKey {
                certificate_index,
                algorithm_oid,
            } => format!(
                "certificate #{certificate_index}: key algorithm {algorithm_oid} contributes no key bytes"
            ),
        };
        println!("  ⚠️  {}: {detail}", diagnostic.entry);
    }
}

fn handle_compare_command(
    config: &FingerprintConfiguration,
    left: PathBuf,
    right: PathBuf,
    json: bool,
) -> Result<bool> {
    let workflow = CompareWorkflow::new(FingerprintWorkflow::from_config(config));
    let comparison = workflow
        .run(&left, &right)
        .into_diagnostic()
        .context("Comparison failed")?;

    if json {
        let text = serde_json::to_string_pretty(&comparison).into_diagnostic()?;
        println!("{text}");
    } else {
        match &comparison {
            SignerComparison::SameSigner { fingerprint } => {
                println!("✅ Same signer ({fingerprint})");
            }
            SignerComparison::DifferentSigner {
                left: left_fp,
                right: right_fp,
            } => {
                println!("❌ Different signers");
                println!("  {}: {left_fp}", left.display());
                println!("  {}: {right_fp}", right.display());
            }
            SignerComparison::Unsigned {
                left_signed,
                right_signed,
            } => {
                println!("❌ Cannot compare: no fingerprint for");
                if !left_signed {
                    println!("  {}", left.display());
                }
                if !right_signed {
                    println!("  {}", right.display());
                }
            }
        }
    }

    Ok(comparison.is_same_signer())
}

fn handle_package_command(
    config: &FingerprintConfiguration,
    package_id: &str,
    mut dirs: Vec<PathBuf>,
) -> Result<()> {
    dirs.extend(config.package_roots());
    if dirs.is_empty() {
        return Err(miette!(
            "No package directories: pass --dir or set package_dirs in the configuration"
        ));
    }

    let locator = DirectoryPackageLocator::new(dirs);
    let workflow = FingerprintWorkflow::from_config(config);
    match workflow.installed_package(&locator, package_id) {
        Some(fingerprint) => {
            println!("{package_id}\t{fingerprint}");
            Ok(())
        }
        None => Err(miette!("No fingerprint for package {package_id}")),
    }
}

fn handle_config_command(manager: &ConfigManager, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = load_config(manager)?;
            println!("📋 Configuration ({})", manager.config_path().display());
            println!("  max_entry_bytes: {}", config.max_entry_bytes);
            println!("  package_dirs:    {}", config.package_dirs.join(", "));
            println!("  output_format:   {}", config.output_format);
            println!("  parallel:        {}", config.parallel);
            println!("  verbose:         {}", config.verbose);
        }
        ConfigCommands::Init => {
            manager.save(&FingerprintConfiguration::default()).into_diagnostic()?;
            println!("✅ Created {}", manager.config_path().display());
        }
        ConfigCommands::Set { key, value } => {
            manager
                .update_value(&key, &value)
                .into_diagnostic()
                .with_context(|| format!("Failed to set {key}"))?;
            println!("✅ {key} = {value}");
        }
        ConfigCommands::Export { format } => {
            let exported = manager.export_config(format.into()).into_diagnostic()?;
            println!("{exported}");
        }
    }
    Ok(())
}
