//! CarePrep CLI
//!
//! Command-line interface for CarePrep operations:
//! - Check deployment status and repair it
//! - Count down to a surgery date
//! - Manage the language preference and look up translations

use anyhow::{bail, Context};
use careprep::backend::{ImageType, RestStore};
use careprep::config::{generate_default_config, Config};
use careprep::countdown::{parse_target, time_remaining, CountdownTicker, SystemClock};
use careprep::deployment::{check_deployment_status, create_roles, fix_missing_user_profile};
use careprep::images::{LoadOutcome, PatientImageLoader};
use careprep::locale::{use_locale, with_locale, FilePreferenceStore, Language, LocaleContext};
use careprep::logging::init_tracing;
use careprep::utils::{format_date, validate_email};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "careprep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Surgery preparation dashboard tooling")]
#[command(long_about = "CarePrep keeps the hosted backend ready for the patient dashboard.\nCheck and repair the deployment, count down to surgery, and manage translations.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show deployment status
    Status,

    /// Create any missing seed roles
    SeedRoles,

    /// Create the Patient profile for a user that has none
    FixProfile {
        /// Auth user id
        user_id: String,
        /// Account email
        email: String,
    },

    /// Time left until a surgery date
    Countdown {
        /// Target date or timestamp (e.g. 2026-11-01, 2026-11-01T08:30:00Z)
        target: String,
        /// Keep printing every second until the target is reached
        #[arg(short, long)]
        watch: bool,
    },

    /// Show or change the preferred language
    Language {
        /// New language code (en, th); omit to show the current one
        code: Option<String>,
    },

    /// Translate a catalog key in the preferred language
    Translate {
        /// Catalog key, e.g. countdown.title
        key: String,
        /// Override the preferred language
        #[arg(short, long)]
        lang: Option<String>,
        /// Placeholder values in key=value format
        #[arg(short = 'P', long)]
        param: Vec<String>,
    },

    /// List a patient's images of one type
    Images {
        /// Patient id
        patient_id: String,
        /// Image type (quotation, progress, medical, identification)
        #[arg(short = 't', long = "type", default_value = "progress")]
        image_type: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default()?,
    };
    // A second subscriber (e.g. in tests) is not fatal for the CLI
    let _ = init_tracing(&config.logging);
    tracing::debug!(source = ?source, "Configuration loaded");

    let json = cli.format == "json";

    match cli.command {
        Commands::Status => {
            let store = Arc::new(RestStore::new(config.backend_client_config())?);
            let status = check_deployment_status(store).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("CarePrep v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend:        {}", config.backend.url);
                println!("Connected:      {}", yes_no(status.is_connected));
                println!("Roles:          {}", yes_no(status.has_roles));
                println!("User profiles:  {}", yes_no(status.has_user_profiles));

                if let Some(roles) = status
                    .details
                    .as_ref()
                    .and_then(|d| d["roles"].as_array())
                {
                    let names: Vec<&str> = roles.iter().filter_map(|r| r.as_str()).collect();
                    if !names.is_empty() {
                        println!("Role names:     {}", names.join(", "));
                    }
                }
                if let Some(error) = &status.error {
                    println!();
                    println!("Error: {}", error);
                }
            }

            if !status.is_connected {
                std::process::exit(1);
            }
        }

        Commands::SeedRoles => {
            let store = RestStore::new(config.backend_client_config())?;
            let report = create_roles(&store).await;
            print_report(&report, json)?;
            if !report.success {
                std::process::exit(1);
            }
        }

        Commands::FixProfile { user_id, email } => {
            validate_email(&email)?;
            let store = RestStore::new(config.backend_client_config())?;
            let report = fix_missing_user_profile(&store, &user_id, &email).await;
            print_report(&report, json)?;
            if !report.success {
                std::process::exit(1);
            }
        }

        Commands::Countdown { target, watch } => {
            let Some(parsed) = parse_target(&target) else {
                bail!("Invalid target date: {}", target);
            };

            let remaining = time_remaining(Some(parsed), Utc::now());
            println!("Surgery on {}", format_date(parsed.date_naive(), Language::En));
            println!("{}", remaining);

            if watch && !remaining.is_zero() {
                let ticker = CountdownTicker::start(Some(parsed), Arc::new(SystemClock));
                let mut updates = ticker.subscribe();

                loop {
                    tokio::select! {
                        changed = updates.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            let remaining = *updates.borrow_and_update();
                            println!("{}", remaining);
                            if remaining.is_zero() {
                                break;
                            }
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
            }
        }

        Commands::Language { code } => {
            let ctx = locale_context(&config);

            if let Some(code) = code {
                let language = ctx
                    .set_language_code(&code)
                    .with_context(|| format!("Could not switch language to {}", code))?;
                println!("Language set to {} ({})", language.native_name(), language);
            } else {
                let language = ctx.language();
                println!("{} ({})", language.native_name(), language);
            }

            let document = ctx.document();
            println!(
                "lang={} dir={} font={}",
                document.lang, document.dir, document.font_class
            );
        }

        Commands::Translate { key, lang, param } => {
            let params: Vec<(String, String)> = param
                .iter()
                .filter_map(|p| p.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

            let text = match lang {
                Some(code) => {
                    let language: Language = code.parse()?;
                    careprep::locale::translate(language, &key, &borrowed(&params))
                }
                None => {
                    let ctx = locale_context(&config);
                    with_locale(ctx, async { use_locale().t(&key, &borrowed(&params)) }).await
                }
            };
            println!("{}", text);
        }

        Commands::Images {
            patient_id,
            image_type,
        } => {
            let image_type: ImageType = image_type.parse().map_err(anyhow::Error::msg)?;
            let store = Arc::new(RestStore::new(config.backend_client_config())?);
            let loader = PatientImageLoader::new(store);

            if let LoadOutcome::Failed(error) = loader.load(&patient_id, image_type).await {
                bail!("Failed to load images: {}", error);
            }

            let state = loader.state().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&state.images)?);
            } else if state.images.is_empty() {
                println!("No {} images for patient {}", image_type, patient_id);
            } else {
                println!("{:<38} {:<30} {}", "ID", "File", "Uploaded");
                println!("{}", "-".repeat(90));
                for image in &state.images {
                    println!(
                        "{:<38} {:<30} {}",
                        image.id,
                        image.file_name,
                        image
                            .created_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| "-".to_string())
                    );
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn locale_context(config: &Config) -> Arc<LocaleContext> {
    let store = FilePreferenceStore::new(config.locale.preferences_path());
    Arc::new(LocaleContext::new(Arc::new(store)))
}

fn borrowed(params: &[(String, String)]) -> Vec<(&str, &str)> {
    params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

fn print_report(report: &careprep::deployment::OperationReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        let marker = if report.success { "OK" } else { "FAILED" };
        println!("[{}] {}", marker, report.message);
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
