//! careercraft: resume skill-gap analysis and readiness scoring

use careercraft::catalog::{Catalog, SkillTag};
use careercraft::cli::{self, Cli, Commands, ConfigAction};
use careercraft::config::Config;
use careercraft::error::{CareerCraftError, Result};
use careercraft::input::InputManager;
use careercraft::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use careercraft::output::renderers::export_documents;
use careercraft::processing::analyzer::{AnalysisRequest, Analyzer, JobTarget};
use careercraft::session::SessionState;
use clap::Parser;
use colored::Colorize;
use log::{error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config.as_deref()).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<&Path>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            role,
            job,
            job_text,
            name,
            output,
            detailed,
            save,
            export_dir,
            formats,
            session,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(CareerCraftError::InvalidInput)?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(CareerCraftError::InvalidInput)?,
                None => config.output.format,
            };
            let document_formats = match formats {
                Some(formats) => {
                    cli::parse_document_formats(&formats).map_err(CareerCraftError::InvalidInput)?
                }
                None => config.documents.formats.clone(),
            };

            let catalog = Catalog::load(&config.catalog)?;
            let analyzer = Analyzer::new(&config, catalog)?;
            let mut input_manager = InputManager::new(config.input.clone());

            info!("Reading resume {}", resume.display());
            let resume_text = input_manager.extract_file(&resume).await?;

            let target = match (role, job, job_text) {
                (Some(role), _, _) => JobTarget::Preset(role),
                (None, Some(job), _) => {
                    info!("Reading job description {}", job.display());
                    JobTarget::Description(input_manager.extract_file(&job).await?)
                }
                (None, None, Some(text)) => JobTarget::Description(text.to_lowercase()),
                (None, None, None) => {
                    return Err(CareerCraftError::InvalidInput(
                        "Pick a target with --role, --job or --job-text".to_string(),
                    ))
                }
            };

            let state = match &session {
                Some(path) => SessionState::load(path)?,
                None => SessionState::default(),
            };

            let request = AnalysisRequest::new(name, resume_text, target)
                .with_completed_skills(state.completed_skills.clone());
            let report = analyzer.analyze(&request)?;

            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            let generator = ReportGenerator::from_config(&output_config);
            let formatted = generator.generate_report(&report, &output_format)?;
            println!("{}", formatted);

            if let Some(save_path) = save {
                // A directory gets a generated file name
                let save_path = if save_path.is_dir() {
                    save_path.join(suggest_filename(&output_format, &report.candidate_name, true))
                } else {
                    save_path
                };
                save_report_to_file(&formatted, &save_path)?;
                println!("Report saved to {}", save_path.display());
            }

            if let Some(dir) = export_dir {
                let written = export_documents(
                    &report,
                    &config.documents.candidate_headline,
                    &document_formats,
                    &dir,
                )?;
                println!("Generated {} documents in {}", written.len(), dir.display());
            }

            if let Some(path) = session {
                let next = state.record(&report);
                next.save(&path)?;
                if let Some(delta) = next.trend() {
                    println!("Change since last analysis: {:+} points", delta);
                }
            }
        }

        Commands::Roles => {
            let catalog = Catalog::load(&config.catalog)?;
            println!("{}\n", "Preset roles".bold());
            for role in catalog.roles() {
                let skills: Vec<&str> = role.skills.iter().map(SkillTag::as_str).collect();
                println!("  {}", role.name.green().bold());
                println!("    skills: {}", skills.join(", "));
                if let Some(description) = &role.description {
                    println!("    {}", description.dimmed());
                }
            }
        }

        Commands::Skills => {
            let catalog = Catalog::load(&config.catalog)?;
            println!("{} ({} skills)\n", "Skill vocabulary".bold(), catalog.tags().len());
            for (category, tags) in catalog.categories() {
                let names: Vec<&str> = tags.iter().map(SkillTag::as_str).collect();
                println!("  {}: {}", category.cyan(), names.join(", "));
            }
        }

        Commands::Progress { session, complete } => {
            let mut state = SessionState::load(&session)?;

            if let Some(raw) = complete {
                let catalog = Catalog::load(&config.catalog)?;
                let tag = catalog.tag(&raw).ok_or_else(|| {
                    CareerCraftError::InvalidInput(format!("'{}' is not a known skill", raw))
                })?;
                if state.complete_skill(tag.clone()) {
                    state.save(&session)?;
                    println!("Marked {} as completed", tag.as_str().green());
                } else {
                    println!("{} was already completed", tag);
                }
            }

            print_progress(&state, &session);
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Reset => {
                Config::reset(config_file)?;
                let path = config_file.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
                println!("Configuration reset to defaults at {}", path.display());
            }
            ConfigAction::Path => {
                let path = config_file.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn print_progress(state: &SessionState, path: &Path) {
    println!("{} {}", "Session".bold(), path.display());
    match state.readiness_score {
        Some(score) => println!("  Last readiness score: {}%", score),
        None => println!("  No analysis recorded yet"),
    }
    if let Some(delta) = state.trend() {
        println!("  Change since previous: {:+} points", delta);
    }
    println!("  Analyses recorded: {}", state.history.len());
    if state.completed_skills.is_empty() {
        println!("  Completed learning items: none");
    } else {
        let done: Vec<&str> = state.completed_skills.iter().map(SkillTag::as_str).collect();
        println!("  Completed learning items: {}", done.join(", "));
    }
}
