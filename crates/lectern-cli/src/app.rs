//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use lectern_core::math;
use lectern_core::{
    ContentSplitter, MalformedDirective, QuartoConfig, QuartoGenerator, SegmenterConfig,
};
use lectern_render::{RenderEngine, RenderFormat};

use crate::settings::Settings;

/// Output format for check reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// Target format for the rendered notes document
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum NotesTarget {
    /// Paginated PDF document
    #[default]
    Pdf,
    /// Standalone HTML page
    Html,
}

impl NotesTarget {
    fn render_format(self) -> RenderFormat {
        match self {
            NotesTarget::Pdf => RenderFormat::Pdf,
            NotesTarget::Html => RenderFormat::Html,
        }
    }
}

#[derive(Parser)]
#[command(name = "lectern")]
#[command(author, version, about = "One lecture source, two documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Quarto slide and notes files from annotated markdown
    Convert {
        /// Input markdown file
        input: PathBuf,

        /// Output directory for the generated files
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Render the generated files with quarto after writing them
        #[arg(long)]
        render: bool,

        /// Format for the rendered notes document
        #[arg(long, value_enum, default_value = "pdf")]
        to: NotesTarget,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check an annotated markdown file for directive and math issues
    Check {
        /// Input markdown file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the routed slide and notes streams without writing files
    Split {
        /// Input markdown file
        input: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            render,
            to,
            config,
        } => {
            convert_command(&input, &output, render, to, config.as_deref())?;
        }
        Commands::Check { input, format } => {
            check_command(&input, format)?;
        }
        Commands::Split { input } => {
            split_command(&input)?;
        }
    }

    Ok(())
}

/// Execute the convert command
pub fn convert_command(
    input: &Path,
    output_dir: &Path,
    render: bool,
    to: NotesTarget,
    config_path: Option<&Path>,
) -> Result<()> {
    println!("lectern v{}", lectern_core::VERSION);
    println!("Converting: {}", input.display());

    let settings = load_settings(config_path)?;
    let quarto_config = QuartoConfig {
        theme: settings.theme.clone(),
        segmenter: SegmenterConfig {
            max_words: settings.slide_word_budget,
        },
    };

    let mut splitter = ContentSplitter::new();
    let files = QuartoGenerator::with_config(quarto_config)
        .generate(&mut splitter, input, output_dir)
        .with_context(|| format!("Failed to convert: {}", input.display()))?;

    println!("  Created: {}", files.slides.display());
    println!("  Created: {}", files.notes.display());

    for warning in splitter.validation_warnings() {
        println!("  warning: {}", warning);
    }
    for malformed in splitter.malformed_directives() {
        println!(
            "  warning: possible directive typo at line {}: {}",
            malformed.line, malformed.raw
        );
    }

    if render {
        let engine = RenderEngine::detect()
            .context("quarto is required for --render but was not found on PATH")?;
        let timeout = Duration::from_secs(settings.render.timeout_secs);

        println!("  Rendering slides (revealjs)...");
        let deck = engine
            .render(&files.slides, RenderFormat::Revealjs, timeout)
            .with_context(|| format!("Failed to render: {}", files.slides.display()))?;
        println!("  Created: {}", deck.display());

        println!("  Rendering notes ({})...", to.render_format());
        let notes = engine
            .render(&files.notes, to.render_format(), timeout)
            .with_context(|| format!("Failed to render: {}", files.notes.display()))?;
        println!("  Created: {}", notes.display());
    }

    println!();
    println!("Conversion complete!");

    Ok(())
}

/// A check run's findings, serializable for JSON output
#[derive(Debug, Serialize)]
struct CheckReport {
    /// The file that was checked
    file: String,
    /// Directive structure warnings
    warnings: Vec<String>,
    /// Comments that look like botched directives
    malformed_directives: Vec<MalformedDirective>,
    /// Math expression findings
    math_diagnostics: Vec<String>,
}

impl CheckReport {
    fn issue_count(&self) -> usize {
        self.warnings.len() + self.malformed_directives.len() + self.math_diagnostics.len()
    }
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let mut splitter = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ContentSplitter::with_base_dir(parent),
        _ => ContentSplitter::new(),
    };
    splitter.process_directives(&text);
    let math_check = math::validate_math(&text);

    let report = CheckReport {
        file: input.display().to_string(),
        warnings: splitter.validation_warnings().to_vec(),
        malformed_directives: splitter.malformed_directives().to_vec(),
        math_diagnostics: math_check.diagnostics,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize check report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if report.issue_count() == 0 {
                println!("✓ No issues found in {}", input.display());
            } else {
                for warning in &report.warnings {
                    println!("warning: {}", warning);
                }
                for malformed in &report.malformed_directives {
                    println!(
                        "warning: possible directive typo at line {}: {}",
                        malformed.line, malformed.raw
                    );
                }
                for diagnostic in &report.math_diagnostics {
                    println!("warning: {}", diagnostic);
                }
                println!();
                println!("Found {} issue(s)", report.issue_count());
            }
        }
    }

    Ok(())
}

/// Execute the split command
pub fn split_command(input: &Path) -> Result<()> {
    let mut splitter = ContentSplitter::new();
    let streams = splitter
        .split_content(input)
        .with_context(|| format!("Failed to split: {}", input.display()))?;

    println!("===== SLIDES =====");
    println!("{}", streams.slides);
    println!();
    println!("===== NOTES =====");
    println!("{}", streams.notes);

    Ok(())
}

/// Load settings from a config file or use defaults
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Settings::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            // Try conventional locations
            let candidates = ["lectern.toml", ".lectern.toml"];
            for candidate in candidates {
                if Path::new(candidate).exists() {
                    let content = fs::read_to_string(candidate)?;
                    if let Ok(settings) = Settings::from_toml_str(&content) {
                        return Ok(settings);
                    }
                }
            }
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_convert() {
        let args = vec!["lectern", "convert", "lecture.md", "--output", "out"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Convert {
                input,
                output,
                render,
                to,
                config,
            } => {
                assert_eq!(input, PathBuf::from("lecture.md"));
                assert_eq!(output, PathBuf::from("out"));
                assert!(!render);
                assert!(matches!(to, NotesTarget::Pdf));
                assert!(config.is_none());
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parse_convert_default_output() {
        let args = vec!["lectern", "convert", "lecture.md"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Convert { output, .. } => {
                assert_eq!(output, PathBuf::from("output"));
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parse_convert_render_html() {
        let args = vec!["lectern", "convert", "l.md", "--render", "--to", "html"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Convert { render, to, .. } => {
                assert!(render);
                assert!(matches!(to, NotesTarget::Html));
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parse_check() {
        let args = vec!["lectern", "check", "lecture.md"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check { input, format } => {
                assert_eq!(input, PathBuf::from("lecture.md"));
                assert!(matches!(format, OutputFormat::Text));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_check_json() {
        let args = vec!["lectern", "check", "lecture.md", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check { format, .. } => {
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_split() {
        let args = vec!["lectern", "split", "lecture.md"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Split { input } => {
                assert_eq!(input, PathBuf::from("lecture.md"));
            }
            _ => panic!("Expected Split command"),
        }
    }

    #[test]
    fn test_load_settings_default() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.slide_word_budget, 150);
    }

    #[test]
    fn test_load_settings_missing_explicit_path() {
        let err = load_settings(Some(Path::new("no/such/lectern.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lectern.toml");
        std::fs::write(&path, "theme = \"moon\"\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.theme, "moon");
        assert_eq!(settings.slide_word_budget, 150);
    }

    #[test]
    fn test_check_command_missing_file() {
        let err = check_command(Path::new("ghost.md"), OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }
}
