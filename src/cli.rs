use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stylescope_lib::{AnalysisKind, LaunchMode, WindowSize};

#[derive(Parser)]
#[command(name = "stylescope")]
#[command(
    version,
    about = "Stylescope - Extract typography and color palettes from websites, images and PDFs",
    long_about = "Stylescope\n\nModes:\n- serve: run the HTTP service exposing POST /api/analyze.\n- analyze: run a single analysis locally and print the JSON result.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML); defaults to ./stylescope.toml, then ~/.config/stylescope/config.toml. CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP analysis service
    Serve {
        #[arg(long, value_name = "ADDR", help = "Listen address (default from config: 127.0.0.1:3000)")]
        bind: Option<String>,

        #[arg(long, value_name = "SECS", help = "Navigation timeout (seconds) for website analysis")]
        nav_timeout: Option<u64>,

        #[arg(long, value_name = "WIDTHxHEIGHT", help = "Browser viewport (default 1920x1080)")]
        viewport: Option<WindowSize>,

        #[arg(long, value_enum, help = "Browser launch mode")]
        browser_mode: Option<BrowserMode>,

        #[arg(long, value_name = "PATH", help = "Chromium executable to launch")]
        chromium: Option<PathBuf>,
    },

    /// Analyze a single website, image or PDF and print the result
    Analyze {
        #[arg(long = "type", value_enum, help = "Kind of input")]
        kind: InputType,

        #[arg(
            long,
            help = "Website URL, or for image/pdf a data URI, base64 payload, or local file path"
        )]
        input: String,

        #[arg(long, value_name = "SECS", help = "Navigation timeout (seconds) for website analysis")]
        nav_timeout: Option<u64>,

        #[arg(long, value_name = "WIDTHxHEIGHT", help = "Browser viewport (default 1920x1080)")]
        viewport: Option<WindowSize>,

        #[arg(long, value_enum, help = "Browser launch mode")]
        browser_mode: Option<BrowserMode>,

        #[arg(long, value_name = "PATH", help = "Chromium executable to launch")]
        chromium: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputType {
    Website,
    Image,
    Pdf,
}

impl From<InputType> for AnalysisKind {
    fn from(value: InputType) -> Self {
        match value {
            InputType::Website => AnalysisKind::Website,
            InputType::Image => AnalysisKind::Image,
            InputType::Pdf => AnalysisKind::Pdf,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BrowserMode {
    Local,
    Packaged,
}

impl From<BrowserMode> for LaunchMode {
    fn from(value: BrowserMode) -> Self {
        match value {
            BrowserMode::Local => LaunchMode::Local,
            BrowserMode::Packaged => LaunchMode::Packaged,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{BrowserMode, Cli, Commands, InputType, OutputFormat};
    use clap::Parser;

    #[test]
    fn serve_command_uses_defaults() {
        let cli = Cli::parse_from(["stylescope", "serve"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Serve {
                bind,
                nav_timeout,
                viewport,
                browser_mode,
                chromium,
            } => {
                assert!(bind.is_none());
                assert!(viewport.is_none());
                assert!(nav_timeout.is_none());
                assert!(browser_mode.is_none());
                assert!(chromium.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn serve_command_respects_overrides() {
        let cli = Cli::parse_from([
            "stylescope",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--nav-timeout",
            "15",
            "--viewport",
            "1280x720",
            "--browser-mode",
            "packaged",
            "--chromium",
            "/opt/chromium/chrome",
            "--config",
            "stylescope.toml",
        ]);

        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("stylescope.toml"))
        );
        match cli.command {
            Commands::Serve {
                bind,
                nav_timeout,
                viewport,
                browser_mode,
                chromium,
            } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0:8080"));
                assert_eq!(nav_timeout, Some(15));
                assert_eq!(viewport.map(|v| v.to_string()).as_deref(), Some("1280x720"));
                assert_eq!(browser_mode, Some(BrowserMode::Packaged));
                assert_eq!(
                    chromium.as_deref(),
                    Some(std::path::Path::new("/opt/chromium/chrome"))
                );
            }
            _ => panic!("expected serve command with overrides"),
        }
    }

    #[test]
    fn analyze_command_sets_verbose() {
        let cli = Cli::parse_from([
            "stylescope",
            "--verbose",
            "analyze",
            "--type",
            "pdf",
            "--input",
            "report.pdf",
            "-o",
            "out.json",
        ]);

        assert!(cli.verbose);

        match cli.command {
            Commands::Analyze {
                kind,
                input,
                format,
                output,
                ..
            } => {
                assert_eq!(kind, InputType::Pdf);
                assert_eq!(input, "report.pdf");
                assert!(matches!(format, OutputFormat::Json));
                assert_eq!(output.as_deref(), Some(std::path::Path::new("out.json")));
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn analyze_rejects_malformed_viewport() {
        let parsed = Cli::try_parse_from([
            "stylescope",
            "analyze",
            "--type",
            "website",
            "--input",
            "https://example.com",
            "--viewport",
            "wide",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn analyze_rejects_unknown_type() {
        let parsed = Cli::try_parse_from([
            "stylescope",
            "analyze",
            "--type",
            "svg",
            "--input",
            "x",
        ]);
        assert!(parsed.is_err());
    }
}
