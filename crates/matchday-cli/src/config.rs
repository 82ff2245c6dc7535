//! CLI configuration

use matchday::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_PREFIX, DEFAULT_SITE_URL, DEFAULT_WAIT_TIMEOUT_MS};
use std::path::{Path, PathBuf};

/// Browser executable tried when none is given
pub const DEFAULT_BROWSER_PATH: &str =
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome";

/// File names of WebDriver servers, which cannot stand in for a browser
const WEBDRIVER_SERVERS: [&str; 2] = ["chromedriver", "chromedriver.exe"];

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Log filter used when `RUST_LOG` is unset
    #[must_use]
    pub const fn default_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

/// Resolved run configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Site root
    pub site_url: String,
    /// Output directory
    pub save_dir: PathBuf,
    /// Browser executable (None = auto-detect)
    pub driver_path: Option<PathBuf>,
    /// YAML site layout override
    pub layout: Option<PathBuf>,
    /// Page readiness timeout
    pub timeout_ms: u64,
    /// Page readiness poll interval
    pub poll_ms: u64,
    /// Run without a visible window
    pub headless: bool,
    /// Chromium sandbox
    pub sandbox: bool,
    /// Let the browser download images
    pub load_images: bool,
    /// User agent sent with every request (None = browser default)
    pub user_agent: Option<String>,
    /// Output file name prefix
    pub file_prefix: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            site_url: DEFAULT_SITE_URL.to_string(),
            save_dir: default_save_dir(&home_dir()),
            driver_path: None,
            layout: None,
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_ms: DEFAULT_POLL_INTERVAL_MS,
            headless: true,
            sandbox: true,
            load_images: false,
            user_agent: None,
            file_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set the site root
    #[must_use]
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = url.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Set the browser executable
    #[must_use]
    pub fn with_driver_path(mut self, path: Option<PathBuf>) -> Self {
        self.driver_path = path;
        self
    }

    /// Set the layout file
    #[must_use]
    pub fn with_layout(mut self, layout: Option<PathBuf>) -> Self {
        self.layout = layout;
        self
    }

    /// Set the readiness wait
    #[must_use]
    pub const fn with_wait(mut self, timeout_ms: u64, poll_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self.poll_ms = poll_ms;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set sandbox mode
    #[must_use]
    pub const fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Set image loading
    #[must_use]
    pub const fn with_load_images(mut self, load_images: bool) -> Self {
        self.load_images = load_images;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Set the output file name prefix
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }
}

/// The user's home directory, or the working directory if unknown
#[must_use]
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// `~/Downloads`
#[must_use]
pub fn default_save_dir(home: &Path) -> PathBuf {
    home.join("Downloads")
}

/// Keep `requested` if it exists, else fall back to `~/Desktop`
#[must_use]
pub fn resolve_save_dir(requested: &Path, home: &Path) -> PathBuf {
    if requested.is_dir() {
        return requested.to_path_buf();
    }
    let fallback = home.join("Desktop");
    tracing::warn!(
        requested = %requested.display(),
        fallback = %fallback.display(),
        "save directory does not exist, saving to the desktop"
    );
    fallback
}

/// Whether `path` names a WebDriver server such as chromedriver
#[must_use]
pub fn is_webdriver_server(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| WEBDRIVER_SERVERS.contains(&name))
}

/// Keep `requested` if it is an existing browser, else try the default path,
/// else let the browser backend auto-detect.
///
/// A chromedriver path is never used: it speaks WebDriver, not `DevTools`.
#[must_use]
pub fn resolve_driver_path(requested: &Path) -> Option<PathBuf> {
    if is_webdriver_server(requested) {
        tracing::warn!(
            requested = %requested.display(),
            "--driver-dir names a WebDriver server, not a browser; ignoring it"
        );
    } else if requested.exists() {
        return Some(requested.to_path_buf());
    }
    let default = Path::new(DEFAULT_BROWSER_PATH);
    if requested != default && default.exists() {
        tracing::warn!(
            requested = %requested.display(),
            "using the browser at {DEFAULT_BROWSER_PATH}"
        );
        return Some(default.to_path_buf());
    }
    tracing::info!(requested = %requested.display(), "no browser executable, auto-detecting");
    None
}
