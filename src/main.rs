use anyhow::Context;
use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use flaskbin_countdown::{
    spawn_countdown, CountdownFormat, CountdownHandle, CountdownOutcome, DisplaySurface,
    ExpirationRenderer, ExpiryTarget, Granularity, SmoothingBand, SystemClock,
};
use flaskbin_page::{
    evaluate_password, is_ten_minute_expiration, load_template, spawn_notification_poller,
    time_since, DirectoryTemplateSource, FileNotificationSource, NewPaste, NotificationView,
    PageSettings, PasteEditor, PasteLifetime, Theme, ThemeController, NOTIFICATION_POLL_PERIOD,
    SETTINGS_PATH,
};

/// Rewrites the current terminal line on every render, or prints a labelled
/// line when several countdowns share the terminal.
struct TerminalLine {
    label: Option<String>,
}

impl DisplaySurface for TerminalLine {
    fn set_text(&mut self, text: &str) {
        let mut stdout = std::io::stdout();
        let _ = match &self.label {
            Some(label) => writeln!(stdout, "{}: {}", label, text),
            None => write!(stdout, "\r{}\x1b[K", text),
        };
        let _ = stdout.flush();
    }
}

struct TerminalNotifications;

impl NotificationView for TerminalNotifications {
    fn set_badge(&mut self, count: Option<u32>) {
        match count {
            Some(count) => println!("Unread notifications: {}", count),
            None => println!("No unread notifications"),
        }
    }

    fn set_title(&mut self, title: &str) {
        println!("Title: {}", title);
    }
}

fn command() -> Command<'static> {
    Command::new("flaskbin-display")
        .about("FlaskBin page display tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Path of the page settings file")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level filter")
                .takes_value(true)
                .default_value("info")
                .global(true),
        )
        .subcommand(
            Command::new("countdown")
                .about("Show a live countdown until a paste expires")
                .arg(
                    Arg::new("expires")
                        .help("Expiry instant: RFC 3339, ISO-8601 (UTC) or epoch milliseconds")
                        .takes_value(true)
                        .multiple_values(true)
                        .required_unless_present("lifetime"),
                )
                .arg(
                    Arg::new("lifetime")
                        .long("lifetime")
                        .help("Paste form lifetime code, counted from now")
                        .takes_value(true)
                        .conflicts_with("expires"),
                )
                .arg(
                    Arg::new("granularity")
                        .long("granularity")
                        .help("seconds or minutes")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("smooth")
                        .long("smooth")
                        .help("Show remaining times near ten minutes as \"10 minutes remaining\"")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("strength")
                .about("Rate the strength of a password")
                .arg(Arg::new("password").takes_value(true).required(true)),
        )
        .subcommand(
            Command::new("theme")
                .about("Show or toggle the saved page theme")
                .arg(
                    Arg::new("action")
                        .takes_value(true)
                        .possible_values(["show", "toggle"])
                        .default_value("show"),
                ),
        )
        .subcommand(
            Command::new("notifications")
                .about("Poll an unread notification count file")
                .arg(Arg::new("count-file").takes_value(true).required(true))
                .arg(
                    Arg::new("title")
                        .long("title")
                        .takes_value(true)
                        .default_value("FlaskBin"),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .help("Seconds between polls")
                        .takes_value(true)
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Load a paste template into an editor buffer")
                .arg(Arg::new("dir").takes_value(true).required(true))
                .arg(
                    Arg::new("id")
                        .takes_value(true)
                        .required(true)
                        .allow_hyphen_values(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("replace")
                        .long("replace")
                        .help("Replace existing editor content")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("content-file")
                        .long("content-file")
                        .help("Current editor content")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("paste")
                .about("Validate a new paste and show when it would expire")
                .arg(Arg::new("file").takes_value(true).required(true))
                .arg(Arg::new("title").long("title").takes_value(true))
                .arg(Arg::new("syntax").long("syntax").takes_value(true))
                .arg(
                    Arg::new("lifetime")
                        .long("lifetime")
                        .takes_value(true)
                        .default_value("0"),
                ),
        )
}

fn settings_path(matches: &ArgMatches) -> Result<PathBuf, anyhow::Error> {
    if let Some(path) = matches.get_one::<String>("settings") {
        return Ok(PathBuf::from(path));
    }

    SETTINGS_PATH
        .clone()
        .context("Unable to determine the local data directory, use --settings")
}

fn load_settings(path: &Path) -> Result<PageSettings, anyhow::Error> {
    // No system theme query here, default to dark like the page does
    PageSettings::load_or_default(path, true)
}

fn countdown_format(
    settings: &PageSettings,
    matches: &ArgMatches,
) -> Result<CountdownFormat, anyhow::Error> {
    let mut format = settings.countdown.format();

    if let Some(granularity) = matches.get_one::<String>("granularity") {
        format.granularity = granularity.parse::<Granularity>()?;
    }

    if matches.get_one::<bool>("smooth").copied().unwrap_or(false) {
        format.smoothing = Some(SmoothingBand::ten_minutes());
    }

    Ok(format)
}

async fn run_countdown(settings: &PageSettings, matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let format = countdown_format(settings, matches)?;

    let mut renderers = Vec::new();
    if let Some(code) = matches.get_one::<String>("lifetime") {
        let lifetime = PasteLifetime::from_form_code(code);
        match lifetime.expires_at(Utc::now()) {
            Some(expires_at) => renderers.push(ExpirationRenderer::new(
                ExpiryTarget::new(expires_at),
                SystemClock,
                TerminalLine { label: None },
                format,
            )),
            None => log::warn!("Lifetime {} never expires", lifetime.label()),
        }
    } else {
        let values: Vec<&String> = matches
            .get_many::<String>("expires")
            .into_iter()
            .flatten()
            .collect();
        let multiple = values.len() > 1;

        for value in values {
            let label = if multiple { Some(value.clone()) } else { None };
            match ExpirationRenderer::from_attribute(
                Some(value.as_str()),
                SystemClock,
                TerminalLine { label },
                format,
            ) {
                Some(renderer) => renderers.push(renderer),
                None => log::warn!("{:?} is not an expiry time", value),
            }
        }
    }

    let mut handles = Vec::new();
    for renderer in renderers {
        log::info!("Counting down to {}", renderer.target().expires_at());
        handles.push(spawn_countdown(renderer));
    }

    if handles.is_empty() {
        return Ok(());
    }

    tokio::select! {
        outcome = wait_for_all(handles) => {
            println!();
            log::info!("Countdown finished: {:?}", outcome?);
        },
        _ = tokio::signal::ctrl_c() => {
            // Dropping the remaining handles stops their countdowns
            println!();
            log::info!("Countdown stopped");
        }
    };

    Ok(())
}

async fn wait_for_all(handles: Vec<CountdownHandle>) -> Result<CountdownOutcome, anyhow::Error> {
    let mut outcome = CountdownOutcome::Expired;
    for handle in handles {
        outcome = handle.wait().await?;
    }
    Ok(outcome)
}

fn run_strength(matches: &ArgMatches) {
    let password = matches
        .get_one::<String>("password")
        .map(|s| s.as_str())
        .unwrap_or_default();

    match evaluate_password(password) {
        Some(report) => println!("[{}] {}", report.level.meter_class(), report.text()),
        None => println!("No password entered"),
    }
}

fn print_theme(theme: Theme) {
    println!(
        "data-bs-theme={} icon=\"{}\" highlight={}",
        theme.as_str(),
        theme.icon_class(),
        theme.highlight_theme()
    );
}

fn run_theme(
    path: &Path,
    settings: PageSettings,
    matches: &ArgMatches,
) -> Result<(), anyhow::Error> {
    let mut controller = ThemeController::new(settings);
    let _subscription = controller.on_theme_changed(|theme| print_theme(*theme));

    match matches.get_one::<String>("action").map(|s| s.as_str()) {
        Some("toggle") => {
            controller.toggle();
            controller.save(path)?;
        }
        _ => {
            print_theme(controller.theme());
        }
    }

    Ok(())
}

async fn run_notifications(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let count_file = matches
        .get_one::<String>("count-file")
        .context("Missing count file")?;
    let title = matches
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_default();
    let period = matches
        .get_one::<u64>("period")
        .map(|secs| Duration::from_secs(*secs))
        .unwrap_or(NOTIFICATION_POLL_PERIOD);

    let handle = spawn_notification_poller(
        FileNotificationSource::new(PathBuf::from(count_file)),
        TerminalNotifications,
        title,
        period,
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;
    handle.stop();
    handle.wait().await;
    Ok(())
}

async fn run_template(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let dir = matches.get_one::<String>("dir").context("Missing template directory")?;
    let id = matches.get_one::<i64>("id").copied().unwrap_or(0);
    let replace = matches.get_one::<bool>("replace").copied().unwrap_or(false);

    let mut editor = PasteEditor::default();
    if let Some(path) = matches.get_one::<String>("content-file") {
        editor.content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path))?;
    }

    let source = DirectoryTemplateSource::new(PathBuf::from(dir));
    if load_template(&source, &mut editor, id, || replace).await {
        println!("syntax: {}", editor.syntax);
        print!("{}", editor.content);
    } else {
        println!("Template {} not applied", id);
    }

    Ok(())
}

fn run_paste(settings: &PageSettings, matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let file = matches.get_one::<String>("file").context("Missing paste file")?;
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read file {}", file))?;
    let lifetime = PasteLifetime::from_form_code(
        matches
            .get_one::<String>("lifetime")
            .map(|s| s.as_str())
            .unwrap_or("0"),
    );

    let paste = NewPaste::new(
        matches
            .get_one::<String>("title")
            .map(|s| s.as_str())
            .unwrap_or_default(),
        content,
        matches
            .get_one::<String>("syntax")
            .map(|s| s.as_str())
            .unwrap_or_default(),
        lifetime,
    )?;

    let created = Utc::now();
    let expires = paste.expires_at(created);
    println!("{} ({}, {} bytes)", paste.title, paste.syntax, paste.size());
    println!("Created {}", time_since(created, Utc::now()));

    match expires {
        Some(expires) => {
            let mut format = settings.countdown.format();
            if is_ten_minute_expiration(created, Some(expires)) {
                format.smoothing = Some(SmoothingBand::ten_minutes());
            }
            let renderer = ExpirationRenderer::new(
                ExpiryTarget::new(expires),
                SystemClock,
                String::new(),
                format,
            );
            println!("Expires {} ({})", expires, renderer.current_text());
        }
        None => println!("Never expires"),
    }

    Ok(())
}

async fn run(matches: ArgMatches) -> Result<(), anyhow::Error> {
    let path = settings_path(&matches)?;
    let settings = load_settings(&path)?;

    match matches.subcommand() {
        Some(("countdown", sub_matches)) => run_countdown(&settings, sub_matches).await,
        Some(("strength", sub_matches)) => {
            run_strength(sub_matches);
            Ok(())
        }
        Some(("theme", sub_matches)) => run_theme(&path, settings, sub_matches),
        Some(("notifications", sub_matches)) => run_notifications(sub_matches).await,
        Some(("template", sub_matches)) => run_template(sub_matches).await,
        Some(("paste", sub_matches)) => run_paste(&settings, sub_matches),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

#[tokio::main]
async fn main() {
    let matches = command().get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let log_config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    if let Err(error) = TermLogger::init(
        log_level,
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialise logger: {}", error);
    }

    if let Err(error) = run(matches).await {
        log::error!("{:?}", error);
        std::process::exit(1);
    }
}
