// src/cli.rs
use anyhow::{Context as _, Result, anyhow, bail};
use clap::{ArgAction, Parser, Subcommand};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{self, Preferences};
use crate::core::calculator::evaluate_keys;
use crate::core::codec::{Codec, Transcoder, encode_base64_bytes};
use crate::core::color::{self, ColorFormat, Rgb};
use crate::core::hash::{HashAlgorithm, digest_all};
use crate::core::json::{self, Indent, JsonStats};
use crate::core::password::{self, HISTORY_SIZE, PasswordHistory, PasswordOptions};
use crate::core::qr::{ErrorLevel, Location, QrPayload, QrRequest, VCard, WifiSecurity};
use crate::core::scanner::{scan_paths, total};
use crate::core::text::{TOP_WORDS, analyze, format_minutes, word_frequency};
use crate::core::units::{Category, ConverterState, convert_all};
use crate::models::{ConversionOutcome, FileTextStats, TargetProgress, TextStats, WordFrequencyEntry};
use crate::utils::{format_decimal, read_text, resolve_input};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Preferences file (defaults to <config dir>/utilbox/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a value between two units
    Convert {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit id (e.g. "km")
        from: String,

        /// Target unit id (e.g. "mi")
        to: String,

        /// Category id; inferred from the source unit when omitted
        #[arg(short, long)]
        category: Option<String>,

        /// Swap source and target before converting
        #[arg(short, long)]
        swap: bool,

        /// Show the value in every unit of the category
        #[arg(short, long)]
        all: bool,
    },

    /// List conversion categories, or the units of one category
    Units {
        /// Category id (e.g. "length")
        category: Option<String>,
    },

    /// Count characters, words, sentences and paragraphs
    Count(CountArgs),

    /// Encode or decode Base64
    Base64(CodecArgs),

    /// Percent-encode or decode a URI component
    Url(CodecArgs),

    /// Hash text with MD5, SHA-1 and the SHA-2 family
    Hash {
        /// Text to hash (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read input from a file ("-" for stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only this algorithm (md5, sha1, sha256, sha384, sha512)
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Generate passwords or rate an existing one
    Password(PasswordArgs),

    /// Show a color in several notations plus a palette
    Color(ColorArgs),

    /// Format, minify or validate JSON
    Json(JsonArgs),

    /// Replay calculator keys, e.g. `calc 2 + 3 =`
    Calc {
        /// Keys or numbers; a single quoted string is split on whitespace
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// Build a QR code image URL
    Qr(QrArgs),

    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct CountArgs {
    /// Files or directories to analyse ("-" for stdin); stdin when empty
    pub paths: Vec<PathBuf>,

    /// Analyse this text instead of files
    #[arg(short = 'x', long, conflicts_with = "paths")]
    pub text: Option<String>,

    /// Number of files to list
    #[arg(short = 't', long, default_value = "10")]
    pub top: usize,

    /// Directories to exclude (comma-separated)
    #[arg(short, long, default_value = ".git")]
    pub exclude: String,

    /// Show the most frequent words (text and stdin input)
    #[arg(short, long)]
    pub frequency: bool,

    /// Word goal (0 to hide); overrides the stored preference
    #[arg(long)]
    pub word_target: Option<usize>,

    /// Character goal (0 to hide); overrides the stored preference
    #[arg(long)]
    pub char_target: Option<usize>,

    /// Emit a JSON report
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Default)]
pub struct CodecArgs {
    /// Input text (reads --file or stdin when omitted)
    pub text: Option<String>,

    /// Decode instead of encode
    #[arg(short, long)]
    pub decode: bool,

    /// Read input from a file ("-" for stdin)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Default)]
pub struct PasswordArgs {
    /// Password length (4..=128)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// How many passwords to generate; the five most recent are shown
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    #[arg(long)]
    pub no_uppercase: bool,

    #[arg(long)]
    pub no_lowercase: bool,

    #[arg(long)]
    pub no_numbers: bool,

    #[arg(long)]
    pub no_symbols: bool,

    /// Leave out look-alike characters (i, l, 1, L, o, 0, O)
    #[arg(long)]
    pub exclude_similar: bool,

    /// Leave out brackets, quotes and other ambiguous symbols
    #[arg(long)]
    pub exclude_ambiguous: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rate this password instead of generating one
    #[arg(long, conflicts_with = "count")]
    pub check: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
pub struct ColorArgs {
    /// Hex color such as "#3b82f6"
    #[arg(required_unless_present = "random")]
    pub hex: Option<String>,

    /// Pick a random color
    #[arg(short, long)]
    pub random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Print only this notation (hex, rgb, hsl, rgba)
    #[arg(short, long)]
    pub format: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
pub struct JsonArgs {
    /// JSON text (reads --file or stdin when omitted)
    pub text: Option<String>,

    /// Read input from a file ("-" for stdin)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Indentation: 2, 4, 8 or tab
    #[arg(short, long)]
    pub indent: Option<String>,

    /// Sort object keys alphabetically
    #[arg(short, long)]
    pub sort_keys: bool,

    /// Remove all insignificant whitespace
    #[arg(short, long, conflicts_with_all = ["indent", "sort_keys"])]
    pub minify: bool,

    /// Only check that the input parses
    #[arg(long)]
    pub validate: bool,

    /// Append size and value-type statistics
    #[arg(long)]
    pub stats: bool,
}

#[derive(clap::Args, Debug)]
pub struct QrArgs {
    /// Image size in pixels: 128, 256, 512 or 1024
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Error correction level: L, M, Q or H
    #[arg(short, long)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub payload: QrPayloadArgs,
}

#[derive(Subcommand, Debug)]
pub enum QrPayloadArgs {
    Text {
        text: String,
    },
    Url {
        url: String,
    },
    Email {
        to: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        body: String,
    },
    Phone {
        number: String,
    },
    Sms {
        number: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    Wifi {
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        /// WPA, WEP or nopass
        #[arg(long, default_value = "WPA")]
        security: String,
        #[arg(long)]
        hidden: bool,
    },
    Vcard {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        organization: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        website: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    Location {
        #[arg(long, allow_hyphen_values = true, requires = "longitude")]
        latitude: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "latitude")]
        longitude: Option<f64>,
        /// Place name to search for when no coordinates are given
        #[arg(long, required_unless_present = "latitude")]
        query: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print the current preferences as TOML
    Show,
    /// Print the preferences file location
    Path,
    /// Turn dark mode on or off
    SetDarkMode {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Flip dark mode
    ToggleDarkMode,
}

/// Runs the parsed command and returns everything it would print.
///
/// # Errors
///
/// Returns an error if input cannot be read, the preferences file is
/// unreadable, or the command's own operation fails.
pub fn execute(args: &Args) -> Result<String> {
    let config_path = config::resolve_path(args.config.as_deref());
    let mut prefs = match &config_path {
        Ok(path) => Preferences::load(path)
            .with_context(|| format!("Failed to load preferences: {}", path.display()))?,
        Err(err) => {
            warn!(%err, "using default preferences");
            Preferences::default()
        }
    };

    match &args.command {
        Command::Convert {
            value,
            from,
            to,
            category,
            swap,
            all,
        } => run_convert(value, from, to, category.as_deref(), *swap, *all),
        Command::Units { category } => render_units(category.as_deref()),
        Command::Count(count) => run_count(count, &prefs),
        Command::Base64(codec) => transcode(Codec::Base64, codec),
        Command::Url(codec) => transcode(Codec::Url, codec),
        Command::Hash {
            text,
            file,
            algorithm,
        } => {
            let input = resolve_input(text.as_deref(), file.as_deref())?;
            render_hashes(&input, algorithm.as_deref())
        }
        Command::Password(password) => run_password(password, &prefs),
        Command::Color(color) => run_color(color),
        Command::Json(json) => run_json(json, &prefs),
        Command::Calc { keys } => {
            let tokens: Vec<&str> = keys.iter().flat_map(|k| k.split_whitespace()).collect();
            Ok(evaluate_keys(&tokens)?)
        }
        Command::Qr(qr) => run_qr(qr, &prefs),
        Command::Prefs { action } => {
            let path = config_path?;
            run_prefs(action, &mut prefs, &path)
        }
    }
}

fn find_category(id: Option<&str>, unit: &str) -> Result<Category> {
    if let Some(id) = id {
        return Ok(Category::from_id(id)?);
    }
    Category::ALL
        .into_iter()
        .find(|category| category.unit(unit).is_ok())
        .ok_or_else(|| anyhow!("unknown unit `{unit}`; pass --category or run `utilbox units`"))
}

fn run_convert(
    value: &str,
    from: &str,
    to: &str,
    category: Option<&str>,
    swap: bool,
    all: bool,
) -> Result<String> {
    let category = find_category(category, from)?;
    let mut state = ConverterState::new(category);
    from.clone_into(&mut state.from);
    to.clone_into(&mut state.to);
    value.clone_into(&mut state.input);
    if swap {
        state.swap();
    }

    let outcome = state.output()?;
    let ConversionOutcome::Converted { display, .. } = outcome else {
        bail!("`{value}` is not a valid number");
    };

    if !all {
        return Ok(format!("{} {} = {display} {}", value.trim(), state.from, state.to));
    }

    let number: f64 = value.trim().parse()?;
    let mut output = format!("{} {} in {}:\n", value.trim(), state.from, category.name());
    for (unit, converted) in convert_all(number, &state.from, category)? {
        let _ = writeln!(output, "{:>20}  {:<5} {}", format_decimal(converted), unit.id, unit.name);
    }
    Ok(output.trim_end().to_owned())
}

fn render_units(category: Option<&str>) -> Result<String> {
    let mut output = String::new();
    match category {
        None => {
            for category in Category::ALL {
                let _ = writeln!(
                    output,
                    "{:<12} {} ({} units)",
                    category.id(),
                    category.name(),
                    category.units().len()
                );
            }
        }
        Some(id) => {
            for unit in Category::from_id(id)?.units() {
                let _ = writeln!(output, "{:<6} {}", unit.id, unit.name);
            }
        }
    }
    Ok(output.trim_end().to_owned())
}

#[derive(Debug, Serialize)]
struct CountReport<'a> {
    files: &'a [FileTextStats],
    total: TextStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    top_words: Vec<WordFrequencyEntry>,
}

fn run_count(args: &CountArgs, prefs: &Preferences) -> Result<String> {
    let (files, text) = if let Some(text) = &args.text {
        (Vec::new(), Some(text.clone()))
    } else if args.paths.is_empty() {
        (Vec::new(), Some(read_text(None)?))
    } else {
        let exclude_dirs: Vec<&str> = args.exclude.split(',').collect();
        (scan_paths(&args.paths, &exclude_dirs)?, None)
    };

    let stats = text.as_deref().map_or_else(|| total(&files), analyze);
    let top_words = match (&text, args.frequency) {
        (Some(text), true) => word_frequency(text, TOP_WORDS),
        _ => Vec::new(),
    };
    debug!(files = files.len(), words = stats.words, "count finished");

    if args.json {
        let report = CountReport {
            files: &files,
            total: stats,
            top_words,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut output = String::new();
    for file in files.iter().take(args.top) {
        let _ = writeln!(output, "{:8} words  {}", file.stats.words, file.path.display());
    }
    if !files.is_empty() {
        output.push('\n');
    }
    output.push_str(&render_stats(&stats));

    let word_target = args.word_target.unwrap_or(prefs.text.word_target);
    let char_target = args.char_target.unwrap_or(prefs.text.character_target);
    if word_target > 0 || char_target > 0 {
        output.push('\n');
    }
    if word_target > 0 {
        output.push_str(&render_target(
            "Word goal",
            TargetProgress::new(stats.words, word_target),
        ));
    }
    if char_target > 0 {
        output.push_str(&render_target(
            "Character goal",
            TargetProgress::new(stats.characters, char_target),
        ));
    }

    if !top_words.is_empty() {
        output.push_str("\nMost frequent words:\n");
        for entry in &top_words {
            let _ = writeln!(output, "{:>6}  {}", entry.count, entry.word);
        }
    }
    Ok(output.trim_end().to_owned())
}

/// The statistics block shown by `count`.
#[must_use]
pub fn render_stats(stats: &TextStats) -> String {
    format!(
        "Characters:             {}\n\
         Characters (no spaces): {}\n\
         Words:                  {}\n\
         Sentences:              {}\n\
         Paragraphs:             {}\n\
         Reading time:           {}\n\
         Speaking time:          {}\n",
        stats.characters,
        stats.characters_no_spaces,
        stats.words,
        stats.sentences,
        stats.paragraphs,
        format_minutes(stats.reading_time),
        format_minutes(stats.speaking_time),
    )
}

fn render_target(label: &str, progress: TargetProgress) -> String {
    let status = if progress.is_met() { "  reached" } else { "" };
    format!(
        "{label}: {}/{} ({:.0}%){status}\n",
        progress.current,
        progress.target,
        progress.percentage()
    )
}

fn transcode(codec: Codec, args: &CodecArgs) -> Result<String> {
    // Files are encoded as raw bytes so binary input survives.
    if let (Codec::Base64, false, None, Some(path)) =
        (codec, args.decode, &args.text, args.file.as_deref())
    {
        if path != Path::new("-") {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "encoding file");
            return Ok(encode_base64_bytes(&bytes)?);
        }
    }

    let mut transcoder = Transcoder::new(codec);
    if args.decode {
        transcoder.swap();
    }
    transcoder.input = resolve_input(args.text.as_deref(), args.file.as_deref())?;
    Ok(transcoder.process()?.to_owned())
}

fn render_hashes(input: &str, algorithm: Option<&str>) -> Result<String> {
    if input.trim().is_empty() {
        bail!("please enter text to hash");
    }
    if let Some(name) = algorithm {
        let algorithm = HashAlgorithm::from_name(name)
            .ok_or_else(|| anyhow!("unknown hash algorithm `{name}`"))?;
        return Ok(algorithm.digest(input));
    }

    let mut output = String::new();
    for (algorithm, digest) in digest_all(input) {
        let _ = writeln!(output, "{:<8} {digest}", algorithm.name());
    }
    Ok(output.trim_end().to_owned())
}

fn password_options(args: &PasswordArgs, prefs: &Preferences) -> PasswordOptions {
    let defaults = PasswordOptions::from(prefs.password);
    PasswordOptions {
        length: args.length.unwrap_or(defaults.length),
        uppercase: defaults.uppercase && !args.no_uppercase,
        lowercase: defaults.lowercase && !args.no_lowercase,
        numbers: defaults.numbers && !args.no_numbers,
        symbols: defaults.symbols && !args.no_symbols,
        exclude_similar: defaults.exclude_similar || args.exclude_similar,
        exclude_ambiguous: defaults.exclude_ambiguous || args.exclude_ambiguous,
    }
}

fn run_password(args: &PasswordArgs, prefs: &Preferences) -> Result<String> {
    if let Some(candidate) = &args.check {
        let strength = password::strength(candidate);
        return Ok(format!("{} ({}/100)", strength.label.as_str(), strength.score));
    }

    let options = password_options(args, prefs);
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let mut history = PasswordHistory::new();
    // Anything past HISTORY_SIZE would be evicted unseen.
    for _ in 0..args.count.clamp(1, HISTORY_SIZE) {
        history.push(password::generate(&options, &mut rng)?);
    }

    let mut output = String::new();
    for generated in history.iter() {
        let strength = password::strength(generated);
        let _ = writeln!(
            output,
            "{generated}  {} ({}/100)",
            strength.label.as_str(),
            strength.score
        );
    }
    Ok(output.trim_end().to_owned())
}

fn run_color(args: &ColorArgs) -> Result<String> {
    let color = match (&args.hex, args.random) {
        (_, true) => {
            let mut rng = args
                .seed
                .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
            color::random(&mut rng)
        }
        (Some(hex), false) => Rgb::from_hex(hex)?,
        (None, false) => bail!("a hex color or --random is required"),
    };

    if let Some(format) = &args.format {
        let format: ColorFormat = format.parse()?;
        return Ok(color::format(color, format));
    }

    let mut output = String::new();
    for (label, format) in [
        ("HEX", ColorFormat::Hex),
        ("RGB", ColorFormat::Rgb),
        ("HSL", ColorFormat::Hsl),
        ("RGBA", ColorFormat::Rgba),
    ] {
        let _ = writeln!(output, "{label:<5} {}", color::format(color, format));
    }
    output.push_str("\nPalette:\n");
    for shade in color::palette(color) {
        let _ = writeln!(output, "  {}", color::format(shade, ColorFormat::Hex));
    }
    Ok(output.trim_end().to_owned())
}

fn run_json(args: &JsonArgs, prefs: &Preferences) -> Result<String> {
    let input = resolve_input(args.text.as_deref(), args.file.as_deref())?;

    if args.validate {
        json::validate(&input)?;
        return Ok(String::from("Valid JSON"));
    }

    let output = if args.minify {
        json::minify(&input)?
    } else {
        let indent: Indent = args
            .indent
            .as_deref()
            .unwrap_or(&prefs.json.indent)
            .parse()?;
        json::format(&input, indent, args.sort_keys || prefs.json.sort_keys)?
    };

    if !args.stats {
        return Ok(output);
    }
    let stats = JsonStats::of(&output)?;
    Ok(format!(
        "{output}\n\nSize: {} bytes, {} lines, {} characters\n\
         Objects: {}, arrays: {}, strings: {}, numbers: {}, booleans: {}, nulls: {}",
        stats.size,
        stats.lines,
        stats.characters,
        stats.objects,
        stats.arrays,
        stats.strings,
        stats.numbers,
        stats.booleans,
        stats.nulls,
    ))
}

fn qr_payload(args: &QrPayloadArgs) -> Result<QrPayload> {
    let payload = match args {
        QrPayloadArgs::Text { text } => QrPayload::Text(text.clone()),
        QrPayloadArgs::Url { url } => QrPayload::Url(url.clone()),
        QrPayloadArgs::Email { to, subject, body } => QrPayload::Email {
            to: to.clone(),
            subject: subject.clone(),
            body: body.clone(),
        },
        QrPayloadArgs::Phone { number } => QrPayload::Phone(number.clone()),
        QrPayloadArgs::Sms { number, message } => QrPayload::Sms {
            number: number.clone(),
            message: message.clone(),
        },
        QrPayloadArgs::Wifi {
            ssid,
            password,
            security,
            hidden,
        } => QrPayload::Wifi {
            ssid: ssid.clone(),
            password: password.clone(),
            security: security.parse::<WifiSecurity>()?,
            hidden: *hidden,
        },
        QrPayloadArgs::Vcard {
            first_name,
            last_name,
            organization,
            title,
            phone,
            email,
            website,
            address,
        } => QrPayload::VCard(VCard {
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            organization: organization.clone(),
            title: title.clone(),
            phone: phone.clone(),
            email: email.clone(),
            website: website.clone(),
            address: address.clone(),
        }),
        QrPayloadArgs::Location {
            latitude,
            longitude,
            query,
        } => match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => QrPayload::Location(Location::Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            }),
            _ => QrPayload::Location(Location::Query(query.clone().unwrap_or_default())),
        },
    };
    Ok(payload)
}

fn run_qr(args: &QrArgs, prefs: &Preferences) -> Result<String> {
    let size = args.size.unwrap_or(prefs.qr.size);
    let level: ErrorLevel = args
        .level
        .as_deref()
        .unwrap_or(&prefs.qr.error_level)
        .parse()?;
    let request = QrRequest::new(qr_payload(&args.payload)?, size, level)?;
    Ok(request.image_url()?)
}

fn run_prefs(action: &PrefsAction, prefs: &mut Preferences, path: &Path) -> Result<String> {
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    match action {
        PrefsAction::Show => Ok(toml::to_string_pretty(prefs)?.trim_end().to_owned()),
        PrefsAction::Path => Ok(path.display().to_string()),
        PrefsAction::SetDarkMode { enabled } => {
            prefs.set_dark_mode(*enabled);
            prefs.save(path)?;
            Ok(format!("Dark mode: {}", on_off(prefs.dark_mode)))
        }
        PrefsAction::ToggleDarkMode => {
            let enabled = prefs.toggle_dark_mode();
            prefs.save(path)?;
            Ok(format!("Dark mode: {}", on_off(enabled)))
        }
    }
}
