mod report;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_english::{Dialect, parse_date_string};
use serde_json::json;
use showtime::memory::{self, Memory};
use showtime::{Catalog, MemoryValue, Options, SlotMemory, detect_entities, get_movies, read_resolved_range};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SHOWTIME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(config: &CliConfig) -> showtime::Result<()> {
    let options = Options::default();
    let catalog = Catalog::standard(config.today)?;
    let mut memory = config.to_memory();

    let resolved = detect_entities(&mut memory, &options)?;
    let classification = get_movies(&mut memory, &catalog, &options);

    report::print_run(&report::Run {
        today: config.today,
        resolved: &resolved,
        range: read_resolved_range(&memory),
        classification: &classification,
        memory: &memory,
        color: config.color,
    });
    Ok(())
}

#[derive(Default)]
struct CliConfig {
    movie: Option<String>,
    genre: Option<String>,
    city: Option<String>,
    state: Option<String>,
    theater: Option<String>,
    date: Option<NaiveDate>,
    from: Option<NaiveTime>,
    until: Option<NaiveTime>,
    today: NaiveDate,
    color: bool,
}

impl CliConfig {
    /// Lay the arguments out as the slots a conversation host would fill.
    fn to_memory(&self) -> SlotMemory {
        let mut memory = SlotMemory::new();
        let text_slots = [
            (memory::FILTER_MOVIE_NAME, &self.movie),
            (memory::FILTER_GENRE, &self.genre),
            (memory::FILTER_CITY, &self.city),
            (memory::FILTER_STATE, &self.state),
            (memory::FILTER_THEATER, &self.theater),
        ];
        for (key, value) in text_slots {
            if let Some(value) = value {
                memory.set_string(key, value.as_str());
            }
        }

        if let Some(until) = self.until {
            // Only the end of the range bounds the hour; the start date is
            // pinned only when --date asks for one.
            let mut range = json!({
                "type": "datetimerange",
                "end": self.date.unwrap_or(self.today).and_time(until).format("%Y-%m-%d %H:%M:%S").to_string(),
            });
            if let Some(date) = self.date {
                range["start"] = json!(date.format("%Y-%m-%d").to_string());
            }
            memory.set(memory::FILTER_DATE, vec![MemoryValue::resolved("--until", json!({"values": [range]}))]);
        } else if let Some(date) = self.date {
            memory.set(
                memory::FILTER_DATE,
                vec![MemoryValue::resolved(
                    "--date",
                    json!({"values": [{"type": "date", "value": date.format("%Y-%m-%d").to_string()}]}),
                )],
            );
        }

        if let Some(from) = self.from {
            memory.set(
                memory::FILTER_TIME,
                vec![MemoryValue::resolved(
                    "--from",
                    json!({"values": [{"type": "time", "value": from.format("%H:%M:%S").to_string()}]}),
                )],
            );
        }
        memory
    }
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig { color: std::io::IsTerminal::is_terminal(&std::io::stdout()), ..CliConfig::default() };
    config.today = showtime::Context::default().today;
    let mut date_phrase: Option<String> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            inline.clone().or_else(|| args.next()).ok_or_else(|| format!("error: {name} expects a value"))
        };

        match flag.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("showtime {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--movie" => config.movie = Some(value("--movie")?),
            "--genre" => config.genre = Some(value("--genre")?),
            "--city" => config.city = Some(value("--city")?),
            "--state" => config.state = Some(value("--state")?),
            "--theater" => config.theater = Some(value("--theater")?),
            "--date" => date_phrase = Some(value("--date")?),
            "--from" => config.from = Some(parse_clock(&value("--from")?)?),
            "--until" => config.until = Some(parse_clock(&value("--until")?)?),
            "--today" => {
                let raw = value("--today")?;
                config.today = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| format!("error: invalid --today '{raw}' (expected YYYY-MM-DD)"))?;
            }
            _ => return Err(format!("error: unknown option '{arg}'\n\n{}", help_text())),
        }
    }

    if let Some(phrase) = date_phrase {
        config.date = Some(parse_date_phrase(&phrase, config.today)?);
    }
    Ok(config)
}

/// Resolve a phrase like "friday" or "tomorrow" relative to `today`.
fn parse_date_phrase(phrase: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(phrase, "%Y-%m-%d") {
        return Ok(date);
    }
    let now = Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN));
    parse_date_string(phrase, now, Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|err| format!("error: cannot read --date '{phrase}': {err}"))
}

fn parse_clock(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("error: invalid time '{value}' (expected HH:MM)"))
}

fn help_text() -> String {
    format!(
        "showtime {version}

Resolve movie search criteria against the built-in catalog.

Usage:
  showtime [OPTIONS]

Options:
  --movie <name>         Movie name (case-insensitive, apostrophes ignored).
  --genre <genre>        Genre tag, e.g. scifi, \"new releases\".
  --city <city>          Theater city.
  --state <state>        Theater state.
  --theater <name>       Theater name or code, e.g. RM16.
  --date <phrase>        Day to search: YYYY-MM-DD or a phrase like \"friday\".
  --from <HH:MM>         Earliest showtime hour.
  --until <HH:MM>        Latest showtime hour, on any day unless --date is set.
  --today <YYYY-MM-DD>   First day of the showtime window. Default: local date.
  --color                Force ANSI color output.
  --no-color             Disable ANSI color output.
  -h, --help             Show this help message.
  -V, --version          Print version information.

Environment:
  SHOWTIME_LOG           Log filter, e.g. debug or showtime=trace. Default: warn.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
