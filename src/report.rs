use chrono::NaiveDate;
use showtime::memory::{self, Memory};
use showtime::{Classification, MomentRange, ResolvedRange, SlotMemory};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const TITLE: &str = "\x1b[1;36m";
    pub const HEADING: &str = "\x1b[1;32m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    /// Wraps text in SGR codes, or passes it through when color is off.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, code: &str) -> String {
            if self.enabled { format!("{code}{}{RESET}", s.as_ref()) } else { s.as_ref().to_string() }
        }
    }
}

pub struct Run<'a> {
    pub today: NaiveDate,
    pub resolved: &'a ResolvedRange,
    pub range: MomentRange,
    pub classification: &'a Classification,
    pub memory: &'a SlotMemory,
    pub color: bool,
}

pub fn print_run(run: &Run<'_>) {
    let palette = ansi::Palette::new(run.color);
    println!("\n{}", palette.paint(format!("🎬  Showtimes from {}", run.today), ansi::TITLE));

    println!("\n{}", palette.paint("━━━ Range ━━━", ansi::GRAY));
    print_range(run, &palette);

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    print_classification(run.classification, &palette);

    println!("\n{}", palette.paint("━━━ Facts ━━━", ansi::GRAY));
    print_facts(run.memory, &palette);
    println!();
}

fn print_range(run: &Run<'_>, palette: &ansi::Palette) {
    if run.resolved.is_clear() {
        println!("  {}", palette.paint("No date or time constraint", ansi::DIM));
        return;
    }
    let tr = run.range.to_time_range();
    let axes = [
        ("start date", tr.start_date),
        ("start time", tr.start_time),
        ("end date", tr.end_date),
        ("end time", tr.end_time),
    ];
    for (label, value) in axes {
        let value = match value {
            Some(value) => palette.paint(value, ansi::GREEN),
            None => palette.paint("any", ansi::DIM),
        };
        println!("  {} {}", palette.paint(format!("{label:>10}:"), ansi::BLUE), value);
    }
}

fn print_classification(classification: &Classification, palette: &ansi::Palette) {
    match classification {
        Classification::NoMatch => {
            println!("{}", palette.paint("  No movies match", ansi::DIM));
            println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
            println!("  • No theater in that city/state shows the movie");
            println!("  • The hour window excludes every showtime");
            println!("  • The movie is listed but not scheduled");
            let tip = "  Tip: Set SHOWTIME_LOG=debug to see how the range was resolved";
            println!("\n{}", palette.paint(tip, ansi::DIM));
        }
        Classification::Single { name, rating, pick } => {
            println!(
                "  {} {} {}",
                palette.paint(name, ansi::HEADING),
                palette.paint("│", ansi::DIM),
                palette.paint(format!("rating {rating}"), ansi::YELLOW),
            );
            match pick {
                Some(pick) => println!(
                    "      {} {}  {} {}",
                    palette.paint("at:", ansi::DIM),
                    palette.paint(showtime::engine::format_showtime(&pick.time), ansi::CYAN),
                    palette.paint("│ theater:", ansi::DIM),
                    palette.paint(&pick.theater, ansi::BLUE)
                ),
                None => {
                    let hint = "several showings match; narrow by theater or time";
                    println!("      {}", palette.paint(hint, ansi::DIM));
                }
            }
        }
        Classification::Candidates(names) => {
            for (idx, name) in names.iter().enumerate() {
                println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), palette.paint(name, ansi::GREEN));
            }
        }
        Classification::Overflow { count } => {
            println!("  {}", palette.paint(format!("{count} movies match; too many to list"), ansi::YELLOW));
        }
    }
}

fn print_facts(memory: &SlotMemory, palette: &ansi::Palette) {
    let mut any = false;
    for key in memory::FOUND_FACTS {
        let values = memory.get_string_list(key);
        if values.is_empty() {
            continue;
        }
        any = true;
        println!("  {} {}", palette.paint(format!("{key}:"), ansi::BLUE), values.join(", "));
    }
    if !any {
        println!("  {}", palette.paint("none", ansi::DIM));
    }
}
