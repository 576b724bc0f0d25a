use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::memory::{self, Memory, MemoryValue, SlotMemory};
use crate::{Catalog, Classification, Context, Criteria, MomentRange, Options, detect_entities, find_with, get_movies};

fn catalog() -> Catalog {
    Catalog::standard(Context::default().today).unwrap()
}

fn today() -> NaiveDate {
    Context::default().today
}

fn at(hour: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
}

#[test]
fn scifi_genre_finds_star_wars_everywhere() {
    let catalog = catalog();
    let out = find_with(&catalog, &Criteria::new().genre("scifi"), &Options::default());

    assert_eq!(out.movies, vec!["Star Wars"]);
    let Classification::Single { name, rating, pick } = &out.classification else {
        panic!("expected a single movie, got {:?}", out.classification);
    };
    assert_eq!(name, "Star Wars");
    assert_eq!(*rating, 4.6);
    assert_eq!(*pick, None);

    let star_wars = catalog.movie("Star Wars").unwrap();
    let showings = crate::engine::filter_showings(star_wars, None, None, None, &MomentRange::unbounded());
    let codes: Vec<&str> = showings.iter().map(|s| s.theater.code.as_str()).collect();
    assert_eq!(codes, vec!["RLC10", "RM16"]);
    let total: usize = showings.iter().map(|s| crate::engine::filter_times(s, &MomentRange::unbounded()).len()).sum();
    assert_eq!(total, 56 * 2);
}

#[test]
fn one_theater_one_hour_one_day_disambiguates() {
    let catalog = catalog();
    let range = MomentRange { start_date: Some(today()), start_time: at(20), end_time: at(20), end_date: None };
    let criteria = Criteria::new().genre("scifi").theater("RM16").range(range);
    let out = find_with(&catalog, &criteria, &Options::default());

    assert_eq!(out.classification.found_movies(), vec!["Star Wars"]);
    assert_eq!(out.classification.found_time().as_deref(), Some("8:00 PM"));
    assert_eq!(out.classification.found_theater(), Some("Regal Meridian 16"));
}

#[test]
fn one_theater_one_hour_every_day_stays_ambiguous() {
    let catalog = catalog();
    let range = MomentRange { start_time: at(20), end_time: at(20), ..MomentRange::unbounded() };
    let criteria = Criteria::new().genre("scifi").theater("RM16").range(range);
    let out = find_with(&catalog, &criteria, &Options::default());

    assert_eq!(out.classification.found_movies(), vec!["Star Wars"]);
    assert_eq!(out.classification.found_time(), None);
    assert_eq!(out.classification.found_theater(), None);
}

#[test]
fn theater_names_ignore_apostrophes() {
    let catalog = catalog();
    let out = find_with(&catalog, &Criteria::new().theater("ohare cinema"), &Options::default());
    assert_eq!(out.movies, vec!["Zoolander 2", "The Witch", "Deadpool", "Kung Fu Panda 3"]);
}

#[test]
fn unknown_movie_is_no_match() {
    let catalog = catalog();
    let out = find_with(&catalog, &Criteria::new().movie_name("Hail, Caesar!"), &Options::default());
    // Defined but unscheduled.
    assert_eq!(out.classification, Classification::NoMatch);
}

/// Drives a conversation the way a host would: slots arrive, entity detection
/// folds them into `resolved-times`, then the search callback publishes facts.
#[test]
fn multi_turn_conversation_narrows_to_one_showtime() {
    let catalog = catalog();
    let options = Options::default();
    let mut memory = SlotMemory::new();

    // "what new releases are playing?"
    memory.set_string(memory::FILTER_GENRE, "new releases");
    detect_entities(&mut memory, &options).unwrap();
    let c = get_movies(&mut memory, &catalog, &options);
    assert_eq!(c.found_movies(), vec!["Zoolander 2", "Deadpool", "London Has Fallen"]);
    assert_eq!(memory.get_string_list(memory::FOUND_MOVIES).len(), 3);

    // "the deadpool one, in seattle"
    memory.set_string(memory::FILTER_MOVIE_NAME, "deadpool");
    memory.set_string(memory::FILTER_CITY, "seattle");
    detect_entities(&mut memory, &options).unwrap();
    let c = get_movies(&mut memory, &catalog, &options);
    assert_eq!(c.found_movies(), vec!["Deadpool"]);
    assert_eq!(memory.get_string(memory::FOUND_RATING).as_deref(), Some("4.3"));
    assert!(!memory.contains(memory::FOUND_TIME));

    // "tomorrow night around 10"
    let tomorrow = today().succ_opt().unwrap();
    memory.set(
        memory::FILTER_DATETIME,
        vec![MemoryValue::resolved(
            "tomorrow at 10pm",
            json!({"values": [
                {"type": "datetime", "value": format!("{tomorrow} 10:00:00")},
                {"type": "datetime", "value": format!("{tomorrow} 22:00:00")}
            ]}),
        )],
    );
    detect_entities(&mut memory, &options).unwrap();
    let c = get_movies(&mut memory, &catalog, &options);
    assert!(matches!(c, Classification::Single { pick: Some(_), .. }), "{c:?}");
    assert_eq!(memory.get_string(memory::FOUND_TIME).as_deref(), Some("10:00 PM"));
    assert_eq!(memory.get_string(memory::FOUND_THEATER).as_deref(), Some("Regal Meridian 16"));

    // "actually, anything in illinois": the carried-forward range still applies,
    // the Seattle filter no longer matches.
    memory.set_string(memory::FILTER_STATE, "illinois");
    detect_entities(&mut memory, &options).unwrap();
    let c = get_movies(&mut memory, &catalog, &options);
    assert_eq!(c, Classification::NoMatch);
    assert!(memory::FOUND_FACTS.iter().all(|key| !memory.contains(key)));
    assert!(memory.contains(memory::RESOLVED_TIMES));
}

#[test]
fn date_slot_range_bounds_end_and_time_slot_bounds_start() {
    let catalog = catalog();
    let options = Options::default();
    let mut memory = SlotMemory::new();

    memory.set_string(memory::FILTER_MOVIE_NAME, "the witch");
    memory.set_string(memory::FILTER_THEATER, "OHC");
    memory.set(
        memory::FILTER_DATE,
        vec![MemoryValue::resolved(
            "this afternoon",
            json!({"values": [{
                "type": "datetimerange",
                "start": format!("{} 12:00:00", today()),
                "end": format!("{} 13:00:00", today())
            }]}),
        )],
    );
    let resolved = detect_entities(&mut memory, &options).unwrap();
    let range = resolved.range();
    assert_eq!(range.start_date, Some(today()));
    assert_eq!(range.end_time, at(13));
    // The date slot never supplies a start time.
    assert_eq!(range.start_time, None);

    // 10:00, 12:00 and the midnight show rolling into next Tuesday all pass.
    let c = get_movies(&mut memory, &catalog, &options);
    assert_eq!(c.found_movies(), vec!["The Witch"]);
    assert_eq!(c.found_time(), None);

    memory.set(
        memory::FILTER_TIME,
        vec![MemoryValue::resolved("noon", json!({"values": [{"type": "time", "value": "12:00:00"}]}))],
    );
    let range = detect_entities(&mut memory, &options).unwrap().range();
    assert_eq!(range.start_time, at(12));
    assert_eq!(range.end_time, at(13));

    let c = get_movies(&mut memory, &catalog, &options);
    assert_eq!(c.found_time().as_deref(), Some("12:00 PM"));
    assert_eq!(c.found_theater(), Some("O'Hare Cinema"));
}

#[test]
fn weekend_range_keeps_its_dates() {
    let mut memory = SlotMemory::new();
    memory.set(
        memory::FILTER_DATE,
        vec![MemoryValue::resolved(
            "this weekend",
            json!({"values": [{"type": "datetimerange", "start": "2013-02-16", "end": "2013-02-18"}]}),
        )],
    );
    let range = detect_entities(&mut memory, &Options::default()).unwrap().range();
    assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2013, 2, 16));
    assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2013, 2, 18));
    assert_eq!(range.start_time, None);
    assert_eq!(range.end_time, None);

    // Saturday only: 8 showtimes per theater.
    let catalog = catalog();
    let star_wars = catalog.movie("Star Wars").unwrap();
    let total: usize = crate::engine::filter_showings(star_wars, None, None, None, &range)
        .iter()
        .map(|s| crate::engine::filter_times(s, &range).len())
        .sum();
    assert_eq!(total, 8 * 2);
}
