use std::time::{Duration, Instant};

use pl_dashboard::filters::{Debouncer, FilterState, cycle_position, cycle_team};
use pl_dashboard::player::PlayerFilters;

const DELAY: Duration = Duration::from_millis(400);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn debouncer_fires_once_after_quiet_period() {
    let t0 = Instant::now();
    let mut timer = Debouncer::new(DELAY);
    timer.arm("a", t0);
    assert_eq!(timer.poll(t0 + ms(399)), None);
    assert_eq!(timer.poll(t0 + ms(400)), Some("a"));
    assert_eq!(timer.poll(t0 + ms(900)), None);
    assert!(!timer.is_armed());
}

#[test]
fn rearming_replaces_value_and_deadline() {
    let t0 = Instant::now();
    let mut timer = Debouncer::new(DELAY);
    timer.arm("a", t0);
    timer.arm("ab", t0 + ms(300));
    assert_eq!(timer.pending(), Some(&"ab"));
    assert_eq!(timer.time_until_due(t0 + ms(300)), Some(DELAY));
    assert_eq!(timer.poll(t0 + ms(500)), None);
    assert_eq!(timer.poll(t0 + ms(700)), Some("ab"));
}

#[test]
fn cancelled_timer_never_fires() {
    let t0 = Instant::now();
    let mut timer = Debouncer::new(DELAY);
    timer.arm(1, t0);
    assert_eq!(timer.cancel(), Some(1));
    assert_eq!(timer.poll(t0 + ms(1000)), None);
}

#[test]
fn typing_burst_commits_final_text_once() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    for (i, ch) in "Saka".chars().enumerate() {
        state.push_name_char(ch, t0 + ms(100 * i as u64));
        assert!(!state.tick(t0 + ms(100 * i as u64 + 50)));
    }
    assert!(state.search_pending());
    assert_eq!(state.filters().name, None);

    assert!(!state.tick(t0 + ms(699)));
    assert!(state.tick(t0 + ms(700)));
    assert_eq!(state.filters().name.as_deref(), Some("Saka"));
    assert_eq!(state.revision(), 1);
    assert!(!state.tick(t0 + ms(2000)));
}

#[test]
fn retyping_committed_value_does_not_recommit() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    state.set_name_draft("Rice", t0);
    assert!(state.tick(t0 + DELAY));

    state.set_name_draft("Ric", t0 + ms(500));
    state.set_name_draft("Rice ", t0 + ms(600));
    assert!(!state.tick(t0 + ms(1000)));
    assert_eq!(state.revision(), 1);
}

#[test]
fn erasing_search_commits_no_name_filter() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    state.set_name_draft("a", t0);
    assert!(state.tick(t0 + DELAY));

    state.pop_name_char(t0 + ms(500));
    assert_eq!(state.name_draft(), "");
    assert!(state.tick(t0 + ms(900)));
    assert_eq!(state.filters().name, None);
    assert!(!state.has_active_filters());
}

#[test]
fn dropdown_filters_commit_immediately() {
    let mut state = FilterState::default();
    assert!(state.set_team(Some("Arsenal".to_string())));
    assert!(state.set_position(Some("FW".to_string())));
    assert!(!state.set_position(Some("FW".to_string())));
    assert_eq!(state.revision(), 2);
    assert_eq!(state.filters().describe(), "team=Arsenal position=FW");
}

#[test]
fn nation_draft_keeps_spaces_while_committing_trimmed() {
    let mut state = FilterState::default();
    assert!(state.set_nation(Some("EN".to_string())));
    assert!(!state.set_nation(Some("EN ".to_string())));
    assert_eq!(state.nation_draft(), "EN ");
    assert_eq!(state.filters().nation.as_deref(), Some("EN"));
}

#[test]
fn clear_resets_everything_in_one_commit() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    state.set_team(Some("Chelsea".to_string()));
    state.set_nation(Some("ENG".to_string()));
    state.set_name_draft("Pal", t0);
    let before = state.revision();

    assert!(state.clear());
    assert_eq!(state.revision(), before + 1);
    assert!(state.filters().is_empty());
    assert_eq!(state.name_draft(), "");
    assert_eq!(state.nation_draft(), "");
    assert!(!state.search_pending());
    assert!(!state.tick(t0 + ms(1000)));
    assert!(!state.clear());
}

#[test]
fn team_cycle_wraps_through_all_teams() {
    assert_eq!(cycle_team(None).as_deref(), Some("Arsenal"));
    assert_eq!(cycle_team(Some("Arsenal")).as_deref(), Some("Aston Villa"));
    assert_eq!(cycle_team(Some("Wolverhampton")), None);
    assert_eq!(cycle_team(Some("Unknown FC")).as_deref(), Some("Arsenal"));
}

#[test]
fn position_cycle_uses_codes() {
    assert_eq!(cycle_position(None).as_deref(), Some("GK"));
    assert_eq!(cycle_position(Some("GK")).as_deref(), Some("DF"));
    assert_eq!(cycle_position(Some("mf")).as_deref(), Some("FW"));
    assert_eq!(cycle_position(Some("FW")), None);
}

#[test]
fn fast_typing_commits_only_the_full_name() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    state.set_name_draft("Haa", t0);
    state.set_name_draft("Haal", t0 + ms(150));
    state.set_name_draft("Haaland", t0 + ms(300));
    for step in 0..20 {
        state.tick(t0 + ms(step * 50));
    }
    assert_eq!(state.revision(), 1);
    assert_eq!(state.filters().name.as_deref(), Some("Haaland"));
}

#[test]
fn pause_mid_word_commits_twice() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    state.set_name_draft("Haa", t0);
    assert!(state.tick(t0 + ms(500)));
    assert_eq!(state.filters().name.as_deref(), Some("Haa"));

    for (i, ch) in "land".chars().enumerate() {
        state.push_name_char(ch, t0 + ms(500 + 50 * i as u64));
    }
    assert!(state.tick(t0 + ms(1100)));
    assert_eq!(state.filters().name.as_deref(), Some("Haaland"));
    assert_eq!(state.revision(), 2);
}

#[test]
fn clear_after_team_and_name_is_one_empty_commit() {
    let t0 = Instant::now();
    let mut state = FilterState::new(DELAY);
    state.set_team(Some("Chelsea".to_string()));
    state.set_name_draft("Son", t0);
    assert!(state.tick(t0 + DELAY));
    let before = state.revision();

    assert!(state.clear());
    assert_eq!(state.revision(), before + 1);
    assert_eq!(*state.filters(), PlayerFilters::default());
}
