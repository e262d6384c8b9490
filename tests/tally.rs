use wc_winners::dataset::Dataset;
use wc_winners::tally::{Role, tally};

#[test]
fn counts_match_a_direct_filter_for_both_roles() {
    let dataset = Dataset::builtin().expect("dataset");
    for role in [Role::Winner, Role::RunnerUp] {
        let counts = tally(dataset.records(), role);
        assert_eq!(counts.role(), role);
        for (country, n) in counts.iter() {
            let expected = dataset
                .records()
                .iter()
                .filter(|r| role.country(r) == country)
                .count() as u32;
            assert_eq!(n, expected, "{role:?} count for {country}");
        }
    }
}

#[test]
fn tally_totals_equal_dataset_size() {
    let dataset = Dataset::builtin().expect("dataset");
    let wins = tally(dataset.records(), Role::Winner);
    let runner_ups = tally(dataset.records(), Role::RunnerUp);
    assert_eq!(wins.total() as usize, dataset.len());
    assert_eq!(runner_ups.total() as usize, dataset.len());
}

#[test]
fn known_counts() {
    let dataset = Dataset::builtin().expect("dataset");
    let wins = tally(dataset.records(), Role::Winner);
    assert_eq!(wins.count("Brazil"), 5);
    assert_eq!(wins.count("Germany"), 4);
    assert_eq!(wins.count("Italy"), 4);
    assert_eq!(wins.count("Uruguay"), 2);
    assert_eq!(wins.count("Netherlands"), 0);
    assert!(!wins.contains("West Germany"));
    assert_eq!(wins.len(), 8);

    let runner_ups = tally(dataset.records(), Role::RunnerUp);
    assert_eq!(runner_ups.count("Germany"), 4);
    assert_eq!(runner_ups.count("Netherlands"), 3);
    assert_eq!(runner_ups.count("Argentina"), 3);
}

#[test]
fn empty_records_give_an_empty_tally() {
    let counts = tally(&[], Role::Winner);
    assert!(counts.is_empty());
    assert_eq!(counts.total(), 0);
}

#[test]
fn tally_is_deterministic() {
    let dataset = Dataset::builtin().expect("dataset");
    assert_eq!(
        tally(dataset.records(), Role::RunnerUp),
        tally(dataset.records(), Role::RunnerUp)
    );
}
