use crate::{
    AtomicGenerator, BasicGenerator, Error, Id, IdGenerator, RandSource, SystemClock, TimeSource,
    time::{Duration, UNIX_EPOCH},
};
use core::cell::Cell;
use std::collections::HashSet;
use std::thread::scope;

/// 2025-01-01T00:00:00Z
const NEW_YEAR_2025: u64 = 1_735_689_600_000;

struct MockTime {
    millis: u64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

struct MockStepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

impl TimeSource for MockStepTime {
    fn current_millis(&self) -> u64 {
        self.values[self.index.get()]
    }
}

struct FixedRand(u32);

impl RandSource<u32> for FixedRand {
    fn rand(&self) -> u32 {
        self.0
    }
}

fn run_sequence_increments_within_same_tick<G, T>(generator: &G)
where
    G: IdGenerator<T>,
    T: TimeSource,
{
    let id1 = generator.next_id();
    let id2 = generator.next_id();
    let id3 = generator.next_id();

    for id in [id1, id2, id3] {
        assert_eq!(id.unix_millis(), Some(NEW_YEAR_2025));
        assert_eq!(id.node(), generator.node());
    }
    assert_eq!(id1.sequence(), 0);
    assert_eq!(id2.sequence(), 1);
    assert_eq!(id3.sequence(), 2);
    assert!(id1 < id2 && id2 < id3);
}

fn run_same_timestamp_never_equal<G, T>(generator: &G)
where
    G: IdGenerator<T>,
    T: TimeSource,
{
    let ts = UNIX_EPOCH + Duration::from_millis(1_600_000_000_123);
    let id1 = generator.next_id_at(ts);
    let id2 = generator.next_id_at(ts);
    assert_ne!(id1, id2);
    assert_eq!(id1.unix_millis(), id2.unix_millis());
}

fn run_wraparound_does_not_duplicate<G, T>(generator: &G)
where
    G: IdGenerator<T>,
    T: TimeSource,
{
    let id1 = generator.next_id_from_millis(1_600_000_000_123);
    let id2 = generator.next_id_from_millis(1_600_000_000_123);

    assert_eq!(id1.sequence(), Id::MAX_SEQUENCE);
    assert_eq!(id2.sequence(), 0);
    assert_ne!(id1, id2);
    // The documented ordering inversion across a wrap.
    assert!(id2 < id1);
    assert_eq!(id1.unix_seconds(), id2.unix_seconds());
    assert_eq!(id1.millis(), id2.millis());
}

fn run_unique_within_one_millisecond<G, T>(generator: &G)
where
    G: IdGenerator<T>,
    T: TimeSource,
{
    let mut seen = HashSet::new();
    for _ in 0..=Id::MAX_SEQUENCE {
        assert!(seen.insert(generator.next_id()));
    }
    // The next ID wraps onto the first one.
    assert!(!seen.insert(generator.next_id()));
}

fn run_monotonic<G, T>(generator: &G, index: &Cell<usize>, steps: usize)
where
    G: IdGenerator<T>,
    T: TimeSource,
{
    let mut last = Id::NIL;
    for step in 0..steps {
        index.set(step);
        for _ in 0..1000 {
            let id = generator.next_id();
            assert!(id > last, "{id:?} <= {last:?}");
            last = id;
        }
    }
}

fn run_rejects_invalid_node<G>()
where
    G: IdGenerator<SystemClock>,
{
    for node in [0, 64, 100, u8::MAX] {
        assert_eq!(
            G::new(node, SystemClock).err(),
            Some(Error::InvalidNode { node })
        );
    }
    for node in [1, 32, 63] {
        assert_eq!(G::new(node, SystemClock).map(|g| g.node()).ok(), Some(node));
    }
}

#[test]
fn basic_sequence_increments_within_same_tick() {
    let generator =
        BasicGenerator::from_components(1, 0, MockTime { millis: NEW_YEAR_2025 }).unwrap();
    run_sequence_increments_within_same_tick(&generator);
}

#[test]
fn atomic_sequence_increments_within_same_tick() {
    let generator =
        AtomicGenerator::from_components(9, 0, MockTime { millis: NEW_YEAR_2025 }).unwrap();
    run_sequence_increments_within_same_tick(&generator);
}

#[test]
fn basic_same_timestamp_never_equal() {
    run_same_timestamp_never_equal(&BasicGenerator::default());
    run_same_timestamp_never_equal(&BasicGenerator::new(63, SystemClock).unwrap());
}

#[test]
fn atomic_same_timestamp_never_equal() {
    run_same_timestamp_never_equal(&AtomicGenerator::default());
    run_same_timestamp_never_equal(&AtomicGenerator::new(63, SystemClock).unwrap());
}

#[test]
fn basic_wraparound_does_not_duplicate() {
    let seq = u32::from(Id::MAX_SEQUENCE);
    run_wraparound_does_not_duplicate(&BasicGenerator::from_components(1, seq, SystemClock).unwrap());
    // The 32-bit counter itself wrapping lands on the same 15-bit values.
    run_wraparound_does_not_duplicate(
        &BasicGenerator::from_components(1, u32::MAX, SystemClock).unwrap(),
    );
}

#[test]
fn atomic_wraparound_does_not_duplicate() {
    let seq = u32::from(Id::MAX_SEQUENCE);
    run_wraparound_does_not_duplicate(
        &AtomicGenerator::from_components(1, seq, SystemClock).unwrap(),
    );
    run_wraparound_does_not_duplicate(
        &AtomicGenerator::from_components(1, u32::MAX, SystemClock).unwrap(),
    );
}

#[test]
fn basic_unique_within_one_millisecond() {
    let generator = BasicGenerator::new(5, MockTime { millis: NEW_YEAR_2025 }).unwrap();
    run_unique_within_one_millisecond(&generator);
}

#[test]
fn atomic_unique_within_one_millisecond() {
    let generator = AtomicGenerator::new(5, MockTime { millis: NEW_YEAR_2025 }).unwrap();
    run_unique_within_one_millisecond(&generator);
}

#[test]
fn basic_monotonic_with_advancing_clock() {
    let clock = MockStepTime {
        values: vec![NEW_YEAR_2025, NEW_YEAR_2025 + 1, NEW_YEAR_2025 + 999, NEW_YEAR_2025 + 1000],
        index: Cell::new(0),
    };
    let generator = BasicGenerator::from_components(2, 0, &clock).unwrap();
    run_monotonic(&generator, &clock.index, clock.values.len());
}

#[test]
fn atomic_monotonic_with_advancing_clock() {
    let clock = MockStepTime {
        values: vec![NEW_YEAR_2025, NEW_YEAR_2025 + 1, NEW_YEAR_2025 + 999, NEW_YEAR_2025 + 1000],
        index: Cell::new(0),
    };
    let generator = AtomicGenerator::from_components(2, 0, &clock).unwrap();
    run_monotonic(&generator, &clock.index, clock.values.len());
}

#[test]
fn rejects_invalid_node() {
    run_rejects_invalid_node::<BasicGenerator>();
    run_rejects_invalid_node::<AtomicGenerator>();
    assert!(BasicGenerator::with_rng(0, SystemClock, &FixedRand(1)).is_err());
    assert!(AtomicGenerator::from_components(64, 0, SystemClock).is_err());
}

#[test]
fn default_generators_use_node_one() {
    assert_eq!(BasicGenerator::default().node(), 1);
    assert_eq!(AtomicGenerator::default().node(), 1);
    assert_eq!(BasicGenerator::default().next_id().node(), 1);
}

#[test]
fn seeds_sequence_from_rng() {
    let generator =
        BasicGenerator::with_rng(4, MockTime { millis: NEW_YEAR_2025 }, &FixedRand(40_000))
            .unwrap();
    assert_eq!(generator.next_id().sequence(), (40_000 & 0x7fff) as u16);

    let generator =
        AtomicGenerator::with_rng(4, MockTime { millis: NEW_YEAR_2025 }, &FixedRand(7)).unwrap();
    assert_eq!(generator.next_id().sequence(), 7);
    assert_eq!(generator.next_id().sequence(), 8);
}

#[test]
fn known_tokens_for_fixed_time() {
    let ts = UNIX_EPOCH + Duration::from_millis(NEW_YEAR_2025);
    let generator = BasicGenerator::from_components(1, 1, SystemClock).unwrap();
    let tokens: Vec<String> = (0..4).map(|_| generator.next_id_at(ts).to_string()).collect();
    assert_eq!(
        tokens,
        [
            "58c1fa4a4a00ca4f",
            "c7af08e7eeda149e",
            "369c178593b35eed",
            "a5892623388ca93c"
        ]
    );
}

#[test]
fn next_id_at_splits_seconds_and_millis() {
    let generator = AtomicGenerator::from_components(1, 42, SystemClock).unwrap();
    let id = generator.next_id_at(UNIX_EPOCH + Duration::from_millis(1_730_000_000_123));
    assert_eq!(id, Id::from_components(1_730_000_000, 123, 1, 42));
}

#[test]
fn time_before_epoch_clamps() {
    let generator = BasicGenerator::from_components(1, 0, SystemClock).unwrap();
    let id = generator.next_id_at(UNIX_EPOCH - Duration::from_secs(1));
    assert_eq!(id.unix_seconds(), 0);
    assert_eq!(id.millis(), 0);
    assert_eq!(id.node(), 1);
}

#[test]
fn wall_clock_ids_carry_current_time() {
    let before = SystemClock.current_millis();
    let id = AtomicGenerator::new(12, SystemClock).unwrap().next_id();
    let after = SystemClock.current_millis();
    let millis = id.unix_millis().unwrap();
    assert!(before <= millis && millis <= after);
    assert_eq!(id.node(), 12);
}

#[test]
fn atomic_generator_threaded_uniqueness() {
    const IDS_PER_THREAD: usize = 1000;
    let threads = num_cpus::get().clamp(2, 16);
    let generator =
        AtomicGenerator::from_components(3, 0, MockTime { millis: NEW_YEAR_2025 }).unwrap();

    let all: Vec<Id> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    (0..IDS_PER_THREAD)
                        .map(|_| generator.next_id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(all.len(), threads * IDS_PER_THREAD);
    let unique: HashSet<_> = all.iter().copied().collect();
    assert_eq!(unique.len(), all.len());
    assert!(all.iter().all(|id| id.node() == 3));
    let max_seq = all.iter().map(Id::sequence).max().unwrap();
    assert_eq!(usize::from(max_seq), threads * IDS_PER_THREAD - 1);
}
