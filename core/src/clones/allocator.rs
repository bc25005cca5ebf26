use std::cmp::Reverse;
use std::collections::BinaryHeap;

use failure::Fail;
use log::debug;

use crate::clones::VoiceClone;
use crate::note::{Key, NoteInterval};
use crate::time::TicksTime;

#[derive(Debug, Fail, PartialEq)]
pub enum AllocationError {
  #[fail(
    display = "Malformed note interval for key {}: ends at {} before starting at {}",
    key, end, start
  )]
  MalformedInterval {
    start: TicksTime,
    end: TicksTime,
    key: Key,
  },
}

/// Partitions notes into the fewest clones such that, within a clone, every
/// note starts at least `grace` ticks after the previous one ends.
///
/// Notes are swept in `(start, end, key)` order and each one goes to the clone
/// that has been free the longest, or to a new clone when none is free yet.
/// There is always at least one clone, even without notes.
pub fn allocate<'a, I>(intervals: I, grace: TicksTime) -> Result<Vec<VoiceClone>, AllocationError>
where
  I: IntoIterator<Item = &'a NoteInterval>,
{
  let mut notes = Vec::new();
  for note in intervals {
    if note.is_malformed() {
      return Err(AllocationError::MalformedInterval {
        start: note.start(),
        end: note.end(),
        key: note.key(),
      });
    }
    notes.push(*note);
  }
  notes.sort();

  let mut clones = vec![VoiceClone::new(0)];

  // (busy until, clone index)
  let mut cursors = BinaryHeap::with_capacity(4);
  cursors.push(Reverse((TicksTime::zero(), 0usize)));

  for note in notes.iter() {
    let free = cursors
      .peek()
      .map(|Reverse(cursor)| *cursor)
      .filter(|(busy_until, _)| *busy_until <= note.start())
      .map(|(_, index)| index);

    let index = match free {
      Some(index) => {
        cursors.pop();
        index
      }
      None => {
        let index = clones.len();
        clones.push(VoiceClone::new(index));
        index
      }
    };

    clones[index].assign(*note, grace);
    cursors.push(Reverse((note.end() + grace, index)));
  }

  debug!(
    "Allocated {} notes into {} clones (grace {})",
    notes.len(),
    clones.len(),
    grace
  );

  Ok(clones)
}

#[cfg(test)]
mod test {

  use super::{allocate, AllocationError};
  use crate::clones::VoiceClone;
  use crate::note::NoteInterval;
  use crate::test_support::{max_coverage, random_notes};
  use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
  use crate::time::TicksTime;

  fn contents(clones: &[VoiceClone]) -> Vec<Vec<NoteInterval>> {
    clones
      .iter()
      .map(|clone| clone.assigned_intervals().to_vec())
      .collect()
  }

  fn grace(ticks: u64) -> TicksTime {
    TicksTime::new(ticks)
  }

  #[test]
  /// An overlapping note should spawn a second clone and the first one should be reused
  pub fn overlapping_notes() {
    let a = NoteInterval::new(0, 10, 60);
    let b = NoteInterval::new(5, 15, 62);
    let c = NoteInterval::new(12, 20, 64);
    let clones = allocate(&[c, a, b], grace(0)).unwrap();
    assert_eq!(contents(&clones), vec![vec![a, c], vec![b]]);
    assert_eq!(clones[0].index(), 0);
    assert_eq!(clones[1].index(), 1);
  }

  #[test]
  /// Adjacent notes do not overlap
  pub fn adjacent_notes() {
    let a = NoteInterval::new(0, 10, 60);
    let b = NoteInterval::new(10, 20, 62);
    let clones = allocate(&[a, b], grace(0)).unwrap();
    assert_eq!(contents(&clones), vec![vec![a, b]]);
  }

  #[test]
  /// The grace window should keep adjacent notes apart
  pub fn adjacent_notes_with_grace() {
    let a = NoteInterval::new(0, 10, 60);
    let b = NoteInterval::new(10, 20, 62);
    let clones = allocate(&[a, b], grace(3)).unwrap();
    assert_eq!(contents(&clones), vec![vec![a], vec![b]]);
  }

  #[test]
  pub fn gap_exactly_the_grace() {
    let a = NoteInterval::new(0, 10, 60);
    let b = NoteInterval::new(13, 20, 62);
    let clones = allocate(&[a, b], grace(3)).unwrap();
    assert_eq!(contents(&clones), vec![vec![a, b]]);
  }

  #[test]
  /// Without notes there is still one idle clone
  pub fn no_notes() {
    let notes: Vec<NoteInterval> = Vec::new();
    let clones = allocate(&notes, grace(120)).unwrap();
    assert_eq!(clones.len(), 1);
    assert!(clones[0].assigned_intervals().is_empty());
  }

  #[test]
  pub fn identical_notes() {
    let a = NoteInterval::new(0, 10, 60);
    let clones = allocate(&[a, a, a], grace(0)).unwrap();
    assert_eq!(contents(&clones), vec![vec![a], vec![a], vec![a]]);
  }

  #[test]
  /// A zero-length note inside a longer one still needs a clone of its own
  pub fn zero_length_note() {
    let long = NoteInterval::new(0, 10, 60);
    let empty = NoteInterval::new(5, 5, 62);
    let clones = allocate(&[empty, long], grace(0)).unwrap();
    assert_eq!(contents(&clones), vec![vec![long], vec![empty]]);
  }

  #[test]
  /// The clone that has been free the longest should take the next note
  pub fn prefers_longest_free_clone() {
    let a = NoteInterval::new(0, 10, 60);
    let b = NoteInterval::new(0, 5, 62);
    let c = NoteInterval::new(20, 30, 64);
    let d = NoteInterval::new(21, 30, 65);
    let clones = allocate(&[a, b, c, d], grace(0)).unwrap();
    // b sorts first because it is shorter
    assert_eq!(contents(&clones), vec![vec![b, c], vec![a, d]]);
  }

  #[test]
  pub fn malformed_interval() {
    let ok = NoteInterval::new(0, 10, 60);
    let bad = NoteInterval::new(20, 10, 61);
    let err = allocate(&[ok, bad], grace(0)).unwrap_err();
    assert_eq!(
      err,
      AllocationError::MalformedInterval {
        start: TicksTime::new(20),
        end: TicksTime::new(10),
        key: 61,
      }
    );
    assert_eq!(
      err.to_string(),
      "Malformed note interval for key 61: ends at 10 before starting at 20"
    );
  }

  #[test]
  /// Every note should end up in exactly one clone
  pub fn partition() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
      let notes = random_notes(&mut rng, 40);
      let clones = allocate(&notes, grace(rng.gen_range(0..4))).unwrap();
      let mut assigned: Vec<NoteInterval> = clones
        .iter()
        .flat_map(|clone| clone.assigned_intervals().iter().cloned())
        .collect();
      let mut expected = notes.clone();
      assigned.sort();
      expected.sort();
      assert_eq!(assigned, expected);
    }
  }

  #[test]
  /// Notes in the same clone should be apart by at least the grace window
  pub fn no_overlap() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
      let notes = random_notes(&mut rng, 40);
      let g = grace(rng.gen_range(0..6));
      for clone in allocate(&notes, g).unwrap() {
        let assigned = clone.assigned_intervals();
        for (i, a) in assigned.iter().enumerate() {
          for b in assigned[i + 1..].iter() {
            assert!(a.end() + g <= b.start() || b.end() + g <= a.start());
          }
        }
      }
    }
  }

  #[test]
  /// Without grace, the number of clones is the maximum number of simultaneous notes
  pub fn minimal_without_grace() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..50 {
      let notes = random_notes(&mut rng, 40);
      let clones = allocate(&notes, grace(0)).unwrap();
      assert_eq!(clones.len(), max_coverage(&notes).max(1));
    }
  }

  #[test]
  /// The input order should not change the result
  pub fn deterministic() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
      let notes = random_notes(&mut rng, 30);
      let mut reversed = notes.clone();
      reversed.reverse();
      let mut shuffled = notes.clone();
      shuffled.shuffle(&mut rng);

      let expected = contents(&allocate(&notes, grace(2)).unwrap());
      assert_eq!(contents(&allocate(&reversed, grace(2)).unwrap()), expected);
      assert_eq!(contents(&allocate(&shuffled, grace(2)).unwrap()), expected);
    }
  }
}
