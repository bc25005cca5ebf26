use rand::{rngs::StdRng, Rng};

use crate::note::NoteInterval;

/// Notes with a length of at least one tick
pub fn random_notes(rng: &mut StdRng, max_count: usize) -> Vec<NoteInterval> {
  let count = rng.gen_range(0..=max_count);
  (0..count)
    .map(|_| {
      let start = rng.gen_range(0..200);
      let length = rng.gen_range(1..=30);
      NoteInterval::new(start, start + length, rng.gen_range(40..80))
    })
    .collect()
}

/// Largest number of notes sounding at the same tick
pub fn max_coverage(notes: &[NoteInterval]) -> usize {
  let mut edges: Vec<(u64, i64)> = Vec::with_capacity(notes.len() * 2);
  for note in notes {
    edges.push((u64::from(note.start()), 1));
    edges.push((u64::from(note.end()), -1));
  }
  // ends sort before starts at the same tick
  edges.sort();

  let mut current = 0i64;
  let mut max = 0i64;
  for (_, delta) in edges {
    current += delta;
    max = max.max(current);
  }
  max as usize
}
