use serde_derive::Deserialize;

/// Position of a clone relative to the instrument anchor.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Transform {
  pub translation: [f32; 3],
  /// Degrees around the vertical axis
  pub rotation_y: f32,
}

/// How clones of one instrument fan out so they never intersect each other.
#[derive(Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(tag = "kind")]
pub enum Placement {
  /// Pipe family (flute, piccolo, recorder ...)
  #[serde(rename = "diagonal")]
  Diagonal { step: f32 },

  /// Saxophone family
  #[serde(rename = "fan")]
  Fan { degrees: f32 },

  #[serde(rename = "stacked")]
  Stacked { step: f32 },
}

impl Default for Placement {
  fn default() -> Placement {
    Placement::Diagonal { step: 5.0 }
  }
}

impl Placement {
  pub fn offset(&self, index: usize) -> Transform {
    let i = index as f32;
    match *self {
      Placement::Diagonal { step } => Transform {
        translation: [step * i, 0.0, -step * i],
        rotation_y: 0.0,
      },
      Placement::Fan { degrees } => Transform {
        translation: [0.0; 3],
        rotation_y: degrees * i,
      },
      Placement::Stacked { step } => Transform {
        translation: [0.0, step * i, 0.0],
        rotation_y: 0.0,
      },
    }
  }
}
