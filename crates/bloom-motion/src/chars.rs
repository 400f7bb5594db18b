//! Character constants for decorative layers.

/// Glyphs for large and medium leaves, picked by which half-turn they face.
pub const LEAF_GLYPHS: &[char] = &['❧', '☙'];

/// Strokes for small leaves, indexed by rotation in 45 degree steps.
pub const LEAF_STROKES: &[char] = &['|', '/', '─', '\\'];

/// Sphere shading ramp from darkest to brightest.
pub const SHADE_CHARS: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Characters used for hero rings.
pub const RING_CHARS: &[char] = &['·', '∙', '•'];
