//! Glyph ramp definitions and brightness-to-glyph selection.
//!
//! A ramp orders its glyphs from the one drawn for black (index 0) to the
//! one drawn for white (last index). The registry is a closed set of 13
//! ramps addressed by their 1-based CLI index.

/// ASCII set A, black to white. Suits dark terminals.
pub const ASCII_A: &[char] = &['.', ':', '-', '+', '*', '?', '#', '%', '$', '@'];

/// ASCII set A, white to black. Suits light backgrounds.
pub const ASCII_A_REV: &[char] = &['@', '$', '%', '#', '?', '*', '+', '-', ':', '.'];

/// ASCII set B, black to white. Longer ramp with a blank floor.
pub const ASCII_B: &[char] = &[
    ' ', '.', '\'', ':', ';', '!', '+', '*', 'x', '%', '$', '&', '@',
];

/// ASCII set B, white to black.
pub const ASCII_B_REV: &[char] = &[
    '@', '&', '$', '%', 'x', '*', '+', '!', ';', ':', '\'', '.', ' ',
];

/// Mixed punctuation ramp.
pub const MIXED_A: &[char] = &['`', '.', '~', '+', 'o', 'x', '*', '#', '&', '@'];

/// Mixed line/bracket ramp.
pub const MIXED_B: &[char] = &['_', '-', '/', '|', '\\', '(', ')', '{', '}', '#'];

/// Numeric characters only.
pub const NUMERIC: &[char] = &['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

/// Alphabetic characters only.
pub const ALPHABETIC: &[char] = &['i', 'l', 't', 'c', 'o', 'a', 'e', 'm', 'w', 'M', 'W', 'B'];

/// Letters and digits combined.
pub const ALPHANUMERIC: &[char] = &[
    '1', 'i', 'l', '7', 't', 'c', 'o', 'a', 'e', 'm', 'w', '8', 'M', 'W', 'B', '0',
];

/// Block shades (Code Page 437), black to white.
pub const BLOCKS: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Block shades (Code Page 437), white to black.
pub const BLOCKS_REV: &[char] = &['█', '▓', '▒', '░', ' '];

/// Mathematical operators (Unicode).
pub const MATH: &[char] = &['∙', '∘', '∗', '∴', '≈', '≡', '∑', '∫', '∬', '∎'];

/// Arrows (Unicode).
pub const ARROWS: &[char] = &['→', '↝', '↠', '↣', '⇀', '⇉', '⇒', '⇛', '⇶', '⟹'];

/// Number of ramps in the registry.
pub const CHARSET_COUNT: usize = 13;

/// One named glyph ramp.
///
/// `glyphs` is ordered darkest to lightest; [`Charset::glyph`] maps an 8-bit
/// brightness onto that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub name: &'static str,
    pub description: &'static str,
    pub glyphs: &'static [char],
}

/// The full ramp registry, in CLI index order (1-based externally).
static REGISTRY: [Charset; CHARSET_COUNT] = [
    Charset {
        name: "ascii-a",
        description: "ASCII set A, dark to light. Suits dark terminals. (default)",
        glyphs: ASCII_A,
    },
    Charset {
        name: "ascii-a-rev",
        description: "ASCII set A, light to dark. Suits light backgrounds.",
        glyphs: ASCII_A_REV,
    },
    Charset {
        name: "ascii-b",
        description: "ASCII set B, dark to light.",
        glyphs: ASCII_B,
    },
    Charset {
        name: "ascii-b-rev",
        description: "ASCII set B, light to dark.",
        glyphs: ASCII_B_REV,
    },
    Charset {
        name: "mixed-a",
        description: "Mixed punctuation ramp.",
        glyphs: MIXED_A,
    },
    Charset {
        name: "mixed-b",
        description: "Mixed line and bracket ramp.",
        glyphs: MIXED_B,
    },
    Charset {
        name: "numeric",
        description: "Numeric characters.",
        glyphs: NUMERIC,
    },
    Charset {
        name: "alphabetic",
        description: "Alphabetic characters.",
        glyphs: ALPHABETIC,
    },
    Charset {
        name: "alphanumeric",
        description: "Alphanumeric characters.",
        glyphs: ALPHANUMERIC,
    },
    Charset {
        name: "blocks",
        description: "Block shades, dark to light (Code Page 437).",
        glyphs: BLOCKS,
    },
    Charset {
        name: "blocks-rev",
        description: "Block shades, light to dark (Code Page 437).",
        glyphs: BLOCKS_REV,
    },
    Charset {
        name: "math",
        description: "Mathematical operators (Unicode).",
        glyphs: MATH,
    },
    Charset {
        name: "arrows",
        description: "Arrows (Unicode).",
        glyphs: ARROWS,
    },
];

/// All registered ramps, in index order.
pub fn registry() -> &'static [Charset; CHARSET_COUNT] {
    &REGISTRY
}

impl Charset {
    /// Look up a ramp by its 1-based CLI index (1..=13).
    pub fn from_index(index: u8) -> Option<&'static Charset> {
        if (1..=CHARSET_COUNT as u8).contains(&index) {
            Some(&REGISTRY[index as usize - 1])
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Select the glyph for an 8-bit brightness value.
    ///
    /// The index is `floor(gray / 255 * (len - 1))`, which is monotonic
    /// non-decreasing in `gray`. An out-of-range index cannot be produced by
    /// that formula; hitting one is a programming error, so it asserts
    /// rather than substituting a default glyph.
    #[inline]
    pub fn glyph(&self, gray: u8) -> char {
        let idx = gray as usize * (self.glyphs.len() - 1) / 255;
        assert!(
            idx < self.glyphs.len(),
            "glyph index {} out of range for ramp '{}' (len {})",
            idx,
            self.name,
            self.glyphs.len()
        );
        self.glyphs[idx]
    }

    /// Select a glyph honoring an opacity sample.
    ///
    /// A fully transparent pixel renders as a space regardless of its
    /// brightness; anything else falls through to [`Charset::glyph`].
    #[inline]
    pub fn glyph_masked(&self, gray: u8, alpha: u8) -> char {
        if alpha == 0 {
            ' '
        } else {
            self.glyph(gray)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_thirteen_ramps() {
        assert_eq!(registry().len(), CHARSET_COUNT);
        for set in registry() {
            assert!(!set.is_empty(), "ramp '{}' is empty", set.name);
        }
    }

    #[test]
    fn from_index_is_one_based() {
        assert_eq!(Charset::from_index(1).unwrap().name, "ascii-a");
        assert_eq!(Charset::from_index(13).unwrap().name, "arrows");
        assert!(Charset::from_index(0).is_none());
        assert!(Charset::from_index(14).is_none());
    }

    #[test]
    fn glyph_extremes() {
        let set = Charset::from_index(1).unwrap();
        assert_eq!(set.glyph(0), '.');
        assert_eq!(set.glyph(255), '@');
    }

    #[test]
    fn glyph_index_is_monotonic() {
        for set in registry() {
            let mut prev = 0usize;
            for g in 0u16..=255 {
                let idx = g as usize * (set.len() - 1) / 255;
                assert!(idx >= prev, "ramp '{}' not monotonic at {}", set.name, g);
                prev = idx;
            }
        }
    }

    #[test]
    fn zero_alpha_is_always_blank() {
        let set = Charset::from_index(1).unwrap();
        for g in [0u8, 1, 127, 254, 255] {
            assert_eq!(set.glyph_masked(g, 0), ' ');
        }
    }

    #[test]
    fn opaque_alpha_uses_gray_glyph() {
        let set = Charset::from_index(1).unwrap();
        for g in [0u8, 64, 128, 255] {
            assert_eq!(set.glyph_masked(g, 255), set.glyph(g));
        }
    }
}
