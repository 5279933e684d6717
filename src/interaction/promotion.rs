//! Whether a square should show the promotion prompt right now.

use common::bitboard::Square;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub narrow: bool,
    pub landscape: bool,
}

impl Viewport {
    pub fn new(narrow: bool, landscape: bool) -> Self {
        Self { narrow, landscape }
    }

    pub fn from_dimensions(width: u32, height: u32, narrow_max_width: u32) -> Self {
        Self {
            narrow: width <= narrow_max_width,
            landscape: height < width,
        }
    }
}

/// A narrow landscape viewport has no room for the prompt next to the board,
/// so the prompt is left to a compact layout elsewhere.
pub fn show_promotion_prompt(
    promotion_square: Option<Square>,
    square: Square,
    viewport: Viewport,
) -> bool {
    if promotion_square != Some(square) {
        return false;
    }
    !(viewport.narrow && viewport.landscape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_other_squares_never_show() {
        assert!(!show_promotion_prompt(Some(E8), D8, Viewport::new(false, false)));
        assert!(!show_promotion_prompt(None, E8, Viewport::new(false, false)));
    }

    #[test]
    fn test_wide_viewport_always_shows() {
        assert!(show_promotion_prompt(Some(E8), E8, Viewport::new(false, false)));
        assert!(show_promotion_prompt(Some(E8), E8, Viewport::new(false, true)));
    }

    #[test]
    fn test_narrow_viewport_depends_on_orientation() {
        assert!(!show_promotion_prompt(Some(E8), E8, Viewport::new(true, true)));
        assert!(show_promotion_prompt(Some(E8), E8, Viewport::new(true, false)));
    }

    #[test]
    fn test_from_dimensions() {
        assert_eq!(
            Viewport::new(true, false),
            Viewport::from_dimensions(400, 800, 850)
        );
        assert_eq!(
            Viewport::new(true, true),
            Viewport::from_dimensions(850, 400, 850)
        );
        assert_eq!(
            Viewport::new(false, true),
            Viewport::from_dimensions(1920, 1080, 850)
        );
    }
}
