use std::collections::HashMap;

use once_cell::sync::Lazy;

const GLYPH_HEIGHT: usize = 5;
const SPACING: usize = 1;
const FILL: char = '█';
const GLOW: char = '░';

type Glyph = [&'static str; GLYPH_HEIGHT];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('A', [" ## ", "#  #", "####", "#  #", "#  #"]),
        ('C', [" ###", "#   ", "#   ", "#   ", " ###"]),
        ('D', ["### ", "#  #", "#  #", "#  #", "### "]),
        ('E', ["####", "#   ", "### ", "#   ", "####"]),
        ('H', ["#  #", "#  #", "####", "#  #", "#  #"]),
        ('L', ["#   ", "#   ", "#   ", "#   ", "####"]),
        ('M', ["#   #", "## ##", "# # #", "#   #", "#   #"]),
        ('O', [" ## ", "#  #", "#  #", "#  #", " ## "]),
        ('R', ["### ", "#  #", "### ", "# # ", "#  #"]),
        ('T', ["#####", "  #  ", "  #  ", "  #  ", "  #  "]),
        ('U', ["#  #", "#  #", "#  #", "#  #", " ## "]),
        ('Y', ["#   #", " # # ", "  #  ", "  #  ", "  #  "]),
        (' ', ["  ", "  ", "  ", "  ", "  "]),
    ])
});

/// Render `text` in the block font with a glow trail one cell right of each stroke.
/// Characters without a glyph are skipped.
pub fn render(text: &str) -> Vec<String> {
    let glyphs: Vec<&Glyph> = text
        .chars()
        .filter_map(|ch| GLYPHS.get(&ch.to_ascii_uppercase()))
        .collect();

    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    for (index, glyph) in glyphs.iter().enumerate() {
        for (row, pattern) in rows.iter_mut().zip(glyph.iter()) {
            if index > 0 {
                row.push_str(&" ".repeat(SPACING));
            }
            row.push_str(pattern);
        }
    }

    rows.into_iter()
        .map(|row| paint(&row).trim_end().to_string())
        .collect()
}

/// Display width of the rendered banner.
pub fn width(lines: &[String]) -> usize {
    lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

fn paint(pattern: &str) -> String {
    let cells: Vec<char> = pattern.chars().collect();
    let mut painted = String::with_capacity(cells.len() + 1);
    for (index, cell) in cells.iter().enumerate() {
        let lit = *cell == '#';
        let after_lit = index > 0 && cells[index - 1] == '#';
        painted.push(match (lit, after_lit) {
            (true, _) => FILL,
            (false, true) => GLOW,
            (false, false) => ' ',
        });
    }
    if cells.last() == Some(&'#') {
        painted.push(GLOW);
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_height() {
        let lines = render("Memory Match");
        assert_eq!(lines.len(), GLYPH_HEIGHT);
        assert!(lines.iter().any(|line| line.contains(FILL)));
    }

    #[test]
    fn strokes_leave_a_glow() {
        let lines = render("L");
        assert_eq!(lines[0], "█░");
        assert_eq!(lines[4], "████░");
    }

    #[test]
    fn unknown_characters_are_skipped() {
        assert_eq!(render("L?"), render("L"));
        assert_eq!(width(&render("")), 0);
    }
}
