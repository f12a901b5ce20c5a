use memomatch_core::{background::ParticleField, Burst, ThemeKind};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Points},
    Frame,
};
use tracing::debug;

// Background dots are blended toward the page colour to stay behind the board.
const BACKDROP_OPACITY: f64 = 0.4;
const DOT_SCALE: f64 = 0.2;
const DOT_STEP: f64 = 0.25;

const GRAVITY: f64 = 0.04;
const DRAG: f64 = 0.97;
const CONFETTI_COLORS: [Color; 6] = [
    Color::Rgb(0, 234, 255),
    Color::Rgb(255, 214, 0),
    Color::Rgb(255, 82, 130),
    Color::Rgb(120, 255, 140),
    Color::Rgb(190, 120, 255),
    Color::Rgb(255, 255, 255),
];

/// Terminal rendering of the particle field.
pub struct Backdrop {
    field: ParticleField,
}

impl Backdrop {
    pub fn new(count: usize, width: u16, height: u16, theme: ThemeKind, seed: Option<u64>) -> Self {
        Self {
            field: ParticleField::new(count, f64::from(width), f64::from(height), theme, seed),
        }
    }

    /// Track a new terminal size without reseeding.
    pub fn resize(&mut self, width: u16, height: u16) {
        let size = (f64::from(width), f64::from(height));
        if self.field.size() != size {
            self.field.resize(size.0, size.1);
        }
    }

    pub fn sync_theme(&mut self, theme: ThemeKind) {
        if self.field.set_theme(theme) {
            debug!(?theme, "Backdrop recoloured");
        }
    }

    pub fn step(&mut self) {
        self.field.step();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, page: Color) {
        let (width, height) = self.field.size();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(page)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for particle in self.field.particles() {
                    let coords = disc(particle.x, height - particle.y, particle.size * DOT_SCALE);
                    ctx.draw(&Points {
                        coords: &coords,
                        color: blend(particle.color.to_rgb(), page, BACKDROP_OPACITY),
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

struct Piece {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    ttl: u16,
    color: Color,
}

/// Short-lived confetti shower launched when the board is cleared.
pub struct Confetti {
    pieces: Vec<Piece>,
    width: f64,
    height: f64,
    rng: StdRng,
}

impl Confetti {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pieces: Vec::new(),
            width: f64::from(width),
            height: f64::from(height),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = f64::from(width);
        self.height = f64::from(height);
    }

    pub fn is_active(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Spawn the burst's pieces at its origin, fanned across its spread around straight up.
    pub fn launch(&mut self, burst: Burst) {
        let origin_x = f64::from(burst.origin_x) * self.width;
        let origin_y = (1.0 - f64::from(burst.origin_y)) * self.height;
        let half_spread = f64::from(burst.spread).to_radians() / 2.0;
        for _ in 0..burst.particle_count {
            let angle = std::f64::consts::FRAC_PI_2 + self.rng.gen_range(-half_spread..=half_spread);
            let speed = self.rng.gen_range(0.8..2.2);
            let color = CONFETTI_COLORS[self.rng.gen_range(0..CONFETTI_COLORS.len())];
            self.pieces.push(Piece {
                x: origin_x,
                y: origin_y,
                vx: angle.cos() * speed * 1.5,
                vy: angle.sin() * speed,
                ttl: self.rng.gen_range(40..80),
                color,
            });
        }
    }

    pub fn step(&mut self) {
        for piece in &mut self.pieces {
            piece.vx *= DRAG;
            piece.vy = piece.vy * DRAG - GRAVITY;
            piece.x += piece.vx;
            piece.y += piece.vy;
            piece.ttl = piece.ttl.saturating_sub(1);
        }
        let (width, height) = (self.width, self.height);
        self.pieces
            .retain(|piece| piece.ttl > 0 && piece.y >= 0.0 && piece.y <= height * 1.5 && (0.0..=width).contains(&piece.x));
    }

    /// Draw only the pieces. Cells without a piece keep what the board drew.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.pieces.is_empty() {
            return;
        }
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| {
                for piece in &self.pieces {
                    ctx.draw(&Points {
                        coords: &[(piece.x, piece.y)],
                        color: piece.color,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

fn disc(cx: f64, cy: f64, radius: f64) -> Vec<(f64, f64)> {
    let mut coords = vec![(cx, cy)];
    let mut dy = -radius;
    while dy <= radius {
        let mut dx = -radius;
        while dx <= radius {
            if dx * dx + dy * dy <= radius * radius {
                coords.push((cx + dx, cy + dy));
            }
            dx += DOT_STEP;
        }
        dy += DOT_STEP;
    }
    coords
}

fn blend((r, g, b): (u8, u8, u8), page: Color, opacity: f64) -> Color {
    let (pr, pg, pb) = match page {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    let mix = |fg: u8, bg: u8| (f64::from(fg) * opacity + f64::from(bg) * (1.0 - opacity)).round() as u8;
    Color::Rgb(mix(r, pr), mix(g, pg), mix(b, pb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, style::Style, widgets::Block, Terminal};

    #[test]
    fn disc_covers_center_and_stays_in_radius() {
        let coords = disc(5.0, 5.0, 0.6);
        assert!(coords.contains(&(5.0, 5.0)));
        assert!(coords
            .iter()
            .all(|(x, y)| (x - 5.0).powi(2) + (y - 5.0).powi(2) <= 0.36 + 1e-9));
    }

    #[test]
    fn blend_moves_toward_page() {
        assert_eq!(
            blend((255, 255, 255), Color::Rgb(0, 0, 0), 0.4),
            Color::Rgb(102, 102, 102)
        );
    }

    #[test]
    fn confetti_keeps_board_background() {
        let panel = Color::Rgb(0, 30, 60);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("test terminal");
        let mut confetti = Confetti::new(40, 12);
        confetti.launch(Burst::VICTORY);
        confetti.step();

        terminal
            .draw(|frame| {
                let area = frame.size();
                frame.render_widget(Block::default().style(Style::default().bg(panel)), area);
                confetti.render(frame, area);
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        for y in 0..12 {
            for x in 0..40 {
                assert_eq!(buffer.get(x, y).bg, panel, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn confetti_burst_fades_out() {
        let mut confetti = Confetti::new(100, 40);
        confetti.launch(Burst::VICTORY);
        assert_eq!(confetti.pieces.len(), 150);
        for _ in 0..200 {
            confetti.step();
        }
        assert!(!confetti.is_active());
    }
}
