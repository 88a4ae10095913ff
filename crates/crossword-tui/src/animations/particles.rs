use crossterm::style::Color;
use rand::Rng;

/// One glyph drifting across the solved screen
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub glyph: char,
    pub color: Color,
    /// Seconds left before it fades
    pub life: f32,
}

impl Particle {
    /// Apply one frame of motion; false once it has faded or fallen off the bottom
    pub fn step(&mut self, gravity: f32, floor: f32) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.life -= 0.016;
        self.life > 0.0 && self.y < floor
    }

    /// Terminal cell to draw at, if on screen
    pub fn cell(&self, width: u16, height: u16) -> Option<(u16, u16)> {
        let inside = self.life > 0.0
            && (0.0..width as f32).contains(&self.x)
            && (0.0..height as f32).contains(&self.y);
        inside.then(|| (self.x as u16, self.y as u16))
    }
}

/// Effects the solved screen cycles through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    /// Shapes tumbling from the top
    Confetti,
    /// Bursts in the upper half
    Fireworks,
    /// The solved answers' letters falling in rainbow colors
    AnswerRain,
}

impl EffectType {
    const ALL: [EffectType; 3] = [EffectType::Confetti, EffectType::Fireworks, EffectType::AnswerRain];

    pub fn pick<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Palette for confetti and fireworks
pub const SPARK_COLORS: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

pub fn spark_color<R: Rng>(rng: &mut R) -> Color {
    SPARK_COLORS[rng.gen_range(0..SPARK_COLORS.len())]
}

/// Convert hue (0.0-1.0) to a saturated RGB color
pub fn hue_to_rgb(hue: f32) -> Color {
    let h = hue.rem_euclid(1.0) * 6.0;
    let ramp = ((1.0 - (h % 2.0 - 1.0).abs()) * 255.0) as u8;

    let (r, g, b) = match h as u32 {
        0 => (255, ramp, 0),
        1 => (ramp, 255, 0),
        2 => (0, 255, ramp),
        3 => (0, ramp, 255),
        4 => (ramp, 0, 255),
        _ => (255, 0, ramp),
    };

    Color::Rgb { r, g, b }
}

pub const CONFETTI_GLYPHS: &[char] = &['*', '✦', '✧', '◆', '◇', '○', '●', '■', '□', '▲', '▽'];

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> Particle {
        Particle {
            x: 3.0,
            y: 4.0,
            vx: 1.0,
            vy: 0.0,
            glyph: 'A',
            color: Color::White,
            life: 1.0,
        }
    }

    #[test]
    fn test_particle_cell() {
        let p = particle();
        assert_eq!(p.cell(10, 10), Some((3, 4)));
        assert_eq!(p.cell(3, 10), None);
        assert_eq!(Particle { life: 0.0, ..p }.cell(10, 10), None);
    }

    #[test]
    fn test_step_moves_and_falls() {
        let mut p = particle();
        assert!(p.step(0.5, 100.0));
        assert_eq!(p.x, 4.0);
        assert_eq!(p.vy, 0.5);
        p.y = 99.9;
        p.vy = 1.0;
        assert!(!p.step(0.0, 100.0));
    }

    #[test]
    fn test_hue_endpoints_are_red() {
        assert_eq!(hue_to_rgb(0.0), Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hue_to_rgb(1.0), Color::Rgb { r: 255, g: 0, b: 0 });
    }
}
