use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::particles::{hue_to_rgb, spark_color, EffectType, Particle, CONFETTI_GLYPHS};

const GRAVITY: f32 = 0.15;

/// Frames between effect changes
const EFFECT_FRAMES: u32 = 300;

const WIN_MESSAGES: [&str; 10] = [
    "PUZZLE SOLVED!",
    "BRILLIANT!",
    "WORDSMITH!",
    "EVERY CLUE CRACKED!",
    "PERFECT GRID!",
    "EXCELLENT!",
    "CONGRATULATIONS!",
    "WELL DONE!",
    "LEXICON LEGEND!",
    "ACROSS AND DOWN!",
];

const BANNERS: [&str; 2] = [
    r#"
 ____   ___  _ __     _______ ____  _
/ ___| / _ \| |\ \   / / ____|  _ \| |
\___ \| | | | | \ \ / /|  _| | | | | |
 ___) | |_| | |__\ V / | |___| |_| |_|
|____/ \___/|_____\_/  |_____|____/(_)
"#,
    r#"
  ____ ___  __  __ ____  _     _____ _____ _____
 / ___/ _ \|  \/  |  _ \| |   | ____|_   _| ____|
| |  | | | | |\/| | |_) | |   |  _|   | | |  _|
| |__| |_| | |  | |  __/| |___| |___  | | | |___
 \____\___/|_|  |_|_|   |_____|_____| |_| |_____|
"#,
];

/// The animated solved screen
pub struct WinScreen {
    rng: StdRng,
    particles: Vec<Particle>,
    effect: EffectType,
    /// Letters of the solved answers, rained down by `EffectType::AnswerRain`
    letters: Vec<char>,
    frame: u32,
    hue: f32,
    message: &'static str,
    banner: &'static str,
    burst_cooldown: u32,
    width: u16,
    height: u16,
}

impl WinScreen {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let effect = EffectType::pick(&mut rng);
        Self {
            effect,
            message: WIN_MESSAGES[rng.gen_range(0..WIN_MESSAGES.len())],
            banner: BANNERS[rng.gen_range(0..BANNERS.len())],
            rng,
            particles: Vec::new(),
            letters: Vec::new(),
            frame: 0,
            hue: 0.0,
            burst_cooldown: 0,
            width: 80,
            height: 24,
        }
    }

    /// Start over for a freshly solved puzzle whose answers spell `letters`
    pub fn reset<I>(&mut self, letters: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.particles.clear();
        self.letters = letters.into_iter().collect();
        self.frame = 0;
        self.hue = 0.0;
        self.burst_cooldown = 0;
        self.effect = EffectType::pick(&mut self.rng);
        self.message = WIN_MESSAGES[self.rng.gen_range(0..WIN_MESSAGES.len())];
        self.banner = BANNERS[self.rng.gen_range(0..BANNERS.len())];
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame += 1;
        self.hue = (self.hue + 0.05) % 1.0;

        if self.frame % EFFECT_FRAMES == 0 {
            self.effect = EffectType::pick(&mut self.rng);
        }

        let floor = self.height as f32 + 5.0;
        self.particles.retain_mut(|p| p.step(GRAVITY, floor));

        match self.effect {
            EffectType::Confetti => self.spawn_confetti(),
            EffectType::Fireworks => self.spawn_burst(),
            EffectType::AnswerRain => self.spawn_answer_letters(),
        }
    }

    fn spawn_confetti(&mut self) {
        let width = self.width.max(1) as f32;
        for _ in 0..3 {
            let glyph = CONFETTI_GLYPHS.choose(&mut self.rng).copied().unwrap_or('*');
            self.particles.push(Particle {
                x: self.rng.gen_range(0.0..width),
                y: -2.0,
                vx: self.rng.gen_range(-0.5..0.5),
                vy: self.rng.gen_range(0.3..1.0),
                glyph,
                color: spark_color(&mut self.rng),
                life: self.rng.gen_range(3.0..6.0),
            });
        }
    }

    fn spawn_burst(&mut self) {
        if self.burst_cooldown > 0 {
            self.burst_cooldown -= 1;
            return;
        }
        if self.width <= 20 || self.height <= 10 || !self.rng.gen_bool(0.08) {
            return;
        }

        let x = self.rng.gen_range(10.0..(self.width as f32 - 10.0));
        let y = self.rng.gen_range(5.0..(self.height as f32 / 2.0));
        let color = spark_color(&mut self.rng);
        for _ in 0..25 {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.gen_range(0.5..2.0);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                glyph: '●',
                color,
                life: self.rng.gen_range(1.0..2.5),
            });
        }
        self.burst_cooldown = 15;
    }

    fn spawn_answer_letters(&mut self) {
        let width = self.width.max(1) as f32;
        for _ in 0..2 {
            let glyph = self.letters.choose(&mut self.rng).copied().unwrap_or('*');
            let hue = self.hue + self.rng.gen_range(0.0..1.0);
            self.particles.push(Particle {
                x: self.rng.gen_range(0.0..width),
                y: -1.0,
                vx: 0.0,
                vy: self.rng.gen_range(0.1..0.4),
                glyph,
                color: hue_to_rgb(hue),
                life: self.rng.gen_range(4.0..7.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn message(&self) -> &str {
        self.message
    }

    pub fn banner(&self) -> &str {
        self.banner
    }

    /// Hue the banner and message cycle from
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Dark backdrop that slowly pulses
    pub fn backdrop(&self) -> Color {
        let pulse = ((self.frame as f32) * 0.05).sin() * 0.5 + 0.5;
        Color::Rgb {
            r: 8,
            g: 12 + (pulse * 8.0) as u8,
            b: 20 + (pulse * 12.0) as u8,
        }
    }
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(effect: EffectType) -> WinScreen {
        let mut screen = WinScreen::with_rng(StdRng::seed_from_u64(3));
        screen.effect = effect;
        screen
    }

    #[test]
    fn test_answer_rain_uses_solved_letters() {
        let mut screen = screen(EffectType::AnswerRain);
        screen.reset("CAT".chars());
        screen.effect = EffectType::AnswerRain;
        for _ in 0..10 {
            screen.update();
        }
        assert!(!screen.particles().is_empty());
        assert!(screen.particles().iter().all(|p| "CAT".contains(p.glyph)));
    }

    #[test]
    fn test_particles_fade_out() {
        let mut screen = screen(EffectType::Fireworks);
        for _ in 0..50 {
            screen.update();
        }
        assert!(screen.particles().iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn test_reset_clears_particles() {
        let mut screen = screen(EffectType::Confetti);
        screen.update();
        assert!(!screen.particles().is_empty());
        screen.reset(std::iter::empty());
        assert!(screen.particles().is_empty());
        assert!(!screen.message().is_empty());
        assert!(!screen.banner().is_empty());
    }
}
