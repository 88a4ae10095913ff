use crossterm::style::Color;

/// A flash over the cells of a newly completed word
#[derive(Debug, Clone)]
pub struct Celebration {
    pub word: usize,
    pub start_frame: u32,
    pub duration_frames: u32,
}

impl Celebration {
    pub fn new(word: usize, current_frame: u32) -> Self {
        Self {
            word,
            start_frame: current_frame,
            duration_frames: 20, // ~2 seconds at 10 FPS
        }
    }

    pub fn is_active(&self, current_frame: u32) -> bool {
        current_frame < self.start_frame + self.duration_frames
    }

    /// Current intensity (0.0 to 1.0): a bright flash that pulses and fades
    pub fn intensity(&self, current_frame: u32) -> f32 {
        let elapsed = current_frame.saturating_sub(self.start_frame);
        if elapsed < 3 {
            return 1.0;
        }
        let progress = elapsed as f32 / self.duration_frames as f32;
        let amplitude = (1.0 - progress).max(0.0);
        let pulse = (elapsed as f32 * 1.2).sin() * 0.5 + 0.5;
        (0.4 + pulse * 0.6) * amplitude
    }
}

/// Tracks word completions and the flashes they trigger
#[derive(Default)]
pub struct CelebrationManager {
    celebrations: Vec<Celebration>,
    frame_count: u32,
    prev_completed: Vec<bool>,
}

impl CelebrationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame, starting a flash for each word that just became complete
    pub fn update(&mut self, completed: &[bool]) {
        self.frame_count += 1;

        if self.prev_completed.len() == completed.len() {
            for (i, (&now, &before)) in completed.iter().zip(&self.prev_completed).enumerate() {
                if now && !before {
                    self.celebrations.push(Celebration::new(i, self.frame_count));
                }
            }
        }
        self.prev_completed = completed.to_vec();

        self.celebrations.retain(|c| c.is_active(self.frame_count));
    }

    /// Forget everything (new puzzle)
    pub fn reset(&mut self) {
        self.celebrations.clear();
        self.frame_count = 0;
        self.prev_completed.clear();
    }

    /// Strongest active flash among `words`
    pub fn intensity_for<I>(&self, words: I) -> f32
    where
        I: IntoIterator<Item = usize>,
    {
        let words: Vec<usize> = words.into_iter().collect();
        self.celebrations
            .iter()
            .filter(|c| words.contains(&c.word))
            .map(|c| c.intensity(self.frame_count))
            .fold(0.0, f32::max)
    }

    /// Blend `base_color` towards gold by `intensity`
    pub fn throb_color(base_color: Color, intensity: f32) -> Color {
        if intensity <= 0.0 {
            return base_color;
        }

        let (target_r, target_g, target_b) = (255.0, 215.0, 0.0);
        match base_color {
            Color::Rgb { r, g, b } => {
                let blend = (intensity * 0.85).min(0.95);
                Color::Rgb {
                    r: (r as f32 + (target_r - r as f32) * blend) as u8,
                    g: (g as f32 + (target_g - g as f32) * blend) as u8,
                    b: (b as f32 + (target_b - b as f32) * blend) as u8,
                }
            }
            _ if intensity > 0.3 => Color::Rgb {
                r: target_r as u8,
                g: target_g as u8,
                b: target_b as u8,
            },
            _ => base_color,
        }
    }
}
