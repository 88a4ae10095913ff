pub mod celebrations;
pub mod particles;
pub mod win_screen;

pub use celebrations::CelebrationManager;
pub use win_screen::WinScreen;
