// Library exports for testing
pub use app::{App, Outcome, Phase};
pub use entities::{Alien, Body, Bolt, BossAlien, Formation, MarchDirection, Ship};
pub use input::{InputFrame, InputManager, InputSource, Key};
pub use wave::Wave;

pub mod app;
pub mod audio;
pub mod constants;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod wave;
