use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub use contrast::{ContrastSelector, TextColor};
pub use palette::{Palette, PaletteFamily};
pub mod contrast;
pub mod layout;
pub mod normalize;
pub mod palette;
pub mod render;
pub mod table;
