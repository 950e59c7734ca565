//! Terminal frontend: framebuffer, board view, and diff renderer.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::TerminalRenderer;
pub use view::{BoardView, Viewport};
