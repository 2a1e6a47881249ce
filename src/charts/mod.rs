//! Charts module - static figure rendering

mod renderer;

pub use renderer::CurveFigure;
