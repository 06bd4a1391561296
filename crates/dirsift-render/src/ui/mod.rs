//! Terminal widgets.

mod size_bar;

pub use size_bar::SizeBar;
