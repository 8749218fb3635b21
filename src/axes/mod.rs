mod polar;
mod ticks;

pub use polar::{AxisLabel, PolarAxesActor, PolarAxesGeometry, TextStyle};
pub use ticks::{LabelConversion, LabelFormat, auto_tick_values, explicit_tick_values};
