#[macro_use]
extern crate approx;

mod hertz;
mod invariants;
mod loader;
mod segmentation;
