//! Reference curve fuzzer.
//!
//! Tests that every curve kind handles arbitrary series without panicking
//! and produces curves with one y value per x value.

use complexity_plot::testing::check_reference_curves;
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            check_reference_curves(data);
        });
    }
}
