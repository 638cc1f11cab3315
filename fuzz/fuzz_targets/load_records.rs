//! Loader fuzzer.
//!
//! Arbitrary bytes through the CSV loader and the composer must never panic,
//! and every loaded series must come out sorted by input size.

use complexity_plot::testing::check_load_records;
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            check_load_records(data);
        });
    }
}
