//! MNIST-format image/label streams to boolean-feature samples.

pub mod extract;
pub mod output;
pub mod sample;

pub use extract::{ExtractOptions, extract_samples, open_gz};
pub use output::{SampleFormat, prefix, serialize_samples};
pub use sample::ClassFilter;
