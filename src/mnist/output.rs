use crate::mnist::sample::Sample;
use clap::ValueEnum;
use tracing::warn;

/// How a sample list is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SampleFormat {
    /// One JSON object per line.
    #[default]
    Lines,
    /// A single JSON array.
    Array,
}

/// The first `k` samples, or all of them when there are fewer than `k`.
pub fn prefix(samples: &[Sample], k: usize) -> &[Sample] {
    if k > samples.len() {
        warn!(
            requested = k,
            available = samples.len(),
            "short output asks for more samples than were extracted"
        );
    }
    &samples[..k.min(samples.len())]
}

pub fn serialize_samples(samples: &[Sample], format: SampleFormat) -> serde_json::Result<String> {
    match format {
        SampleFormat::Lines => {
            let mut out = String::new();
            for sample in samples {
                out.push_str(&serde_json::to_string(sample)?);
                out.push('\n');
            }
            Ok(out)
        }
        SampleFormat::Array => {
            let mut out = serde_json::to_string(samples)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn samples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample {
                label: i % 2 == 0,
                features: vec![i % 3 == 0, true],
            })
            .collect()
    }

    #[test]
    fn prefix_is_always_the_leading_slice() {
        let all = samples(5);
        for k in 0..=all.len() {
            assert_eq!(prefix(&all, k), &all[..k]);
        }
        assert_eq!(prefix(&all, 50), &all[..]);
    }

    #[test]
    fn short_output_is_a_prefix_of_full_output() {
        let all = samples(6);
        for format in [SampleFormat::Lines, SampleFormat::Array] {
            let full = serialize_samples(&all, format).unwrap();
            let short = serialize_samples(prefix(&all, 3), format).unwrap();

            let parse = |text: &str| -> Vec<Sample> {
                match format {
                    SampleFormat::Lines => text
                        .lines()
                        .map(|l| serde_json::from_str(l).unwrap())
                        .collect(),
                    SampleFormat::Array => serde_json::from_str(text).unwrap(),
                }
            };
            let full = parse(&full);
            let short = parse(&short);
            assert_eq!(&short[..], &full[..3]);
        }
    }

    #[test]
    fn line_format_writes_one_object_per_line() {
        let text = serialize_samples(&samples(2), SampleFormat::Lines).unwrap();
        assert_eq!(
            text,
            "{\"label\":true,\"features\":[true,true]}\n{\"label\":false,\"features\":[false,true]}\n"
        );
    }

    #[test]
    fn empty_array_format() {
        let text = serialize_samples(&[], SampleFormat::Array).unwrap();
        assert_eq!(text, "[]\n");
    }
}
