use crate::error::AnalysisError;
use crate::mnist::sample::{ClassFilter, Sample, binarize};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Preamble of an image file: magic, record count, rows, columns (4 bytes each).
pub const IMAGE_HEADER_LEN: usize = 16;

/// Preamble of a label file: magic and record count (4 bytes each).
pub const LABEL_HEADER_LEN: usize = 8;

/// Pixels per 28x28 image.
pub const DEFAULT_PIXELS: usize = 28 * 28;

pub const DEFAULT_RECORD_COUNT: usize = 10_000;

const IMAGES: &str = "image";
const LABELS: &str = "label";

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Bytes per image record.
    pub pixels: usize,
    /// Records to read from the streams, accepted or not.
    pub count: usize,
    pub classes: ClassFilter,
}

/// Open a gzip-compressed file for streaming decompression.
pub fn open_gz(path: &Path) -> Result<GzDecoder<BufReader<File>>, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    Ok(GzDecoder::new(BufReader::new(file)))
}

/// Walk the image and label streams in lockstep and keep the records whose
/// label is one of the two accepted classes.
///
/// Rejected records still consume their pixel block so both streams stay on
/// the same record. Either stream running out before `count` records is a
/// [`AnalysisError::TruncatedStream`].
pub fn extract_samples<I: Read, L: Read>(
    mut images: I,
    mut labels: L,
    options: &ExtractOptions,
) -> Result<Vec<Sample>, AnalysisError> {
    skip_exact(&mut images, IMAGE_HEADER_LEN, IMAGES, 0)?;
    skip_exact(&mut labels, LABEL_HEADER_LEN, LABELS, 0)?;

    let mut samples = Vec::new();
    let mut label = [0u8; 1];
    let mut pixels = vec![0u8; options.pixels];
    let mut skipped = 0usize;

    for record in 0..options.count {
        read_exact(&mut labels, &mut label, LABELS, record)?;

        match options.classes.classify(label[0]) {
            Some(positive) => {
                read_exact(&mut images, &mut pixels, IMAGES, record)?;
                samples.push(Sample {
                    label: positive,
                    features: binarize(&pixels),
                });
            }
            None => {
                skip_exact(&mut images, options.pixels, IMAGES, record)?;
                skipped += 1;
                debug!(record, raw_label = label[0], "skipping record");
            }
        }
    }

    info!(
        records = options.count,
        kept = samples.len(),
        skipped,
        "extracted samples"
    );
    Ok(samples)
}

/// Fill `buf` completely or report how far the stream got.
fn read_exact<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    stream: &'static str,
    record: usize,
) -> Result<(), AnalysisError> {
    let mut got = 0;
    while got < buf.len() {
        match reader.read(&mut buf[got..]) {
            Ok(0) => {
                return Err(AnalysisError::TruncatedStream {
                    stream,
                    record,
                    wanted: buf.len(),
                    got,
                });
            }
            Ok(n) => got += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(AnalysisError::StreamIo { stream, source }),
        }
    }
    Ok(())
}

/// Discard exactly `len` bytes.
fn skip_exact<R: Read>(
    reader: &mut R,
    len: usize,
    stream: &'static str,
    record: usize,
) -> Result<(), AnalysisError> {
    let got = io::copy(&mut reader.by_ref().take(len as u64), &mut io::sink())
        .map_err(|source| AnalysisError::StreamIo { stream, source })?;
    if got < len as u64 {
        return Err(AnalysisError::TruncatedStream {
            stream,
            record,
            wanted: len,
            got: got as usize,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::{Cursor, Write};

    const PIXELS: usize = 4;

    fn image_stream(records: &[[u8; PIXELS]]) -> Vec<u8> {
        let mut out = vec![0u8; IMAGE_HEADER_LEN];
        for r in records {
            out.extend_from_slice(r);
        }
        out
    }

    fn label_stream(labels: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; LABEL_HEADER_LEN];
        out.extend_from_slice(labels);
        out
    }

    fn options(count: usize) -> ExtractOptions {
        ExtractOptions {
            pixels: PIXELS,
            count,
            classes: ClassFilter::new(1, 7).unwrap(),
        }
    }

    fn records() -> Vec<[u8; PIXELS]> {
        vec![
            [200, 0, 128, 127],
            [255, 255, 255, 255],
            [0, 0, 0, 255],
            [9, 9, 9, 9],
        ]
    }

    #[test]
    fn skips_rejected_labels_and_stays_in_sync() {
        let images = image_stream(&records());
        let labels = label_stream(&[1, 5, 7, 2]);

        let samples =
            extract_samples(Cursor::new(images), Cursor::new(labels), &options(4)).unwrap();

        assert_eq!(
            samples,
            vec![
                Sample {
                    label: true,
                    features: vec![true, false, true, false],
                },
                Sample {
                    label: false,
                    features: vec![false, false, false, true],
                },
            ]
        );
    }

    #[test]
    fn stops_after_requested_count() {
        let images = image_stream(&records());
        let labels = label_stream(&[1, 5, 7, 2]);

        let samples =
            extract_samples(Cursor::new(images), Cursor::new(labels), &options(2)).unwrap();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].label);
    }

    #[test]
    fn short_label_stream_is_truncated() {
        let images = image_stream(&records());
        let labels = label_stream(&[1, 5, 7, 2]);

        match extract_samples(Cursor::new(images), Cursor::new(labels), &options(5)) {
            Err(AnalysisError::TruncatedStream { stream, record, .. }) => {
                assert_eq!((stream, record), ("label", 4));
            }
            other => panic!("expected truncated stream, got {:?}", other),
        }
    }

    #[test]
    fn short_image_stream_is_truncated_even_when_skipping() {
        let mut images = image_stream(&records()[..3]);
        images.extend_from_slice(&[1, 2]);
        let labels = label_stream(&[1, 5, 7, 2]);

        match extract_samples(Cursor::new(images), Cursor::new(labels), &options(4)) {
            Err(AnalysisError::TruncatedStream {
                stream,
                record,
                wanted,
                got,
            }) => assert_eq!((stream, record, wanted, got), ("image", 3, PIXELS, 2)),
            other => panic!("expected truncated stream, got {:?}", other),
        }
    }

    #[test]
    fn short_header_is_truncated() {
        let result = extract_samples(
            Cursor::new(vec![0u8; 10]),
            Cursor::new(label_stream(&[1])),
            &options(1),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::TruncatedStream { stream: "image", .. })
        ));
    }

    #[test]
    fn reads_gzip_files() {
        let dir = tempfile::tempdir().unwrap();
        let gz = |name: &str, bytes: &[u8]| {
            let path = dir.path().join(name);
            let mut enc = GzEncoder::new(Vec::new(), Compression::default());
            enc.write_all(bytes).unwrap();
            fs::write(&path, enc.finish().unwrap()).unwrap();
            path
        };
        let images = gz("images.gz", &image_stream(&records()));
        let labels = gz("labels.gz", &label_stream(&[7, 7, 1, 3]));

        let samples = extract_samples(
            open_gz(&images).unwrap(),
            open_gz(&labels).unwrap(),
            &options(4),
        )
        .unwrap();
        let labels: Vec<bool> = samples.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![false, false, true]);
        assert_eq!(samples[1].features, vec![true, true, true, true]);
    }

    #[test]
    fn missing_gzip_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_gz(&dir.path().join("nope.gz")),
            Err(AnalysisError::Io { .. })
        ));
    }
}
