/*!
    Frame numbering and PPM output.
*/

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use image::RgbImage;

/**
    Counts decoded frames and decides which of them are exported.

    Numbering starts at 1. Frames past the limit are still counted so the
    final tally reflects the whole stream.
*/
#[derive(Clone, Debug)]
pub struct FrameCounter {
    limit: u64,
    processed: u64,
}

impl FrameCounter {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            processed: 0,
        }
    }

    /**
        Count one decoded frame. Returns its 1-based number if it should be
        exported, `None` once the limit is exceeded.
    */
    pub fn advance(&mut self) -> Option<u64> {
        self.processed += 1;
        (self.processed <= self.limit).then_some(self.processed)
    }

    /// Decoded frames counted so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }
}

/**
    Write `image` as a binary PPM (P6): a `P6\n{w} {h}\n255\n` header followed
    by the rows top to bottom, three bytes per pixel.
*/
pub fn write_ppm<W: Write>(mut writer: W, image: &RgbImage) -> io::Result<()> {
    let (width, height) = image.dimensions();
    write!(writer, "P6\n{width} {height}\n255\n")?;
    writer.write_all(image.as_raw())?;
    writer.flush()
}

/**
    Writes numbered frames as `frame{n}.ppm` into one directory.

    Existing files of the same name are replaced.
*/
#[derive(Clone, Debug)]
pub struct PpmExporter {
    dir: PathBuf,
}

impl PpmExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, number: u64) -> PathBuf {
        self.dir.join(format!("frame{number}.ppm"))
    }

    /**
        Write frame `number`, returning the path it was written to.
    */
    pub fn export(&self, number: u64, image: &RgbImage) -> io::Result<PathBuf> {
        let path = self.path_for(number);
        let file = File::create(&path)?;
        write_ppm(BufWriter::new(file), image)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, (x + y) as u8]))
    }

    #[test]
    fn counter_numbers_from_one_up_to_limit() {
        let mut counter = FrameCounter::new(3);
        let numbers: Vec<_> = (0..5).map(|_| counter.advance()).collect();

        assert_eq!(numbers, vec![Some(1), Some(2), Some(3), None, None]);
        assert_eq!(counter.processed(), 5);
    }

    #[test]
    fn zero_limit_exports_nothing() {
        let mut counter = FrameCounter::new(0);
        assert_eq!(counter.advance(), None);
        assert_eq!(counter.processed(), 1);
    }

    #[test]
    fn ppm_header_and_rows() {
        let image = gradient(2, 2);
        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();

        let header = b"P6\n2 2\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(
            &out[header.len()..],
            &[0, 0, 0, 1, 0, 1, 0, 1, 1, 1, 1, 2]
        );
    }

    #[test]
    fn ppm_size_is_header_plus_pixels() {
        let mut out = Vec::new();
        write_ppm(&mut out, &gradient(64, 48)).unwrap();
        assert_eq!(out.len(), 3 + 6 + 4 + 64 * 48 * 3);
    }

    #[test]
    fn exporter_names_files_by_number() {
        let exporter = PpmExporter::new("out");
        assert_eq!(exporter.path_for(1), Path::new("out").join("frame1.ppm"));
        assert_eq!(exporter.path_for(12), Path::new("out").join("frame12.ppm"));
    }

    #[test]
    fn export_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PpmExporter::new(dir.path());

        std::fs::write(exporter.path_for(1), b"stale contents that are much longer").unwrap();
        let path = exporter.export(1, &gradient(3, 1)).unwrap();

        assert_eq!(path, dir.path().join("frame1.ppm"));
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, b"P6\n3 1\n255\n\x00\x00\x00\x01\x00\x01\x02\x00\x02");
    }

    #[test]
    fn export_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PpmExporter::new(dir.path().join("absent"));
        assert!(exporter.export(1, &gradient(1, 1)).is_err());
    }

    #[test]
    fn written_file_reads_back_as_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = gradient(5, 4);
        let path = PpmExporter::new(dir.path()).export(2, &image).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded, image);
    }
}
