/// Export queue
///
/// One export request becomes an ordered list of (bitmap, filename) jobs:
/// a single job when no slicing is active, one per section otherwise. Jobs
/// are handed out strictly one at a time; the caller dispatches each to the
/// platform save dialog and reports back before the next is released. A
/// failed save discards whatever remains.

use image::RgbaImage;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::disk;
use crate::render::sections;
use crate::state::params::EXPORT_SUFFIX;

/// A single pending save
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub bitmap: Arc<RgbaImage>,
    pub filename: String,
}

#[derive(Debug, Default)]
pub struct ExportQueue {
    jobs: VecDeque<ExportJob>,
}

impl ExportQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Build the job list for the current output.
    ///
    /// With slicing active the sections are queued back to front, and the
    /// `_<n>` suffix counts from the queue head: the rightmost strip is
    /// dispatched first as `_0`.
    pub fn populate(&mut self, hires: &Arc<RgbaImage>, section_count: u32, original_name: &str) {
        let base_name = disk::insert_before_extension(original_name, EXPORT_SUFFIX);

        if section_count <= 1 {
            self.jobs.push_back(ExportJob {
                bitmap: hires.clone(),
                filename: base_name,
            });
            return;
        }

        let strips = sections::slice_sections(hires, section_count);
        for (reverse_index, bitmap) in strips.into_iter().rev().enumerate() {
            let suffix = format!("_{}", reverse_index);
            self.jobs.push_back(ExportJob {
                bitmap: Arc::new(bitmap),
                filename: disk::insert_before_extension(&base_name, &suffix),
            });
        }
    }

    /// Release the next job. The caller must finish it (or abort the whole
    /// queue) before asking for another.
    pub fn next_job(&mut self) -> Option<ExportJob> {
        self.jobs.pop_front()
    }

    /// Drop all remaining jobs, e.g. after a failed save
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn column_coded(width: u32, height: u32) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_fn(width, height, |x, _| {
            Rgba([(x % 256) as u8, 0, 0, 255])
        }))
    }

    #[test]
    fn test_single_section_is_one_job() {
        let mut queue = ExportQueue::new();
        queue.populate(&column_coded(100, 50), 1, "pano.jpg");

        assert_eq!(queue.len(), 1);
        let job = queue.next_job().unwrap();
        assert_eq!(job.filename, "pano_edit.jpg");
        assert_eq!(job.bitmap.dimensions(), (100, 50));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sections_queue_back_to_front() {
        let mut queue = ExportQueue::new();
        queue.populate(&column_coded(90, 30), 3, "pano.jpg");

        assert_eq!(queue.len(), 3);

        // first job out is the rightmost strip, named _0
        let first = queue.next_job().unwrap();
        assert_eq!(first.filename, "pano_edit_0.jpg");
        assert_eq!(first.bitmap.get_pixel(0, 0)[0], 60);

        let second = queue.next_job().unwrap();
        assert_eq!(second.filename, "pano_edit_1.jpg");
        assert_eq!(second.bitmap.get_pixel(0, 0)[0], 30);

        let third = queue.next_job().unwrap();
        assert_eq!(third.filename, "pano_edit_2.jpg");
        assert_eq!(third.bitmap.get_pixel(0, 0)[0], 0);

        assert!(queue.next_job().is_none());
    }

    #[test]
    fn test_strip_dimensions() {
        let mut queue = ExportQueue::new();
        queue.populate(&column_coded(90, 30), 3, "pano.jpg");
        while let Some(job) = queue.next_job() {
            assert_eq!(job.bitmap.dimensions(), (30, 30));
        }
    }

    #[test]
    fn test_clear_discards_remaining_jobs() {
        let mut queue = ExportQueue::new();
        queue.populate(&column_coded(90, 30), 3, "pano.jpg");
        queue.next_job();
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fallback_name_gets_the_suffix_too() {
        let mut queue = ExportQueue::new();
        queue.populate(&column_coded(10, 10), 1, "image.JPG");
        assert_eq!(queue.next_job().unwrap().filename, "image_edit.JPG");
    }
}
