//! Contiguous, non-overlapping phase intervals over scroll progress.
//!
//! A timeline holds the shared interval shape; each entity shifts it by its
//! own timing offset at sample time. Sampling is a pure function of progress,
//! so scrolling backwards walks the exact reverse phase sequence.

/// Where a progress value lands on a shifted timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cursor {
    /// Before the first interval: the hidden pose, progress 0.
    Before,
    /// Inside interval `segment`, with intra-phase progress `t` in [0,1].
    Within { segment: usize, t: f32 },
    /// Past the last interval: the terminal pose holds at progress 1.
    After,
}

#[derive(Clone, Debug)]
pub struct Timeline {
    start: f32,
    // Cumulative interval end positions, strictly increasing.
    ends: Vec<f32>,
}

impl Timeline {
    pub fn new(start: f32, durations: &[f32]) -> Self {
        debug_assert!(durations.iter().all(|d| *d > 0.0));
        let mut acc = start;
        let ends = durations
            .iter()
            .map(|d| {
                acc += d;
                acc
            })
            .collect();
        Self { start, ends }
    }

    pub fn segments(&self) -> usize {
        self.ends.len()
    }

    /// Progress at which the timeline ends for an entity shifted by `offset`.
    pub fn end(&self, offset: f32) -> f32 {
        self.ends.last().copied().unwrap_or(self.start) + offset
    }

    /// Progress at which the timeline begins for an entity shifted by `offset`.
    pub fn begin(&self, offset: f32) -> f32 {
        self.start + offset
    }

    /// Locate `progress` for an entity whose intervals are shifted by `offset`.
    pub fn sample(&self, progress: f32, offset: f32) -> Cursor {
        let local = progress - offset;
        if local < self.start {
            return Cursor::Before;
        }
        // The final boundary absorbs rounding error: an entity whose shifted
        // end lands exactly on full scroll must still reach its terminal
        // phase.
        match self.ends.last() {
            Some(last) if local >= *last - 1e-6 => return Cursor::After,
            None => return Cursor::After,
            _ => {}
        }
        let mut seg_start = self.start;
        for (segment, end) in self.ends.iter().enumerate() {
            if local < *end {
                let t = ((local - seg_start) / (end - seg_start)).clamp(0.0, 1.0);
                return Cursor::Within { segment, t };
            }
            seg_start = *end;
        }
        Cursor::After
    }
}
