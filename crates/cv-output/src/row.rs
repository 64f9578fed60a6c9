//! Plain row type written by the recorder.

use cv_playback::RenderedFrame;
use cv_store::Occupancy;

/// Column names, in record order.
pub const HEADER: [&str; 9] = ["step", "time", "features", "occupants", "S", "E", "I", "R", "D"];

/// One rendered step.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    /// Data step actually shown.
    pub step:      usize,
    /// Empty before any data has arrived.
    pub time:      String,
    pub features:  usize,
    /// `None` when no region was selected.
    pub occupancy: Option<Occupancy>,
}

impl FrameRow {
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![self.step.to_string(), self.time.clone(), self.features.to_string()];
        match &self.occupancy {
            Some(o) => record.extend(
                [o.total, o.susceptible, o.exposed, o.infected, o.recovered, o.dead]
                    .iter()
                    .map(usize::to_string),
            ),
            None => record.extend(std::iter::repeat_n(String::new(), 6)),
        }
        record
    }
}

impl From<&RenderedFrame<'_>> for FrameRow {
    fn from(frame: &RenderedFrame<'_>) -> Self {
        Self {
            step:      frame.data_step.index(),
            time:      frame.time.map(|t| t.as_str().to_owned()).unwrap_or_default(),
            features:  frame.features,
            occupancy: frame.occupancy,
        }
    }
}
