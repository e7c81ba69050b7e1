use serde_derive::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::track::{Objects, TrackId};

/// A detection box to be drawn with a track id on it
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub id: TrackId,
    pub detection: Detection,
}

/// Pairs every object with every box whose interior holds its centroid.
/// Objects come in ascending id order, boxes in input order. Nothing stops a
/// box from getting two labels or an object from labelling two boxes.
pub fn label_detections(objects: &Objects, detections: &[Detection]) -> Vec<Label> {
    objects
        .iter()
        .flat_map(|(&id, centroid)| {
            detections
                .iter()
                .filter(move |det| det.contains(centroid))
                .map(move |&detection| Label { id, detection })
        })
        .collect()
}
