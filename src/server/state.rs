use crate::location::{LocationSource, RecordingPlatform};

pub struct AppState {
    pub source: LocationSource<RecordingPlatform>,
}
