pub mod cut;
pub mod detect;
pub mod probe;

pub use cut::{cut_clip, cut_clips, ClipFile};
pub use detect::{check_ffmpeg, detect_silence, SilenceDetectConfig};
pub use probe::{check_ffprobe, get_media_duration};
