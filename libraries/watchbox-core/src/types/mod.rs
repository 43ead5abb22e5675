mod command;
mod ids;
mod message;
mod playlist;
mod queue_item;
mod session;
mod user;
mod video;

pub use command::{
    BoxScope, Command, PlaylistSubmissionRequest, QueueItemActionRequest, VideoSubmissionRequest,
};
pub use ids::{BoxId, PlaylistId, QueueItemId, UserId, VideoId};
pub use message::{FeedbackMessage, MessageSource};
pub use playlist::UserPlaylist;
pub use queue_item::{ItemState, QueueItem};
pub use session::{BoxSession, CreateBox, PlayOptions};
pub use user::User;
pub use video::{CreateVideo, Video};
