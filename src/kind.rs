use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, VariantNames};

/// Kind of a webhook event as determined by the classifier
///
/// The envelope alone does not tell which of its payloads is meaningful, so the kind always comes
/// from the outside.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    VariantNames,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Postback,
    QuickReply,
    StoryMention,
    StoryReply,
    Referral,
    TextMessage,
    ImageMessage,
    AudioMessage,
    VideoMessage,
    FileMessage,
    MessageReply,
    Reaction,
    MessageSeen,
    Share,
    Deleted,
}

impl EventKind {
    /// Media kind for the four media message kinds
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            Self::ImageMessage => Some(MediaKind::Image),
            Self::AudioMessage => Some(MediaKind::Audio),
            Self::VideoMessage => Some(MediaKind::Video),
            Self::FileMessage => Some(MediaKind::File),
            _ => None,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Default,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    VariantNames,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Audio,
    Video,
    File,
}

impl From<MediaKind> for EventKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => Self::ImageMessage,
            MediaKind::Audio => Self::AudioMessage,
            MediaKind::Video => Self::VideoMessage,
            MediaKind::File => Self::FileMessage,
        }
    }
}
