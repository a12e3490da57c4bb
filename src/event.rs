//! Flattened event records extracted from a [`Messaging`] envelope
//!
//! Each extractor must only be called for the matching [`EventKind`]. Calling a wrong one never
//! panics; it results in a record with empty fields.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::kind::{EventKind, MediaKind};
use crate::model::{
    AttachmentPayload, Message, Messaging, Postback, QuickReply, Reaction, Recipient,
    ReferralLink, ReplyToStory, Sender,
};
use crate::util::utc_timestamp_sec;

/// Fields common to all event records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub sender: Sender,
    pub recipient: Recipient,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostbackEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub data: Option<Postback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReplyEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub mid: String,
    pub text: String,
    pub data: Option<QuickReply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryMentionEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub mid: String,
    /// Story built from the url of the first attachment; its `id` is not known
    pub story: Option<ReplyToStory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryReplyEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub mid: String,
    pub text: String,
    pub story: Option<ReplyToStory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub referral: Option<ReferralLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMessageEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub mid: String,
    pub text: String,
    pub referral: Option<ReferralLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaMessageEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub mid: String,
    /// Echoed from the caller, the envelope does not encode it
    pub media_kind: MediaKind,
    /// Payload of the first attachment
    pub media: Option<AttachmentPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReplyEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub mid: String,
    pub text: String,
    pub reply_to_mid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub reaction: Option<Reaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeenEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub seen_mid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub shared_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteEvent {
    #[serde(flatten)]
    pub origin: Origin,
    pub deleted_mid: String,
}

/// Any of the extracted event records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Postback(PostbackEvent),
    QuickReply(QuickReplyEvent),
    StoryMention(StoryMentionEvent),
    StoryReply(StoryReplyEvent),
    Referral(ReferralEvent),
    TextMessage(TextMessageEvent),
    MediaMessage(MediaMessageEvent),
    MessageReply(MessageReplyEvent),
    Reaction(ReactionEvent),
    Seen(SeenEvent),
    Share(ShareEvent),
    Delete(DeleteEvent),
}

impl Event {
    pub fn origin(&self) -> &Origin {
        match self {
            Event::Postback(event) => &event.origin,
            Event::QuickReply(event) => &event.origin,
            Event::StoryMention(event) => &event.origin,
            Event::StoryReply(event) => &event.origin,
            Event::Referral(event) => &event.origin,
            Event::TextMessage(event) => &event.origin,
            Event::MediaMessage(event) => &event.origin,
            Event::MessageReply(event) => &event.origin,
            Event::Reaction(event) => &event.origin,
            Event::Seen(event) => &event.origin,
            Event::Share(event) => &event.origin,
            Event::Delete(event) => &event.origin,
        }
    }

    /// The kind this record was extracted for
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Postback(_) => EventKind::Postback,
            Event::QuickReply(_) => EventKind::QuickReply,
            Event::StoryMention(_) => EventKind::StoryMention,
            Event::StoryReply(_) => EventKind::StoryReply,
            Event::Referral(_) => EventKind::Referral,
            Event::TextMessage(_) => EventKind::TextMessage,
            Event::MediaMessage(event) => event.media_kind.into(),
            Event::MessageReply(_) => EventKind::MessageReply,
            Event::Reaction(_) => EventKind::Reaction,
            Event::Seen(_) => EventKind::MessageSeen,
            Event::Share(_) => EventKind::Share,
            Event::Delete(_) => EventKind::Deleted,
        }
    }
}

impl Messaging {
    /// Extracts the record selected by `kind`
    pub fn extract(&self, kind: EventKind) -> Event {
        match kind {
            EventKind::Postback => Event::Postback(self.postback_event()),
            EventKind::QuickReply => Event::QuickReply(self.quick_reply_event()),
            EventKind::StoryMention => Event::StoryMention(self.story_mention_event()),
            EventKind::StoryReply => Event::StoryReply(self.story_reply_event()),
            EventKind::Referral => Event::Referral(self.referral_event()),
            EventKind::TextMessage => Event::TextMessage(self.text_message_event()),
            EventKind::ImageMessage => {
                Event::MediaMessage(self.media_message_event(MediaKind::Image))
            }
            EventKind::AudioMessage => {
                Event::MediaMessage(self.media_message_event(MediaKind::Audio))
            }
            EventKind::VideoMessage => {
                Event::MediaMessage(self.media_message_event(MediaKind::Video))
            }
            EventKind::FileMessage => {
                Event::MediaMessage(self.media_message_event(MediaKind::File))
            }
            EventKind::MessageReply => Event::MessageReply(self.message_reply_event()),
            EventKind::Reaction => Event::Reaction(self.reaction_event()),
            EventKind::MessageSeen => Event::Seen(self.seen_event()),
            EventKind::Share => Event::Share(self.share_event()),
            EventKind::Deleted => Event::Delete(self.delete_event()),
        }
    }

    pub fn origin(&self) -> Origin {
        Origin {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            timestamp: utc_timestamp_sec(self.timestamp),
        }
    }

    /// Applies `f` to the message, or returns the default value if there is no message
    fn message_field<T: Default>(&self, f: impl FnOnce(&Message) -> T) -> T {
        self.message.as_ref().map(f).unwrap_or_default()
    }

    pub fn postback_event(&self) -> PostbackEvent {
        PostbackEvent {
            origin: self.origin(),
            data: self.postback.clone(),
        }
    }

    pub fn quick_reply_event(&self) -> QuickReplyEvent {
        QuickReplyEvent {
            origin: self.origin(),
            mid: self.message_field(|m| m.mid.clone()),
            text: self.message_field(|m| m.text.clone()),
            data: self.message_field(|m| m.quick_reply.clone()),
        }
    }

    pub fn story_mention_event(&self) -> StoryMentionEvent {
        StoryMentionEvent {
            origin: self.origin(),
            mid: self.message_field(|m| m.mid.clone()),
            story: self.message_field(|m| {
                m.first_attachment_url().map(|url| ReplyToStory {
                    id: String::new(),
                    url: url.to_owned(),
                })
            }),
        }
    }

    pub fn story_reply_event(&self) -> StoryReplyEvent {
        StoryReplyEvent {
            origin: self.origin(),
            mid: self.message_field(|m| m.mid.clone()),
            text: self.message_field(|m| m.text.clone()),
            story: self.message_field(|m| m.reply_to_story().cloned()),
        }
    }

    pub fn referral_event(&self) -> ReferralEvent {
        ReferralEvent {
            origin: self.origin(),
            referral: self.referral.clone(),
        }
    }

    pub fn text_message_event(&self) -> TextMessageEvent {
        TextMessageEvent {
            origin: self.origin(),
            mid: self.message_field(|m| m.mid.clone()),
            text: self.message_field(|m| m.text.clone()),
            referral: self.message_field(|m| m.referral.clone()),
        }
    }

    /// Media (image, audio, video, file) message
    ///
    /// The concrete `media_kind` is not part of the envelope and must be supplied by the caller.
    pub fn media_message_event(&self, media_kind: MediaKind) -> MediaMessageEvent {
        MediaMessageEvent {
            origin: self.origin(),
            mid: self.message_field(|m| m.mid.clone()),
            media_kind,
            media: self.message_field(|m| {
                m.first_attachment()
                    .map(|attachment| attachment.payload.clone())
            }),
        }
    }

    pub fn message_reply_event(&self) -> MessageReplyEvent {
        MessageReplyEvent {
            origin: self.origin(),
            mid: self.message_field(|m| m.mid.clone()),
            text: self.message_field(|m| m.text.clone()),
            reply_to_mid: self.message_field(|m| m.reply_to_mid().unwrap_or_default().to_owned()),
        }
    }

    pub fn reaction_event(&self) -> ReactionEvent {
        ReactionEvent {
            origin: self.origin(),
            reaction: self.reaction.clone(),
        }
    }

    pub fn seen_event(&self) -> SeenEvent {
        SeenEvent {
            origin: self.origin(),
            seen_mid: self
                .read
                .as_ref()
                .map(|read| read.mid.clone())
                .unwrap_or_default(),
        }
    }

    pub fn share_event(&self) -> ShareEvent {
        ShareEvent {
            origin: self.origin(),
            shared_url: self.message_field(|m| {
                m.first_attachment_url().unwrap_or_default().to_owned()
            }),
        }
    }

    pub fn delete_event(&self) -> DeleteEvent {
        DeleteEvent {
            origin: self.origin(),
            deleted_mid: self.message_field(|m| m.mid.clone()),
        }
    }
}

/// Free function forms of the extractors
pub mod extract {
    use super::*;

    pub fn postback(messaging: &Messaging) -> PostbackEvent {
        messaging.postback_event()
    }

    pub fn quick_reply(messaging: &Messaging) -> QuickReplyEvent {
        messaging.quick_reply_event()
    }

    pub fn story_mention(messaging: &Messaging) -> StoryMentionEvent {
        messaging.story_mention_event()
    }

    pub fn story_reply(messaging: &Messaging) -> StoryReplyEvent {
        messaging.story_reply_event()
    }

    pub fn referral(messaging: &Messaging) -> ReferralEvent {
        messaging.referral_event()
    }

    pub fn text_message(messaging: &Messaging) -> TextMessageEvent {
        messaging.text_message_event()
    }

    pub fn media_message(messaging: &Messaging, media_kind: MediaKind) -> MediaMessageEvent {
        messaging.media_message_event(media_kind)
    }

    pub fn message_reply(messaging: &Messaging) -> MessageReplyEvent {
        messaging.message_reply_event()
    }

    pub fn reaction(messaging: &Messaging) -> ReactionEvent {
        messaging.reaction_event()
    }

    pub fn seen(messaging: &Messaging) -> SeenEvent {
        messaging.seen_event()
    }

    pub fn share(messaging: &Messaging) -> ShareEvent {
        messaging.share_event()
    }

    pub fn delete(messaging: &Messaging) -> DeleteEvent {
        messaging.delete_event()
    }
}
