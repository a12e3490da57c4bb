//! Messaging envelope as delivered by the webhook
//!
//! Every sub-payload is optional. Which one carries the meaning of the event is decided by the
//! classifier, see [`crate::kind::EventKind`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messaging {
    pub sender: Sender,
    pub recipient: Recipient,
    /// Seconds since Unix epoch
    pub timestamp: i64,
    #[serde(default)]
    pub postback: Option<Postback>,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub reaction: Option<Reaction>,
    #[serde(default)]
    pub read: Option<Read>,
    /// Referral of a conversation which was opened from a link or an ad
    ///
    /// Not to be confused with [`Message::referral`].
    #[serde(default)]
    pub referral: Option<ReferralLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Postback {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub quick_reply: Option<QuickReply>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub reply_to: Option<ReplyTo>,
    #[serde(default)]
    pub referral: Option<ReferralLink>,
    /// Message was sent by the page itself
    #[serde(default)]
    pub is_echo: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_unsupported: bool,
}

impl Message {
    /// Only the first attachment is taken into account by the extractors.
    pub fn first_attachment(&self) -> Option<&Attachment> {
        self.attachments.first()
    }

    pub fn first_attachment_url(&self) -> Option<&str> {
        self.first_attachment()
            .map(|attachment| attachment.payload.url.as_str())
    }

    pub fn reply_to_story(&self) -> Option<&ReplyToStory> {
        self.reply_to.as_ref().and_then(|reply_to| reply_to.story.as_ref())
    }

    pub fn reply_to_mid(&self) -> Option<&str> {
        self.reply_to.as_ref().map(|reply_to| reply_to.mid.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Platform attachment type, e.g. `image`, `story_mention` or `share`
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: AttachmentPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPayload {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTo {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub story: Option<ReplyToStory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyToStory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralLink {
    #[serde(default, rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub action: ReactionAction,
    /// Reaction name, e.g. `love`
    #[serde(default)]
    pub reaction: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionAction {
    React,
    Unreact,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    /// Id of the last message seen by the sender
    #[serde(default)]
    pub mid: String,
}
