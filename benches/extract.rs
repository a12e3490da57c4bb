use criterion::{Criterion, criterion_group, criterion_main};
use instabot::EventKind;
use instabot::model::{Attachment, AttachmentPayload, Message, Messaging, Read, ReplyTo, Sender};
use strum::IntoEnumIterator;

fn envelope() -> Messaging {
    Messaging {
        sender: Sender {
            id: "1234567890".to_string(),
        },
        timestamp: 1700000000,
        message: Some(Message {
            mid: "aWdfZAG1faXRlbToxOklHTWVzc2FnZAUlEOjE3ODQxNDA".to_string(),
            text: "Hello, world!".to_string(),
            attachments: (0..8)
                .map(|idx| Attachment {
                    kind: "image".to_string(),
                    payload: AttachmentPayload {
                        url: format!("https://lookaside.fbsbx.com/ig_messaging_cdn/{idx}.jpg"),
                        title: None,
                    },
                })
                .collect(),
            reply_to: Some(ReplyTo {
                mid: "m0".to_string(),
                story: None,
            }),
            ..Default::default()
        }),
        read: Some(Read {
            mid: "m9".to_string(),
        }),
        ..Default::default()
    }
}

pub fn bench_extract(c: &mut Criterion) {
    let messaging = envelope();
    c.bench_function("extract_all_kinds", |b| {
        b.iter(|| {
            EventKind::iter()
                .map(|kind| messaging.extract(kind))
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
