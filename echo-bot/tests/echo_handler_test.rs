//! Integration tests for [`echo_bot::EchoHandler`].
//!
//! Covers: echo reply plus usage hint, member listing paginated in batches of ten,
//! channel listing, team details formatting, mention stripping before command matching,
//! team-scoped command failure outside a team, and fail-fast delivery when a send is
//! rejected mid-listing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use activity_router::ActivityHandler;
use async_trait::async_trait;
use ebot_core::{
    Activity, ActivityKind, Bot, ChannelAccount, ChannelInfo, Directory, EbotError, Entity,
    HandlerError, Member, TeamDetails,
};
use echo_bot::EchoHandler;

fn message_activity(text: &str) -> Activity {
    Activity {
        id: Some("test_activity_id".to_string()),
        kind: ActivityKind::Message,
        text: Some(text.to_string()),
        ..Default::default()
    }
}

fn team_activity(text: &str) -> Activity {
    Activity {
        channel_data: Some(serde_json::json!({ "team": { "id": "19:team@thread" } })),
        ..message_activity(text)
    }
}

fn member(i: usize) -> Member {
    Member {
        id: format!("29:user-{}", i),
        name: Some(format!("User {}", i)),
        aad_object_id: Some(format!("aad-{}", i)),
        user_principal_name: Some(format!("user{}@example.com", i)),
        email: None,
    }
}

fn create_handler(
    directory: StubDirectory,
    sent: Arc<Mutex<Vec<String>>>,
) -> EchoHandler {
    EchoHandler::new(
        Arc::new(RecordingBot::new(sent)),
        Arc::new(directory),
    )
}

/// **Test: Unknown text gets the echo reply and the usage hint.**
///
/// **Setup:** Handler with an empty directory.
/// **Action:** `handle(&message("hello there"))`.
/// **Expected:** Two sends: "Echo: hello there" and the usage hint.
#[tokio::test]
async fn test_echo_and_usage_hint_for_unknown_text() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let handler = create_handler(StubDirectory::default(), sent.clone());

    handler.handle(&message_activity("hello there")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], "Echo: hello there");
    assert!(sent[1].starts_with("You can send me \"show members\""));
}

/// **Test: "show members" paginates 23 members as batches of 10, 10, 3.**
///
/// **Setup:** Directory with 23 members.
/// **Action:** `handle(&message("show members"))`.
/// **Expected:** Echo, total line, then three batch messages joined with `<br>`, in
/// roster order.
#[tokio::test]
async fn test_show_members_paginates_in_batches_of_ten() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let directory = StubDirectory {
        members: (0..23).map(member).collect(),
        ..Default::default()
    };
    let handler = create_handler(directory, sent.clone());

    handler.handle(&message_activity("show members")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 5);
    assert_eq!(sent[1], "Total of 23 members are currently in team");
    assert_eq!(sent[2].split("<br>").count(), 10);
    assert_eq!(sent[3].split("<br>").count(), 10);
    assert_eq!(sent[4].split("<br>").count(), 3);
    assert!(sent[2].starts_with("aad-0 --> User 0 --> user0@example.com<br>"));
    assert!(sent[4].ends_with("aad-22 --> User 22 --> user22@example.com"));
}

/// **Test: Member lines are formatted as "aad --> name --> principal name".**
///
/// **Setup:** Directory with one member.
/// **Action:** `handle(&message("show members"))`.
/// **Expected:** The single batch message is exactly the formatted line.
#[tokio::test]
async fn test_show_members_line_format() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let directory = StubDirectory {
        members: vec![member(7)],
        ..Default::default()
    };
    let handler = create_handler(directory, sent.clone());

    handler.handle(&message_activity("show members")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent[2], "aad-7 --> User 7 --> user7@example.com");
}

/// **Test: "show channels" lists the team's channels with a total line.**
///
/// **Setup:** Team activity; directory with two channels, one unnamed.
/// **Action:** `handle(&team_activity("show channels"))`.
/// **Expected:** Total line, then one batch with both channel lines.
#[tokio::test]
async fn test_show_channels_lists_team_channels() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let directory = StubDirectory {
        channels: vec![
            ChannelInfo {
                id: "19:general".to_string(),
                name: Some("General".to_string()),
            },
            ChannelInfo {
                id: "19:dev".to_string(),
                name: None,
            },
        ],
        ..Default::default()
    };
    let handler = create_handler(directory, sent.clone());

    handler.handle(&team_activity("show channels")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1], "Total of 2 channels are currently in team");
    assert_eq!(sent[2], "19:general --> General<br>19:dev --> ");
}

/// **Test: "show details" formats the team metadata.**
///
/// **Setup:** Team activity; directory with team details.
/// **Action:** `handle(&team_activity("show details"))`.
/// **Expected:** One reply with the name, id, and AAD group id in bold tags.
#[tokio::test]
async fn test_show_details_formats_team_metadata() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let directory = StubDirectory {
        details: Some(TeamDetails {
            id: "19:team@thread".to_string(),
            name: Some("Contoso".to_string()),
            aad_group_id: Some("aad-group-1".to_string()),
        }),
        ..Default::default()
    };
    let handler = create_handler(directory, sent.clone());

    handler.handle(&team_activity("show details")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(
        sent[1],
        "The team name is <b>Contoso</b>. The team ID is <b>19:team@thread</b>. \
         The AADGroupID is <b>aad-group-1</b>."
    );
}

/// **Test: The recipient mention is stripped before command matching; the echo keeps it.**
///
/// **Setup:** Team activity "<at>EchoBot</at> show details" with a mention entity for
/// the recipient.
/// **Action:** `handle(&activity)`.
/// **Expected:** Echo contains the raw text; the details reply follows.
#[tokio::test]
async fn test_mention_is_stripped_before_command_match() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let directory = StubDirectory {
        details: Some(TeamDetails {
            id: "19:team@thread".to_string(),
            name: Some("Contoso".to_string()),
            aad_group_id: None,
        }),
        ..Default::default()
    };
    let handler = create_handler(directory, sent.clone());

    let mut activity = team_activity("<at>EchoBot</at> show details");
    activity.recipient = Some(ChannelAccount {
        id: "28:bot".to_string(),
        name: Some("EchoBot".to_string()),
    });
    activity.entities = vec![Entity {
        kind: "mention".to_string(),
        text: Some("<at>EchoBot</at>".to_string()),
        mentioned: Some(ChannelAccount {
            id: "28:bot".to_string(),
            name: Some("EchoBot".to_string()),
        }),
    }];

    handler.handle(&activity).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent[0], "Echo: <at>EchoBot</at> show details");
    assert!(sent[1].starts_with("The team name is <b>Contoso</b>."));
}

/// **Test: A team-scoped command outside a team fails after the echo.**
///
/// **Setup:** Plain message activity without team channel data.
/// **Action:** `handle(&message("show channels"))`.
/// **Expected:** Err(NotInTeam); only the echo was sent.
#[tokio::test]
async fn test_show_channels_outside_team_fails() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let handler = create_handler(StubDirectory::default(), sent.clone());

    let result = handler.handle(&message_activity("show channels")).await;

    assert!(matches!(
        result,
        Err(EbotError::Handler(HandlerError::NotInTeam))
    ));
    assert_eq!(*sent.lock().unwrap(), vec!["Echo: show channels".to_string()]);
}

/// **Test: A rejected send stops the member listing immediately.**
///
/// **Setup:** 23 members; bot rejects the fourth send (the second batch).
/// **Action:** `handle(&message("show members"))`.
/// **Expected:** Err; three messages delivered, four attempted, none after the failure.
#[tokio::test]
async fn test_failed_send_stops_pagination() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let bot = Arc::new(RecordingBot::failing_on(sent.clone(), 4));
    let attempts = bot.attempts();
    let directory = StubDirectory {
        members: (0..23).map(member).collect(),
        ..Default::default()
    };
    let handler = EchoHandler::new(bot, Arc::new(directory));

    let result = handler.handle(&message_activity("show members")).await;

    assert!(matches!(result, Err(EbotError::Connector(_))));
    assert_eq!(sent.lock().unwrap().len(), 3);
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

// --- Doubles used by tests ---

struct RecordingBot {
    sent: Arc<Mutex<Vec<String>>>,
    fail_on_call: Option<usize>,
    calls: Arc<AtomicUsize>,
}

impl RecordingBot {
    fn new(sent: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            sent,
            fail_on_call: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing_on(sent: Arc<Mutex<Vec<String>>>, call: usize) -> Self {
        Self {
            sent,
            fail_on_call: Some(call),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn attempts(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn reply_to(&self, _activity: &Activity, text: &str) -> ebot_core::Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(EbotError::Connector("send rejected".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn send_to_conversation(
        &self,
        activity: &Activity,
        text: &str,
    ) -> ebot_core::Result<()> {
        self.reply_to(activity, text).await
    }
}

#[derive(Default)]
struct StubDirectory {
    members: Vec<Member>,
    channels: Vec<ChannelInfo>,
    details: Option<TeamDetails>,
}

#[async_trait]
impl Directory for StubDirectory {
    async fn conversation_members(
        &self,
        _activity: &Activity,
    ) -> ebot_core::Result<Vec<Member>> {
        Ok(self.members.clone())
    }

    async fn team_channels(&self, activity: &Activity) -> ebot_core::Result<Vec<ChannelInfo>> {
        activity.team_id().ok_or(HandlerError::NotInTeam)?;
        Ok(self.channels.clone())
    }

    async fn team_details(&self, activity: &Activity) -> ebot_core::Result<TeamDetails> {
        activity.team_id().ok_or(HandlerError::NotInTeam)?;
        Ok(self.details.clone().expect("test directory has no details"))
    }
}
