//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use super::test_data::{test_bot_token, test_chat_id};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    /// Only match requests whose JSON body contains these fields
    pub expected_body: Option<Value>,
    /// Exact number of matching calls, verified when the server drops
    pub expected_calls: Option<u64>,
    /// Stop answering after this many calls so a later mock takes over
    pub max_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            expected_body: None,
            expected_calls: None,
            max_calls: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing() -> Self {
        Self {
            success: false,
            ..Self::default()
        }
    }

    /// Answer only the first matching call
    pub fn first_call_only(mut self) -> Self {
        self.max_calls = Some(1);
        self
    }

    /// Only match `getUpdates` calls asking for `offset`
    pub fn at_offset(offset: i64) -> Self {
        Self {
            expected_body: Some(json!({ "offset": offset })),
            ..Self::default()
        }
    }

    /// Expect exactly one call to `chat_id`
    pub fn once_to(chat_id: i64) -> Self {
        Self {
            expected_body: Some(json!({ "chat_id": chat_id })),
            expected_calls: Some(1),
            ..Self::default()
        }
    }
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure as the bot's API URL
    pub fn api_url(&self) -> String {
        self.server.uri()
    }

    /// A teloxide bot pointed at this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.api_url()).expect("mock server URI is a valid URL");
        Bot::new(test_bot_token()).set_api_url(url)
    }

    /// Telegram method names are case-insensitive; teloxide and the docs disagree on case
    fn method_path(method_name: &str) -> String {
        format!("(?i)^/bot{}/{}$", test_bot_token(), method_name)
    }

    async fn mount(&self, method_name: &str, config: MockResponseConfig, ok_body: Value, error_body: Value, error_status: u16) {
        let (status, body) = if config.success {
            (200, json!({ "ok": true, "result": ok_body }))
        } else {
            (error_status, error_body)
        };

        let mut response = ResponseTemplate::new(status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method("POST")).and(path_regex(Self::method_path(method_name)));
        if let Some(expected_body) = config.expected_body {
            mock = mock.and(body_partial_json(expected_body));
        }
        let mut mock = mock.respond_with(response);
        if let Some(times) = config.expected_calls {
            mock = mock.expect(times);
        }
        if let Some(times) = config.max_calls {
            mock = mock.up_to_n_times(times);
        }

        mock.mount(&self.server).await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        self.mount(
            "sendMessage",
            config,
            sent_message_json(json!({ "text": "Test message" })),
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            }),
            400,
        )
        .await;
    }

    /// Setup mock for sendPhoto endpoint
    pub async fn mock_send_photo(&self, config: MockResponseConfig) {
        self.mount(
            "sendPhoto",
            config,
            sent_message_json(json!({
                "photo": [{
                    "file_id": "AgACAgIAAxkBAAIB",
                    "file_unique_id": "AQADAgAD",
                    "file_size": 3,
                    "width": 1,
                    "height": 1
                }]
            })),
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: IMAGE_PROCESS_FAILED"
            }),
            400,
        )
        .await;
    }

    /// Setup mock for getMe endpoint
    pub async fn mock_get_me(&self, config: MockResponseConfig) {
        self.mount(
            "getMe",
            config,
            json!({
                "id": 12345,
                "is_bot": true,
                "first_name": "TestBot",
                "username": "test_bot",
                "can_join_groups": true,
                "can_read_all_group_messages": false,
                "supports_inline_queries": false,
                "can_connect_to_business": false,
                "has_main_web_app": false
            }),
            json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            }),
            401,
        )
        .await;
    }

    /// Setup mock for getUpdates endpoint answering with `updates`
    pub async fn mock_get_updates(&self, config: MockResponseConfig, updates: Value) {
        self.mount(
            "getUpdates",
            config,
            updates,
            json!({
                "ok": false,
                "error_code": 409,
                "description": "Conflict: terminated by other getUpdates request; make sure that only one bot instance is running"
            }),
            409,
        )
        .await;
    }

    /// Number of received requests whose path mentions `endpoint`
    pub async fn calls_to(&self, endpoint: &str) -> usize {
        self.request_bodies(endpoint).await.len()
    }

    /// Raw bodies of the received requests to `endpoint`, oldest first
    pub async fn request_bodies(&self, endpoint: &str) -> Vec<Vec<u8>> {
        let endpoint = endpoint.to_ascii_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().to_ascii_lowercase().ends_with(&endpoint))
            .map(|req| req.body)
            .collect()
    }

    /// `offset` of every `getUpdates` call received so far
    pub async fn polled_offsets(&self) -> Vec<i64> {
        self.request_bodies("getUpdates")
            .await
            .iter()
            .filter_map(|body| serde_json::from_slice::<Value>(body).ok())
            .filter_map(|body| body.get("offset").and_then(Value::as_i64))
            .collect()
    }
}

/// A `message` update carrying `text` from `user_id` in their private chat
pub fn message_update(update_id: i64, user_id: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": incoming_message_json(update_id, user_id, text)
    })
}

/// An `edited_message` update, which the polling reader does not forward
pub fn edited_message_update(update_id: i64, user_id: i64, text: &str) -> Value {
    let mut message = incoming_message_json(update_id, user_id, text);
    message["edit_date"] = json!(1640995300);
    json!({
        "update_id": update_id,
        "edited_message": message
    })
}

fn incoming_message_json(message_id: i64, user_id: i64, text: &str) -> Value {
    json!({
        "message_id": message_id,
        "date": 1640995200,
        "chat": { "id": user_id, "type": "private", "first_name": "Test" },
        "from": { "id": user_id, "is_bot": false, "first_name": "Test", "username": "test_user" },
        "text": text
    })
}

/// A message as returned by the send* endpoints, merged with `content`
fn sent_message_json(content: Value) -> Value {
    let mut message = json!({
        "message_id": 123,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        },
        "chat": {
            "id": test_chat_id(),
            "type": "private",
            "first_name": "Test"
        },
        "date": 1640995200
    });

    if let (Some(message), Some(content)) = (message.as_object_mut(), content.as_object()) {
        for (key, value) in content {
            message.insert(key.clone(), value.clone());
        }
    }
    message
}
