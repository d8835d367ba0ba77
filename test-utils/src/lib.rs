//! `test-utils` is used for testing in both `pubg-lookup-lib` and `pubg-lookup-bin`.
//! This crate does not depend on `pubg-lookup-lib` or `pubg-lookup-bin`, else we would get dependency cycles.
//! Macros are used instead, so that the importer is responsible for providing the dependencies.

/// Create a mock web server, which responds with a predefined status when
/// handling a matching request
#[macro_export]
macro_rules! mock_server {
    ($status:expr $(, $func:tt ($($arg:expr),*))*) => {{
        let mock_server = wiremock::MockServer::start().await;
        let response_template = wiremock::ResponseTemplate::new(http::StatusCode::from($status));
        let template = response_template$(.$func($($arg),*))*;
        wiremock::Mock::given(wiremock::matchers::method("GET")).respond_with(template).mount(&mock_server).await;
        mock_server
    }};
}

/// Body of a successful lookup by name, a list holding one player
#[macro_export]
macro_rules! players_json {
    ($id:expr, $name:expr $(,)?) => {
        serde_json::json!({
            "data": [{
                "type": "player",
                "id": $id,
                "attributes": { "name": $name, "shardId": "steam" }
            }],
            "links": { "self": "https://api.pubg.com/shards/steam/players" }
        })
        .to_string()
    };
}

/// Body of a successful lookup by account ID, a single player
#[macro_export]
macro_rules! player_json {
    ($id:expr, $name:expr $(,)?) => {
        serde_json::json!({
            "data": {
                "type": "player",
                "id": $id,
                "attributes": { "name": $name, "shardId": "steam" }
            }
        })
        .to_string()
    };
}

/// Mount a `/players` route answering name lookups for one player
/// on the given mock server
#[macro_export]
macro_rules! mount_player {
    ($server:expr, $shard:expr, $name:expr, $id:expr $(,)?) => {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(format!("/shards/{}/players", $shard)))
            .and(wiremock::matchers::query_param("filter[playerNames]", $name))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string($crate::players_json!($id, $name)),
            )
            .mount($server)
            .await
    };
}

/// Gets the "main" binary name (e.g. `pubg-lookup`)
#[macro_export]
macro_rules! main_command {
    () => {
        Command::cargo_bin(env!("CARGO_PKG_NAME")).expect("Couldn't get cargo package name")
    };
}
