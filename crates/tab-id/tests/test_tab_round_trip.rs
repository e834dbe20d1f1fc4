#[path = "common/common.rs"]
pub mod common;

use common::TestTab;
use serde_json::json;
use tab_id::{
    client::{MemoryNavigator, PageUrl},
    id_generator::TabIdGenerator,
    server::{extract, InMemorySessionStore, SessionData, SessionStore},
    IdGenerator, TabId, TabIdOptions,
};

fn patch(value: serde_json::Value) -> SessionData {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn embedded_token_round_trips() {
    let generator = TabIdGenerator;
    for key in ["tid", "customId", "tab id"] {
        let token: TabId = generator.generate();
        let url = PageUrl::parse("/orders?page=3").with_query_param(key, token.as_str());

        assert_eq!(extract(&url.to_string(), key), Some(token));
        assert_eq!(extract(&url.to_string(), "otherKey"), None);
    }
}

#[test]
fn repeated_key_first_value_wins() {
    assert_eq!(
        extract("/?tid=ab-1234&x=1&tid=cd-5678", "tid"),
        Some(TabId::from("ab-1234"))
    );
}

#[tokio::test]
async fn two_tabs_get_separate_sessions() {
    let sessions = InMemorySessionStore::new();
    let first = TestTab::new("/cart");
    let second = TestTab::from_parts(first.storage.duplicate(), MemoryNavigator::new("/cart"));

    let mut sync_first = first.sync(TabIdOptions::default(), &["ab-1234"]);
    sync_first.mount();
    sync_first.render().unwrap();
    sync_first.commit().await.unwrap();

    // the second tab starts from a copy of the first tab's storage before the
    // first tab ever wrote, so it mints its own id
    let mut sync_second = second.sync(TabIdOptions::default(), &["cd-5678"]);
    sync_second.mount();
    sync_second.render().unwrap();
    sync_second.commit().await.unwrap();

    for (tab, item) in [(&first, "book"), (&second, "lamp")] {
        let tab_id = extract(&tab.url(), "tid").expect("URL carries the tab id");
        sessions.upsert(tab_id, patch(json!({ "item": item }))).await;
    }

    let first_id = TabId::from("ab-1234");
    let second_id = TabId::from("cd-5678");
    assert_eq!(
        sessions.get(&first_id).await,
        Some(patch(json!({ "item": "book" })))
    );
    assert_eq!(
        sessions.get(&second_id).await,
        Some(patch(json!({ "item": "lamp" })))
    );
}

#[tokio::test]
async fn request_before_correction_is_unresolved() {
    let tab = TestTab::new("/cart?ref=mail");
    let mut sync = tab.sync(TabIdOptions::default(), &["ab-1234"]);

    // first request goes out before the client has corrected its URL
    assert_eq!(extract(&tab.url(), "tid"), None);

    sync.mount();
    sync.render().unwrap();
    sync.commit().await.unwrap();
    assert_eq!(extract(&tab.url(), "tid"), Some(TabId::from("ab-1234")));
}
