//! Memo and file routing through mock servers: pagination parameters,
//! relation normalization over real JSON, the resources/attachments
//! rename, and the version-split reaction delete.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notewire_client::{
    ApiClient, MemoRepository, ResourceRepository, ServerVersion, Session,
};
use notewire_core::{MemoRelation, MemoState, RelationKind};

fn client(server: &MockServer, version: ServerVersion) -> ApiClient {
    let session = Session::new();
    session.set_server_url(Some(&server.uri()));
    session.set_server_version(version);
    session.set_access_token(Some("tok_1".into()));
    ApiClient::new(session)
}

#[tokio::test]
async fn list_memos_sends_pagination_and_filter_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/memos"))
        .and(query_param("pageSize", "20"))
        .and(query_param("pageToken", "page-2"))
        .and(query_param("filter", "creator == 'users/7'"))
        .and(query_param("state", "ARCHIVED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "memos": [{"name": "memos/1", "content": "hi"}],
            "nextPageToken": "page-3",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let memos = MemoRepository::new(client(&server, ServerVersion::V026));
    let page = memos
        .list_memos(
            20,
            Some("page-2"),
            Some("creator == 'users/7'"),
            Some(MemoState::Archived),
        )
        .await
        .unwrap();

    assert_eq!(page.memos.len(), 1);
    assert_eq!(page.memos[0].name, "memos/1");
    assert_eq!(page.next_page_token, "page-3");
}

#[tokio::test]
async fn heterogeneous_relations_normalize_through_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/memos/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "memos/101",
            "content": "linked",
            "relations": [
                // legacy bare-string refs with a numeric kind
                {"memo": "memos/101", "relatedMemo": "memos/102", "type": 2},
                // structured refs with a symbolic kind
                {
                    "memo": {"name": "memos/101", "uid": "u1"},
                    "relatedMemo": {"name": "memos/103"},
                    "type": "REFERENCE",
                },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let memos = MemoRepository::new(client(&server, ServerVersion::V026));
    let memo = memos.get_memo("101").await.unwrap();

    assert_eq!(
        memo.relations,
        vec![
            MemoRelation {
                memo: "memos/101".into(),
                related_memo: "memos/102".into(),
                kind: RelationKind::Comment,
            },
            MemoRelation {
                memo: "memos/101".into(),
                related_memo: "memos/103".into(),
                kind: RelationKind::Reference,
            },
        ]
    );
}

#[tokio::test]
async fn set_relations_sends_structured_refs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/memos/101/relations"))
        .and(body_partial_json(json!({
            "relations": [{
                "memo": {"name": "memos/101"},
                "relatedMemo": {"name": "memos/102"},
                "type": "COMMENT",
            }],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let memos = MemoRepository::new(client(&server, ServerVersion::V026));
    memos
        .set_relations(
            "101",
            &[MemoRelation {
                memo: "memos/101".into(),
                related_memo: "memos/102".into(),
                kind: RelationKind::Comment,
            }],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_reaction_routes_by_version() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/reactions/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/memos/42/reactions/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    MemoRepository::new(client(&server, ServerVersion::V024))
        .delete_reaction("42", 9)
        .await
        .unwrap();
    MemoRepository::new(client(&server, ServerVersion::V026))
        .delete_reaction("42", 9)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_memo_resources_body_field_renamed_after_v024() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/memos/42/resources"))
        .and(body_partial_json(json!({
            "resources": [{"name": "resources/5"}],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/memos/42/attachments"))
        .and(body_partial_json(json!({
            "attachments": [{"name": "attachments/5"}],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    MemoRepository::new(client(&server, ServerVersion::V024))
        .set_memo_resources("memos/42", &["resources/5".to_string()])
        .await
        .unwrap();
    MemoRepository::new(client(&server, ServerVersion::V026))
        .set_memo_resources("memos/42", &["attachments/5".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn resources_and_attachments_list_as_one_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{
                "name": "resources/5",
                "filename": "a.png",
                "type": "image/png",
                "size": "2048",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attachments": [{
                "name": "attachments/5",
                "filename": "b.mp4",
                "type": "video/mp4",
                "size": "4096",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let old = ResourceRepository::new(client(&server, ServerVersion::V024))
        .list_resources()
        .await
        .unwrap();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].name, "resources/5");
    assert_eq!(old[0].size, 2048);
    assert!(old[0].is_image());

    let new = ResourceRepository::new(client(&server, ServerVersion::V026))
        .list_resources()
        .await
        .unwrap();
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].name, "attachments/5");
    assert!(new[0].is_video());
}

#[tokio::test]
async fn upload_sends_base64_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/attachments"))
        .and(body_partial_json(json!({
            "filename": "note.txt",
            "type": "text/plain",
            // base64 of "hello"
            "content": "aGVsbG8=",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "attachments/9",
            "filename": "note.txt",
            "type": "text/plain",
            "size": "5",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = ResourceRepository::new(client(&server, ServerVersion::V026))
        .upload_resource("note.txt", "text/plain", b"hello")
        .await
        .unwrap();
    assert_eq!(resource.name, "attachments/9");
    assert_eq!(resource.size, 5);
}
