//! Integration tests for dynamic predicates, member search and paging

mod common;

use pretty_assertions::assert_eq;

use common::{fixture, usernames};
use roster::dto::MemberSearchCondition;
use roster::orm::PageRequest;

// ============================================================================
// Optional predicates
// ============================================================================

#[tokio::test]
async fn test_builder_style_both_inputs() {
    let fx = fixture().await;

    let found = fx.queries().search_members(Some("member1"), Some(10)).await.unwrap();
    assert_eq!(usernames(&found), vec!["member1"]);
}

#[tokio::test]
async fn test_builder_style_no_inputs_returns_all() {
    let fx = fixture().await;

    let found = fx.queries().search_members(None, None).await.unwrap();
    assert_eq!(found.len(), 4);
}

#[tokio::test]
async fn test_predicate_style_matches_builder_style() {
    let fx = fixture().await;
    let q = fx.queries();

    for (username, age) in [
        (Some("member1"), Some(10)),
        (Some("member2"), None),
        (None, Some(30)),
        (None, None),
        (Some("member1"), Some(20)),
    ] {
        assert_eq!(
            q.search_members_where(username, age).await.unwrap(),
            q.search_members(username, age).await.unwrap(),
            "username={username:?} age={age:?}"
        );
    }
}

// ============================================================================
// Member search
// ============================================================================

#[tokio::test]
async fn test_search_by_team_and_age_range() {
    let fx = fixture().await;

    let condition = MemberSearchCondition::default()
        .age_goe(35)
        .age_loe(40)
        .team_name("teamB");
    let rows = fx.queries().search(&condition).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username.as_deref(), Some("member4"));
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
    assert_eq!(rows[0].team_id, Some(fx.team_b.id));
}

#[tokio::test]
async fn test_search_includes_members_without_team() {
    let fx = fixture().await;
    fx.db
        .members()
        .create(roster::entity::NewMember::new("loner", 50))
        .await
        .unwrap();

    let rows = fx.queries().search(&MemberSearchCondition::default()).await.unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4].team_name, None);
    assert_eq!(
        fx.queries().search_count(&MemberSearchCondition::default()).await.unwrap(),
        5
    );
}

#[tokio::test]
async fn test_search_page_simple() {
    let fx = fixture().await;

    let page = fx
        .queries()
        .search_page_simple(&MemberSearchCondition::default(), PageRequest::new(0, 3))
        .await
        .unwrap();
    assert_eq!(page.content.len(), 3);
    assert_eq!(page.total_elements, 4);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_search_page_complex_matches_simple() {
    let fx = fixture().await;
    let q = fx.queries();
    let condition = MemberSearchCondition::default();

    for request in [
        PageRequest::new(0, 3),
        PageRequest::new(1, 3),
        PageRequest::new(0, 10),
        PageRequest::new(2, 2),
    ] {
        assert_eq!(
            q.search_page_complex(&condition, request).await.unwrap(),
            q.search_page_simple(&condition, request).await.unwrap(),
            "{request:?}"
        );
    }
}
