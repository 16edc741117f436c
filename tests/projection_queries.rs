//! Integration tests for projections and SQL expressions

mod common;

use pretty_assertions::assert_eq;

use common::fixture;
use roster::dto::{MemberDto, UserDto};
use roster::entity::NewMember;

// ============================================================================
// Projections
// ============================================================================

#[tokio::test]
async fn test_scalar_projection() {
    let fx = fixture().await;

    let names = fx.queries().usernames().await.unwrap();
    assert_eq!(
        names,
        vec![
            Some("member1".to_string()),
            Some("member2".to_string()),
            Some("member3".to_string()),
            Some("member4".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_tuple_projection() {
    let fx = fixture().await;

    let pairs = fx.queries().username_age_pairs().await.unwrap();
    assert_eq!(pairs[0], (Some("member1".to_string()), 10));
    assert_eq!(pairs[3], (Some("member4".to_string()), 40));
}

#[tokio::test]
async fn test_dto_projection() {
    let fx = fixture().await;

    let dtos = fx.queries().member_dtos().await.unwrap();
    assert_eq!(dtos.len(), 4);
    assert_eq!(dtos[1], MemberDto::new(Some("member2".into()), 20));
}

#[tokio::test]
async fn test_dto_projection_with_alias() {
    let fx = fixture().await;

    let users = fx.queries().user_dtos().await.unwrap();
    assert_eq!(
        users[0],
        UserDto {
            name: Some("member1".into()),
            age: 10
        }
    );
}

#[tokio::test]
async fn test_dto_projection_with_subquery_field() {
    let fx = fixture().await;

    let users = fx.queries().user_dtos_with_max_age().await.unwrap();
    assert_eq!(users.len(), 4);
    assert!(users.iter().all(|u| u.age == 40));
}

// ============================================================================
// Expressions
// ============================================================================

#[tokio::test]
async fn test_simple_case() {
    let fx = fixture().await;

    let labels = fx
        .queries()
        .age_labels(&[(10, "ten"), (20, "twenty")], "other")
        .await
        .unwrap();
    assert_eq!(labels, vec!["ten", "twenty", "other", "other"]);
}

#[tokio::test]
async fn test_searched_case_with_ranges() {
    let fx = fixture().await;

    let labels = fx
        .queries()
        .age_ranges(&[(0, 20, "0-20"), (21, 30, "21-30")], "older")
        .await
        .unwrap();
    assert_eq!(labels, vec!["0-20", "0-20", "21-30", "older"]);
}

#[tokio::test]
async fn test_constant_column() {
    let fx = fixture().await;

    let rows = fx.queries().usernames_with_constant("A").await.unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|(_, c)| c == "A"));
}

#[tokio::test]
async fn test_concat_with_age() {
    let fx = fixture().await;

    let labels = fx.queries().username_age_labels("member1").await.unwrap();
    assert_eq!(labels, vec!["member1_10"]);
}

#[tokio::test]
async fn test_replace_function() {
    let fx = fixture().await;

    let names = fx.queries().usernames_replaced("member", "M").await.unwrap();
    assert_eq!(names[0].as_deref(), Some("M1"));
    assert_eq!(names[3].as_deref(), Some("M4"));
}

#[tokio::test]
async fn test_lower_function() {
    let fx = fixture().await;
    fx.db.members().create(NewMember::named("Member5")).await.unwrap();

    let names = fx.queries().lowercase_usernames().await.unwrap();
    assert_eq!(names, vec!["member1", "member2", "member3", "member4"]);
}
