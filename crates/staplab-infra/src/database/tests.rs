use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;
use uuid::Uuid;

use staplab_core::domain::{Post, Team, TeamStatus, User};
use staplab_core::error::RepoError;
use staplab_core::ports::{BaseRepository, UserRepository};

use super::entity::{post, team, user};
use super::postgres_repo::{PostgresPostRepository, PostgresTeamRepository, PostgresUserRepository};

fn post_row(id: Uuid, url: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Sensing with light".to_owned(),
        url: url.to_owned(),
        image: "https://res.cloudinary.com/lab/image/upload/v1/lab/cover.jpg".to_owned(),
        image_public_id: Some("lab/cover".to_owned()),
        content: "Body".to_owned(),
        authors: json!(["Ada", "Grace"]),
        paragraphs: json!([{"content": "intro", "imageCaption": "Fig. 1"}]),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id_decodes_json_columns() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(post_id, "sensing")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.authors, ["Ada", "Grace"]);
    assert_eq!(post.paragraphs.len(), 1);
    assert_eq!(post.paragraphs[0].image_caption.as_deref(), Some("Fig. 1"));
}

#[tokio::test]
async fn test_malformed_json_column_is_a_decode_error() {
    let post_id = Uuid::new_v4();
    let mut row = post_row(post_id, "broken");
    row.paragraphs = json!({"not": "a list"});
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result: Result<Option<Post>, _> = repo.find_by_id(post_id).await;

    assert!(matches!(result, Err(RepoError::Decode(_))));
}

#[tokio::test]
async fn test_find_all_returns_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_row(Uuid::new_v4(), "first"),
            post_row(Uuid::new_v4(), "second"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts: Vec<Post> = repo.find_all().await.unwrap();

    let urls: Vec<_> = posts.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, ["first", "second"]);
}

#[tokio::test]
async fn test_update_of_vanished_row_is_not_found() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = post_row(post_id, "gone").try_into().unwrap();
    let result = BaseRepository::<Post, Uuid>::update(&repo, post).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_without_affected_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresTeamRepository::new(db);
    let result = BaseRepository::<Team, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_team_status_maps_from_enum_column() {
    let team_id = Uuid::new_v4();
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![team::Model {
            id: team_id,
            name: "Ada Lovelace".to_owned(),
            occupation: "PhD student".to_owned(),
            title: "Ms".to_owned(),
            image: "https://example.com/ada.png".to_owned(),
            comment: "Sensors".to_owned(),
            affiliation: "STAP Lab".to_owned(),
            status: team::Status::Collaborator,
            twitter: None,
            facebook: None,
            linkedin: Some("https://linkedin.com/in/ada".to_owned()),
            instagram: None,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresTeamRepository::new(db);
    let team: Team = repo.find_by_id(team_id).await.unwrap().unwrap();

    assert_eq!(team.status, TeamStatus::Collaborator);
    assert_eq!(team.linkedin.as_deref(), Some("https://linkedin.com/in/ada"));
}

#[tokio::test]
async fn test_find_user_by_email() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            fullname: "Ada Lovelace".to_owned(),
            email: "ada@lab.org".to_owned(),
            password_hash: "$argon2id$v=19$stub".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user: User = repo.find_by_email("ada@lab.org").await.unwrap().unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.fullname, "Ada Lovelace");
}
