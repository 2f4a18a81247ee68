//! TourRepository 統合テスト
//!
//! 閲覧数の加算とステップ追加が DB 上で単一文として動作することを確認する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p tourflow-infra --test tour_repository_test
//! ```

mod common;

use common::{create_test_step, create_test_tour, test_later, test_now};
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use tourflow_domain::tour::{TourId, TourReplacement, TourTitle};
use tourflow_infra::repository::{PostgresTourRepository, TourRepository};

#[sqlx::test(migrations = "../../migrations")]
async fn test_登録したツアーを取得できる(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let tour = create_test_tour("Onboarding", true, test_now());

    sut.insert(&tour).await.unwrap();
    let found = sut.find_by_id(tour.id()).await.unwrap();

    assert_eq!(found, Some(tour));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_一覧は作成順に返る(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let second = create_test_tour("Second", false, test_later(10));
    let first = create_test_tour("First", false, test_now());
    sut.insert(&second).await.unwrap();
    sut.insert(&first).await.unwrap();

    let tours = sut.find_all().await.unwrap();

    let titles: Vec<&str> = tours.iter().map(|t| t.title().as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_公開中のツアーは閲覧ごとに加算される(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let tour = create_test_tour("Onboarding", true, test_now());
    sut.insert(&tour).await.unwrap();

    sut.record_view(tour.id(), test_later(1)).await.unwrap();
    let viewed = sut.record_view(tour.id(), test_later(2)).await.unwrap().unwrap();

    assert_eq!(viewed.views(), 2);
    assert_eq!(viewed.updated_at(), test_later(2));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_非公開のツアーは閲覧しても変化しない(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let tour = create_test_tour("Draft", false, test_now());
    sut.insert(&tour).await.unwrap();

    let viewed = sut.record_view(tour.id(), test_later(1)).await.unwrap();

    assert_eq!(viewed, Some(tour));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないツアーの閲覧はnoneを返す(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);

    let viewed = sut.record_view(&TourId::new(), test_now()).await.unwrap();

    assert!(viewed.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ステップは追加順に積み上がる(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let tour = create_test_tour("Onboarding", false, test_now());
    sut.insert(&tour).await.unwrap();

    for order in [2, 1, 3] {
        sut.append_step(tour.id(), &create_test_step(order), test_later(1))
            .await
            .unwrap();
    }
    let found = sut.find_by_id(tour.id()).await.unwrap().unwrap();

    assert_eq!(
        found.steps(),
        &[create_test_step(2), create_test_step(1), create_test_step(3)]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないツアーへのステップ追加はnoneを返す(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);

    let result = sut
        .append_step(&TourId::new(), &create_test_step(1), test_now())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_置換更新は閲覧数を保ったまま全項目を置き換える(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let tour = create_test_tour("Onboarding", true, test_now());
    sut.insert(&tour).await.unwrap();
    sut.append_step(tour.id(), &create_test_step(1), test_now())
        .await
        .unwrap();
    sut.record_view(tour.id(), test_now()).await.unwrap();

    let replaced = sut
        .replace(
            tour.id(),
            &TourReplacement {
                title:       TourTitle::new("Renamed").unwrap(),
                description: String::new(),
                published:   false,
                steps:       vec![create_test_step(5), create_test_step(6)],
            },
            test_later(60),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.title().as_str(), "Renamed");
    assert!(!replaced.published());
    assert_eq!(replaced.steps(), &[create_test_step(5), create_test_step(6)]);
    assert_eq!(replaced.views(), 1);
    assert_eq!(replaced.created_at(), test_now());
    assert_eq!(replaced.updated_at(), test_later(60));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_削除後は取得できず存在しないidの削除もエラーにならない(pool: PgPool) {
    let sut = PostgresTourRepository::new(pool);
    let tour = create_test_tour("Onboarding", true, test_now());
    sut.insert(&tour).await.unwrap();

    sut.delete(tour.id()).await.unwrap();
    sut.delete(tour.id()).await.unwrap();

    assert!(sut.find_by_id(tour.id()).await.unwrap().is_none());
}
