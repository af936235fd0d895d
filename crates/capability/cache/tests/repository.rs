use api_contract::{BatimentFilters, Pagination};
use batiment_cache::{BatimentRepository, QueryCache, QueryKey};
use batiment_client::{ApiError, ApiOperation, BatimentApi, InMemoryBatimentApi};
use domain::{Terrain, TypeBatiment, TypeSol};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

async fn setup() -> (Arc<InMemoryBatimentApi>, BatimentRepository, String) {
    let api = Arc::new(InMemoryBatimentApi::new());
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    let repository = BatimentRepository::new(api.clone());
    (api, repository, id)
}

#[tokio::test]
async fn detail_is_fetched_once_until_invalidated() {
    let (api, repository, id) = setup().await;
    repository.detail(&id).await.expect("first");
    repository.detail(&id).await.expect("second");
    assert_eq!(api.calls(ApiOperation::Get), 1);
}

#[tokio::test]
async fn mutation_makes_next_read_fresh() {
    let (api, repository, id) = setup().await;
    let before = repository.detail(&id).await.expect("before");
    assert!(before.terrain.is_none());

    let terrain = Terrain {
        surface: 500.0,
        type_sol: Some(TypeSol::Argile),
        ..Terrain::default()
    };
    repository
        .mutate(
            ApiOperation::SetTerrain,
            Some(&id),
            repository.api().set_terrain(&id, &terrain),
        )
        .await
        .expect("set terrain");

    let after = repository.detail(&id).await.expect("after");
    assert_eq!(after.terrain, Some(terrain));
    assert_eq!(api.calls(ApiOperation::Get), 2);
}

#[tokio::test]
async fn validation_is_dropped_with_detail() {
    let (api, repository, id) = setup().await;
    repository.validation(&id).await.expect("validation");
    repository
        .mutate(
            ApiOperation::DeleteTerrain,
            Some(&id),
            repository.api().delete_terrain(&id),
        )
        .await
        .expect("delete terrain");
    assert!(!repository
        .cache()
        .contains(&QueryKey::batiment_validation(&id)));
    repository.validation(&id).await.expect("validation");
    assert_eq!(api.calls(ApiOperation::Validate), 2);
}

#[tokio::test]
async fn failed_mutation_keeps_cache() {
    let (api, repository, id) = setup().await;
    repository.detail(&id).await.expect("detail");
    api.fail_next(ApiOperation::SetTerrain, ApiError::internal("boom"));
    let result = repository
        .mutate(
            ApiOperation::SetTerrain,
            Some(&id),
            repository.api().set_terrain(&id, &Terrain::default()),
        )
        .await;
    assert!(result.is_err());
    assert!(repository.cache().contains(&QueryKey::batiment_detail(&id)));
}

#[tokio::test]
async fn list_family_refetches_after_init() {
    let (api, repository, _) = setup().await;
    let filters = BatimentFilters::default();
    let pagination = Pagination::new(0, 10);
    let page = repository.list(&filters, &pagination).await.expect("list");
    assert_eq!(page.total_elements, 1);
    repository.list_all().await.expect("all");

    repository
        .mutate(
            ApiOperation::Init,
            None,
            repository.api().init("Immeuble", TypeBatiment::Immeuble),
        )
        .await
        .expect("init");

    let page = repository.list(&filters, &pagination).await.expect("list");
    assert_eq!(page.total_elements, 2);
    assert_eq!(repository.list_all().await.expect("all").len(), 2);
    assert_eq!(api.calls(ApiOperation::List), 2);
    assert_eq!(api.calls(ApiOperation::ListAll), 2);
}

#[tokio::test]
async fn concurrent_reads_share_one_fetch() {
    let cache = QueryCache::<u32>::new();
    let key = QueryKey::batiment_detail("b1");
    let counter = AtomicUsize::new(0);
    let fetches = &counter;
    let (release, gate) = oneshot::channel::<()>();

    let leader = cache.fetch(key.clone(), move || async move {
        fetches.fetch_add(1, Ordering::SeqCst);
        gate.await.map_err(|_| ApiError::transport("gate closed"))?;
        Ok(42)
    });
    let follower = cache.fetch(key.clone(), move || async move {
        fetches.fetch_add(1, Ordering::SeqCst);
        Ok(0)
    });
    let releaser = async {
        tokio::task::yield_now().await;
        let _ = release.send(());
    };

    let (first, second, _) = tokio::join!(leader, follower, releaser);
    assert_eq!(first, Ok(42));
    assert_eq!(second, Ok(42));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn read_started_before_invalidation_is_not_cached() {
    let cache = QueryCache::<u32>::new();
    let key = QueryKey::batiment_detail("b1");
    let (release, gate) = oneshot::channel::<()>();

    let stale_read = cache.fetch(key.clone(), move || async move {
        gate.await.map_err(|_| ApiError::transport("gate closed"))?;
        Ok(1)
    });
    let mutation = async {
        tokio::task::yield_now().await;
        cache.invalidate(&QueryKey::batiment_detail("b1"));
        let _ = release.send(());
    };

    let (stale, _) = tokio::join!(stale_read, mutation);
    assert_eq!(stale, Ok(1));
    assert!(!cache.contains(&key));

    let fresh = cache.fetch(key, || async { Ok(2) }).await;
    assert_eq!(fresh, Ok(2));
}

#[tokio::test]
async fn dropped_leader_does_not_fail_waiting_reads() {
    let cache = Arc::new(QueryCache::<u32>::new());
    let key = QueryKey::batiment_detail("b1");
    let (started, leader_running) = oneshot::channel::<()>();

    let leader = tokio::spawn({
        let cache = cache.clone();
        let key = key.clone();
        async move {
            cache
                .fetch(key, move || async move {
                    let _ = started.send(());
                    std::future::pending::<Result<u32, ApiError>>().await
                })
                .await
        }
    });
    leader_running.await.expect("leader started");

    let follower = tokio::spawn({
        let cache = cache.clone();
        let key = key.clone();
        async move { cache.fetch(key, || async { Ok(7) }).await }
    });
    tokio::task::yield_now().await;
    leader.abort();

    let joined = follower.await.expect("follower task");
    assert_eq!(joined, Ok(7));
    assert_eq!(cache.get(&key), Some(7));
}
