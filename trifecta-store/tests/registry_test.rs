use pretty_assertions::assert_eq;
use trifecta_core::db::{RepositoryRegistry, StoreConfig};
use trifecta_core::{RepositoryError, SectionPosition, SectionStatus, SectionUpdate};
use trifecta_store::MemoryRepositoryFactory;

fn registry() -> RepositoryRegistry {
    RepositoryRegistry::new().with_factory(Box::new(MemoryRepositoryFactory))
}

fn seed_path() -> String {
    format!("{}/seeds/sections.json", env!("CARGO_MANIFEST_DIR"))
}

#[tokio::test]
async fn test_seeded_store_through_registry() {
    let repo = registry()
        .open(&StoreConfig::new("memory", seed_path()))
        .await
        .expect("Should create seeded store");

    let holdings = repo.get_section(3).await.expect("Should find holdings");
    assert_eq!(holdings.position, SectionPosition::Holdings);
    assert_eq!(holdings.status, SectionStatus::Pending);
    assert_eq!(holdings.sub_components.len(), 2);
}

#[tokio::test]
async fn test_seeded_store_lifecycle() {
    let repo = registry()
        .open(&StoreConfig::new("memory", seed_path()))
        .await
        .expect("Should create seeded store");

    let completed = repo
        .update_section(
            3,
            SectionUpdate {
                status: Some(SectionStatus::Completed),
                ..SectionUpdate::default()
            },
        )
        .await
        .expect("Should update holdings");
    assert!(completed.is_completed());

    let removed = repo.delete_section(1).await.expect("Should delete foundation");
    assert_eq!(removed.name, "Foundation");

    let mut new = trifecta_core::NewTrifectaSection::from(removed);
    new.description = "Rebuilt".to_string();
    let recreated = repo.create_section(new).await.expect("Should recreate");

    assert_eq!(recreated.id, 4);
    assert_eq!(repo.get_section(1).await, Err(RepositoryError::NotFound(1)));
    assert_eq!(repo.list_sections().await.expect("Should list").len(), 3);
}

#[tokio::test]
async fn test_unknown_backend_is_configuration_error() {
    let result = registry()
        .open(&StoreConfig::new("sqlite", ""))
        .await;

    assert!(matches!(result, Err(RepositoryError::Configuration(_))));
}

#[tokio::test]
async fn test_named_configs_open_empty_and_bundled_stores() {
    let registry = registry();

    let empty = registry
        .open(&StoreConfig::in_memory())
        .await
        .expect("Should create empty store");
    let seeded = registry
        .open(&StoreConfig::seeded())
        .await
        .expect("Should create seeded store");

    assert!(empty.list_sections().await.expect("Should list").is_empty());
    let positions: Vec<_> = seeded
        .list_sections()
        .await
        .expect("Should list")
        .into_iter()
        .map(|s| s.position)
        .collect();
    assert_eq!(
        positions,
        vec![
            SectionPosition::Foundation,
            SectionPosition::Operations,
            SectionPosition::Holdings
        ]
    );
}
