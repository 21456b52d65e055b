//! Integration tests for cart persistence on the file store.
//!
//! Each test gets its own temporary directory; a "restart" is modeled by
//! mounting a fresh provider over the same storage file.

use std::sync::Arc;

use go_marketplace_cart::{
    CartConfig, CartProvider, FileStore, Hydration, KeyValueStore, MemoryStore,
};
use go_marketplace_core::{Cart, ProductId};
use go_marketplace_integration_tests::{expect, product, quantities};
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> Arc<FileStore> {
    Arc::new(FileStore::new(dir.path().join("cart-storage.json")))
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CartConfig::default();

    {
        let provider = CartProvider::mount(file_store(&dir), &config)
            .await
            .expect("mount");
        let cart = provider.handle();
        cart.add_to_cart(product("p1")).await.expect("add p1");
        cart.add_to_cart(product("p2")).await.expect("add p2");
        cart.increment(&ProductId::from("p1")).await.expect("increment");
    }

    let provider = CartProvider::mount(file_store(&dir), &config)
        .await
        .expect("remount");

    assert_eq!(
        quantities(&provider.handle().cart()),
        expect(&[("p1", 2), ("p2", 1)])
    );
}

#[tokio::test]
async fn test_stored_format_is_line_item_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = file_store(&dir);
    let provider = CartProvider::new(storage.clone(), &CartConfig::default());
    provider
        .handle()
        .add_to_cart(product("p1"))
        .await
        .expect("add");

    let raw = storage
        .get("@GoMarketplace:products")
        .await
        .expect("read")
        .expect("snapshot present");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    assert_eq!(
        json,
        serde_json::json!([{
            "id": "p1",
            "title": "Product p1",
            "image_url": "https://cdn.example.com/p1.png",
            "price": 19.9,
            "quantity": 1
        }])
    );
}

#[tokio::test]
async fn test_emptied_cart_stays_empty_after_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CartConfig::default();
    let p1 = ProductId::from("p1");

    let provider = CartProvider::mount(file_store(&dir), &config)
        .await
        .expect("mount");
    provider.handle().add_to_cart(product("p1")).await.expect("add");
    provider.handle().decrement(&p1).await.expect("decrement");

    let reopened = CartProvider::new(file_store(&dir), &config);
    assert_eq!(
        reopened.handle().hydrate().await.expect("hydrate"),
        Hydration::Restored { items: 0 }
    );
    assert!(reopened.handle().cart().is_empty());
}

#[tokio::test]
async fn test_snapshot_from_older_app_version() {
    let storage = MemoryStore::new();
    storage
        .set(
            "@GoMarketplace:products",
            r#"[
                {"id":"p1","title":"Tea","image_url":"t.png","price":4.5,"quantity":3},
                {"id":"p2","title":"Mug","image_url":"m.png","price":12,"quantity":1}
            ]"#
            .to_string(),
        )
        .await
        .expect("seed");

    let provider = CartProvider::mount(Arc::new(storage), &CartConfig::default())
        .await
        .expect("mount");

    assert_eq!(
        quantities(&provider.handle().cart()),
        expect(&[("p1", 3), ("p2", 1)])
    );
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let storage = MemoryStore::new();
    storage
        .set("@GoMarketplace:products", "[{\"id\":".to_string())
        .await
        .expect("seed");

    let provider = CartProvider::mount(Arc::new(storage.clone()), &CartConfig::default())
        .await
        .expect("mount");
    let cart = provider.handle();
    assert!(cart.cart().is_empty());

    // The next write replaces the unreadable snapshot.
    cart.add_to_cart(product("p1")).await.expect("add");
    let raw = storage
        .get("@GoMarketplace:products")
        .await
        .expect("read")
        .expect("snapshot present");
    let restored: Cart = serde_json::from_str(&raw).expect("valid snapshot");
    assert_eq!(restored, cart.cart());
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = file_store(&dir);

    let shop = CartProvider::new(storage.clone(), &CartConfig::with_namespace("@Shop"));
    let other = CartProvider::new(storage.clone(), &CartConfig::with_namespace("@Other"));
    shop.handle().add_to_cart(product("p1")).await.expect("add");
    other.handle().add_to_cart(product("p2")).await.expect("add");

    let shop_again = CartProvider::mount(storage, &CartConfig::with_namespace("@Shop"))
        .await
        .expect("mount");
    assert_eq!(quantities(&shop_again.handle().cart()), expect(&[("p1", 1)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mutations_persist_final_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = file_store(&dir);
    let provider = CartProvider::new(storage.clone(), &CartConfig::default());

    let mut tasks = Vec::new();
    for i in 0..24 {
        let cart = provider.handle();
        tasks.push(tokio::spawn(async move {
            let id = format!("p{}", i % 3);
            cart.add_to_cart(product(&id)).await
        }));
    }
    for task in tasks {
        task.await.expect("join").expect("add");
    }

    let in_memory = provider.handle().cart();
    assert_eq!(in_memory.total_quantity(), 24);
    assert!(in_memory.iter().all(|item| item.quantity == 8));

    let reopened = CartProvider::mount(storage, &CartConfig::default())
        .await
        .expect("mount");
    assert_eq!(reopened.handle().cart(), in_memory);
}
