//! RedisStore against a live server
//!
//! Runs only when `REDIS_URL` is set; each test works under its own
//! namespace and removes its keys afterwards.

use std::time::{SystemTime, UNIX_EPOCH};

use holostore::{KeyValueStore, RedisStore};
use redis::AsyncCommands;

struct Server {
    url: String,
    namespace: String,
    raw: redis::aio::MultiplexedConnection,
}

impl Server {
    async fn connect(test: &str) -> Option<Self> {
        let url = match std::env::var("REDIS_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("REDIS_URL not set, skipping {}", test);
                return None;
            }
        };
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let namespace = format!("holostore-test:{}:{}:", test, nanos);
        let raw = redis::Client::open(url.as_str())
            .unwrap()
            .get_multiplexed_async_connection()
            .await
            .unwrap();
        Some(Self {
            url,
            namespace,
            raw,
        })
    }

    async fn store(&self) -> RedisStore {
        RedisStore::connect(&self.url, self.namespace.as_str())
            .await
            .unwrap()
    }

    async fn cleanup(mut self, extra: &[&str]) {
        let keys: Vec<String> = self
            .raw
            .keys(format!("{}*", self.namespace))
            .await
            .unwrap();
        for key in keys.iter().map(String::as_str).chain(extra.iter().copied()) {
            let _: () = self.raw.del(key).await.unwrap();
        }
    }
}

#[tokio::test]
async fn test_set_get_round_trip_under_namespace() {
    let Some(mut server) = Server::connect("round_trip").await else {
        return;
    };
    let store = server.store().await;

    store.set("movies:1", br#"{"title":"A New Hope"}"#).await.unwrap();

    assert_eq!(
        store.get("movies:1").await.unwrap(),
        Some(br#"{"title":"A New Hope"}"#.to_vec())
    );
    assert_eq!(store.get("movies:2").await.unwrap(), None);

    let raw: Option<Vec<u8>> = server
        .raw
        .get(format!("{}movies:1", server.namespace))
        .await
        .unwrap();
    assert_eq!(raw, Some(br#"{"title":"A New Hope"}"#.to_vec()));

    server.cleanup(&[]).await;
}

#[tokio::test]
async fn test_exists_checks_namespaced_key() {
    let Some(mut server) = Server::connect("exists").await else {
        return;
    };
    let store = server.store().await;
    let bare = format!("{}bare", server.namespace.trim_end_matches(':'));

    store.set("movies:1", b"[\"1\"]").await.unwrap();
    let _: () = server.raw.set(&bare, b"x".as_slice()).await.unwrap();

    assert!(store.exists("movies:1").await.unwrap());
    assert!(!store.exists("movies:404").await.unwrap());
    // present only outside the namespace
    assert!(!store.exists(&bare).await.unwrap());

    server.cleanup(&[&bare]).await;
}

#[tokio::test]
async fn test_keys_strip_namespace() {
    let Some(mut server) = Server::connect("keys").await else {
        return;
    };
    let store = server.store().await;
    let foreign = format!("{}movies:9", server.namespace.replace("holostore-test", "other"));

    store.set("movies:1", b"{}").await.unwrap();
    store.set("movies", b"[]").await.unwrap();
    store.set("client:abc:movies", b"[\"1\"]").await.unwrap();
    let _: () = server.raw.set(&foreign, b"{}".as_slice()).await.unwrap();

    assert_eq!(store.keys("movies:").await.unwrap(), vec!["movies:1".to_string()]);

    let mut all = store.keys("").await.unwrap();
    all.sort();
    assert_eq!(all, vec!["client:abc:movies", "movies", "movies:1"]);

    server.cleanup(&[&foreign]).await;
}
