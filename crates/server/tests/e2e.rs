use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::startup::{build_app, prepare_database};

struct TestApp {
    base_url: String,
}

/// Spawn the full app over a private in-memory SQLite database
async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = AppConfig { database: models::db::sqlite_memory_config(), ..AppConfig::default() };
    let db = prepare_database(&cfg).await?;
    let app = build_app(db);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    async fn seed(&self, c: &reqwest::Client) -> anyhow::Result<(i64, i64)> {
        let res = c.post(self.url("/categories")).json(&json!({"name": "Soups"})).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        let c1 = res.json::<Value>().await?["id"].as_i64().unwrap();

        let res = c.post(self.url("/categories")).json(&json!({"name": "Cakes"})).send().await?;
        let c2 = res.json::<Value>().await?["id"].as_i64().unwrap();

        let res = c.post(self.url("/users")).json(&json!({"username": "alice"})).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        Ok((c1, c2))
    }
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["paths"]["/recipes"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_soup_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let (soups, _) = app.seed(&c).await?;

    let res = c.post(app.url("/recipes"))
        .json(&json!({"name": "Soup", "description": "desc", "ingredients": "water,salt", "category_id": soups, "username": "alice"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let recipe = res.json::<Value>().await?;
    let rid = recipe["id"].as_i64().unwrap();
    assert_eq!(recipe["name"], "Soup");
    assert_eq!(recipe["ingredients"], "water,salt");

    let res = c.get(app.url(&format!("/recipes?category_id={}", soups))).send().await?;
    let list = res.json::<Vec<Value>>().await?;
    assert!(list.iter().any(|r| r["id"].as_i64() == Some(rid)));

    let res = c.post(app.url(&format!("/users/alice/favourites/{}", rid))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    // second add is a no-op
    let res = c.post(app.url(&format!("/users/alice/favourites/{}", rid))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(app.url("/users/alice/favourites")).send().await?;
    let favs = res.json::<Vec<Value>>().await?;
    assert_eq!(favs.len(), 1);
    assert_eq!(favs[0]["id"].as_i64(), Some(rid));

    let res = c.delete(app.url(&format!("/users/alice/favourites/{}", rid))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let favs = c.get(app.url("/users/alice/favourites")).send().await?.json::<Vec<Value>>().await?;
    assert!(favs.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_edit_search_and_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let (soups, cakes) = app.seed(&c).await?;

    let res = c.post(app.url("/recipes"))
        .json(&json!({"name": "Tomato Soup", "category_id": soups, "username": "alice"}))
        .send().await?;
    let created = res.json::<Value>().await?;
    let rid = created["id"].as_i64().unwrap();

    let res = c.put(app.url(&format!("/recipes/{}", rid)))
        .json(&json!({"name": "Carrot Cake", "description": "sweet", "ingredients": "carrots", "category_id": cakes}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let edited = res.json::<Value>().await?;
    assert_eq!(edited["author_id"], created["author_id"]);
    assert_eq!(edited["category_id"].as_i64(), Some(cakes));

    let hits = c.get(app.url(&format!("/recipes?name=CAKE&category_id={}", cakes))).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);
    let hits = c.get(app.url("/recipes?name=")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);

    let res = c.delete(app.url(&format!("/recipes/{}", rid))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(app.url(&format!("/recipes/{}", rid))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(app.url(&format!("/recipes/{}", rid))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_error_statuses() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let (soups, _) = app.seed(&c).await?;

    // unknown category
    let res = c.get(app.url("/recipes?category_id=9999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], 2001);

    // unknown user
    let res = c.post(app.url("/recipes"))
        .json(&json!({"name": "Soup", "category_id": soups, "username": "ghost"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], 2003);

    // unknown recipe on edit
    let res = c.put(app.url("/recipes/4242"))
        .json(&json!({"name": "x", "category_id": soups}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // blank name
    let res = c.post(app.url("/recipes"))
        .json(&json!({"name": " ", "category_id": soups, "username": "alice"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // duplicates
    let res = c.post(app.url("/users")).json(&json!({"username": "alice"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let res = c.post(app.url("/categories")).json(&json!({"name": "Soups"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = c.get(app.url("/users/ghost/favourites")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
