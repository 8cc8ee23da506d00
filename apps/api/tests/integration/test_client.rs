use super::helpers::{TEST_PASSWORD, spawn_app, tiny_png_bytes, unique_email};
use recipe_api::client::{
    ApiClient, BearerCredential, ImageFile, RecipeForm, RecipeQuery, errors::ClientError,
};
use reqwest::StatusCode;
use std::net::SocketAddr;

async fn serve() -> (ApiClient, super::helpers::TestApp) {
    let app = spawn_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr: SocketAddr = listener.local_addr().expect("no local addr");
    let router = app.app.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });

    let client = ApiClient::new(format!("http://{}", addr)).expect("failed to build client");
    (client, app)
}

#[tokio::test]
async fn round_trip_register_create_like_unlike() {
    let (client, app) = serve().await;

    let alice = client
        .register(&unique_email("alice"), TEST_PASSWORD)
        .await
        .expect("register alice");
    let bob_email = unique_email("bob");
    client
        .register(&bob_email, TEST_PASSWORD)
        .await
        .expect("register bob");
    let bob = client.login(&bob_email, TEST_PASSWORD).await.expect("login bob");
    assert_eq!(bob.user.email, bob_email);

    let recipe = client
        .create_recipe(RecipeForm {
            title: "Bulgogi".into(),
            ingredients: vec!["Beef".into(), "Soy Sauce".into(), "Pear".into()],
            cook_time: Some("45 min".into()),
            ethnicity: Some("Korean".into()),
            images: vec![ImageFile {
                file_name: "bulgogi.png".into(),
                content_type: "image/png".into(),
                data: tiny_png_bytes(),
            }],
        })
        .await
        .expect("create recipe");
    assert_eq!(recipe.likes, 0);
    assert_eq!(recipe.images.len(), 1);

    // Each call carries its own credential; interleaving users is safe.
    assert_eq!(client.like(&alice.credential, recipe.id).await.unwrap().likes, 1);
    assert_eq!(client.like(&bob.credential, recipe.id).await.unwrap().likes, 2);
    assert_eq!(client.unlike(&alice.credential, recipe.id).await.unwrap().likes, 1);

    let stored = client.get_recipe(recipe.id).await.unwrap();
    assert_eq!(stored.liked_by, vec![bob.user.id]);

    let alice_profile = client.me(&alice.credential).await.unwrap();
    assert!(alice_profile.liked_recipes.is_empty());
    let bob_profile = client.me(&bob.credential).await.unwrap();
    assert_eq!(bob_profile.liked_recipes, vec![recipe.id]);

    let report = client.reconcile(&bob.credential, recipe.id).await.unwrap();
    assert_eq!(report.likes, 1);
    assert_eq!(report.users_repaired, 0);

    let korean = client
        .list_recipes(&RecipeQuery {
            ethnicity: Some("Korean".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(korean.items.len(), 1);
    assert_eq!(korean.items[0].id, recipe.id);

    let _ = tokio::fs::remove_dir_all(app.upload_dir()).await;
}

#[tokio::test]
async fn server_errors_surface_status_and_message() {
    let (client, app) = serve().await;
    let session = client
        .register(&unique_email("errs"), TEST_PASSWORD)
        .await
        .unwrap();
    let recipe = super::helpers::plant_recipe(&app.store, "Arepas", "Venezuelan").await;

    client.like(&session.credential, recipe.id).await.unwrap();
    match client.like(&session.credential, recipe.id).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Already liked");
        }
        other => panic!("expected Already liked, got {:?}", other),
    }

    let err = client
        .like(&BearerCredential::new("garbage"), recipe.id)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    let err = client.get_recipe(uuid::Uuid::now_v7()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}
